use std::fs;
use std::path::{Component, Path, PathBuf};

use pk_core::dex::{DexPage, Pokemon, Sprites};
use pk_core::error::SourceError;
use pk_core::frame::FrameBuffer;
use pk_core::traits::DexSource;

use crate::image::{is_image_path, load_image};

/// Page d'entrée préférée dans un dossier dex.
pub const INDEX_PAGE: &str = "index.json";

/// Taille des pages synthétiques d'un dossier de sprites.
pub const FOLDER_PAGE_SIZE: usize = 20;

/// Prefix of synthetic page references (`@0`, `@1`, ...).
const FOLDER_PAGE_PREFIX: char = '@';

enum Layout {
    /// Pages JSON au format PokeAPI ; `next`/`previous` sont des noms de fichiers.
    Pages { first: String },
    /// Simple dossier d'images, découpé en pages de [`FOLDER_PAGE_SIZE`].
    Folder { sprites: Vec<String> },
}

/// Source Pokedex adossée à un dossier local.
///
/// Two layouts are understood:
/// - JSON pages (`index.json`, or the first `*.json` by name) whose sprite
///   references are image paths relative to the folder;
/// - a plain folder of images, listed recursively and paged by name.
///
/// # Example
/// ```no_run
/// use pk_core::traits::DexSource;
/// use pk_source::LocalDex;
/// use std::path::Path;
///
/// let dex = LocalDex::open(Path::new("dex")).unwrap();
/// let page = dex.fetch_page(None).unwrap();
/// println!("{} Pokémon", page.count);
/// ```
pub struct LocalDex {
    root: PathBuf,
    layout: Layout,
}

impl LocalDex {
    /// Ouvre un dossier dex.
    ///
    /// # Errors
    /// Returns [`SourceError::PageNotFound`] if the folder holds neither a JSON
    /// page nor an image, or an I/O error if it cannot be listed.
    pub fn open(root: &Path) -> Result<Self, SourceError> {
        if !root.is_dir() {
            return Err(SourceError::PageNotFound {
                reference: root.display().to_string(),
            });
        }

        if root.join(INDEX_PAGE).is_file() {
            return Ok(Self::with_layout(
                root,
                Layout::Pages {
                    first: INDEX_PAGE.to_string(),
                },
            ));
        }

        let mut pages: Vec<String> = fs::read_dir(root)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "json"))
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
            .collect();
        pages.sort();
        if let Some(first) = pages.into_iter().next() {
            return Ok(Self::with_layout(root, Layout::Pages { first }));
        }

        let mut files = Vec::new();
        scan_dir(root, &mut files)?;
        files.sort();
        let sprites: Vec<String> = files
            .iter()
            .filter_map(|p| p.strip_prefix(root).ok())
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect();

        if sprites.is_empty() {
            return Err(SourceError::PageNotFound {
                reference: root.display().to_string(),
            });
        }
        log::info!(
            "Dossier de sprites {} : {} image(s)",
            root.display(),
            sprites.len()
        );
        Ok(Self::with_layout(root, Layout::Folder { sprites }))
    }

    fn with_layout(root: &Path, layout: Layout) -> Self {
        Self {
            root: root.to_path_buf(),
            layout,
        }
    }

    /// Dossier racine.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a reference inside the root; `None` if it escapes it.
    fn resolve(&self, reference: &str) -> Option<PathBuf> {
        let rel = Path::new(reference);
        let inside = rel
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        inside.then(|| self.root.join(rel))
    }

    fn json_page(&self, reference: &str) -> Result<DexPage, SourceError> {
        let not_found = || SourceError::PageNotFound {
            reference: reference.to_string(),
        };
        let path = self.resolve(reference).ok_or_else(not_found)?;
        if !path.is_file() {
            return Err(not_found());
        }
        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| SourceError::MalformedPage {
            reference: reference.to_string(),
            reason: e.to_string(),
        })
    }

    fn folder_page(sprites: &[String], reference: Option<&str>) -> Result<DexPage, SourceError> {
        let index = match reference {
            None => 0,
            Some(r) => r
                .strip_prefix(FOLDER_PAGE_PREFIX)
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| SourceError::PageNotFound {
                    reference: r.to_string(),
                })?,
        };

        let start = index * FOLDER_PAGE_SIZE;
        if start >= sprites.len() && index > 0 {
            return Err(SourceError::PageNotFound {
                reference: format!("{FOLDER_PAGE_PREFIX}{index}"),
            });
        }
        let end = (start + FOLDER_PAGE_SIZE).min(sprites.len());

        let results = sprites[start..end]
            .iter()
            .enumerate()
            .map(|(offset, rel)| Pokemon {
                id: (start + offset + 1) as u32,
                name: Path::new(rel)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                order: (start + offset + 1) as i32,
                sprites: Sprites {
                    front_default: Some(rel.clone()),
                    back_default: None,
                },
                stats: Vec::new(),
            })
            .collect();

        Ok(DexPage {
            count: sprites.len() as u32,
            next: (end < sprites.len()).then(|| format!("{FOLDER_PAGE_PREFIX}{}", index + 1)),
            previous: (index > 0).then(|| format!("{FOLDER_PAGE_PREFIX}{}", index - 1)),
            results,
        })
    }
}

impl DexSource for LocalDex {
    fn fetch_page(&self, reference: Option<&str>) -> Result<DexPage, SourceError> {
        match &self.layout {
            Layout::Pages { first } => self.json_page(reference.unwrap_or(first)),
            Layout::Folder { sprites } => Self::folder_page(sprites, reference),
        }
    }

    fn load_sprite(&self, reference: &str) -> Result<FrameBuffer, SourceError> {
        let unavailable = || SourceError::SpriteUnavailable {
            reference: reference.to_string(),
        };
        let path = self.resolve(reference).ok_or_else(unavailable)?;
        match load_image(&path) {
            Ok(frame) if !frame.is_empty() => Ok(frame),
            Ok(_) => {
                log::warn!("Sprite vide : {reference}");
                Err(unavailable())
            }
            Err(e) => {
                log::warn!("Sprite indisponible {reference} : {e:#}");
                Err(unavailable())
            }
        }
    }
}

/// Extrait récursivement les images reconnues.
fn scan_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), SourceError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            scan_dir(&path, files)?;
        } else if is_image_path(&path) {
            files.push(path);
        }
    }
    Ok(())
}
