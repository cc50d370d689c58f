use pk_core::dex::Pokemon;
use pk_core::frame::GlyphGrid;

/// Capitalise la première lettre de chaque mot.
///
/// Any character other than a letter, digit or `_` starts a new word.
///
/// # Example
/// ```
/// use pk_render::card::title_case;
/// assert_eq!(title_case("bulbasaur"), "Bulbasaur");
/// assert_eq!(title_case("mr-mime"), "Mr-Mime");
/// assert_eq!(title_case("porygon2"), "Porygon2");
/// ```
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}

/// Header line exactly `width` characters wide: name left, stat right.
///
/// When space runs out the name is truncated first, then the stat.
///
/// # Example
/// ```
/// use pk_render::card::compose_header;
/// assert_eq!(compose_header("Pikachu", Some("HP (35)"), 16), "Pikachu  HP (35)");
/// assert_eq!(compose_header("Pikachu", Some("HP (35)"), 10), "PikHP (35)");
/// assert_eq!(compose_header("Pikachu", Some("HP (35)"), 4), "HP (");
/// assert_eq!(compose_header("Mew", None, 5), "Mew  ");
/// ```
#[must_use]
pub fn compose_header(name: &str, stat: Option<&str>, width: usize) -> String {
    let stat: String = stat.unwrap_or_default().chars().take(width).collect();
    let stat_len = stat.chars().count();
    let name_room = width - stat_len;

    let mut header: String = name.chars().take(name_room).collect();
    let name_len = header.chars().count();
    header.extend(std::iter::repeat_n(' ', name_room - name_len));
    header.push_str(&stat);
    header
}

/// A rendered sprite with its header, ready for display.
///
/// The header is always exactly as wide as the glyph grid.
///
/// # Example
/// ```
/// use pk_core::frame::GlyphGrid;
/// use pk_render::card::Card;
/// let card = Card::new("mew", Some("HP (100)"), GlyphGrid::new(12, 4));
/// assert_eq!(card.header, "Mew HP (100)");
/// assert_eq!(card.header.chars().count(), card.width());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    /// Name + stat line.
    pub header: String,
    /// Rendered sprite.
    pub grid: GlyphGrid,
}

impl Card {
    /// Build a card; `name` is title-cased.
    #[must_use]
    pub fn new(name: &str, stat: Option<&str>, grid: GlyphGrid) -> Self {
        let header = compose_header(&title_case(name), stat, usize::from(grid.width));
        Self { header, grid }
    }

    /// Card for a Pokedex record, labelled with its hit points.
    #[must_use]
    pub fn for_pokemon(pokemon: &Pokemon, grid: GlyphGrid) -> Self {
        let stat = pokemon.hp().map(|hp| format!("HP ({hp})"));
        Self::new(&pokemon.name, stat.as_deref(), grid)
    }

    /// Width in cells, header included.
    #[must_use]
    pub fn width(&self) -> usize {
        usize::from(self.grid.width)
    }

    /// Height in lines, header included.
    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.grid.height) + 1
    }

    /// Header then sprite rows as ANSI text.
    ///
    /// # Example
    /// ```
    /// use pk_core::frame::GlyphGrid;
    /// use pk_render::card::Card;
    /// let card = Card::new("abra", None, GlyphGrid::new(4, 1));
    /// assert_eq!(card.to_ansi(), "Abra\n    \n");
    /// ```
    #[must_use]
    pub fn to_ansi(&self) -> String {
        let mut out = String::with_capacity(self.header.len() + 1);
        out.push_str(&self.header);
        out.push('\n');
        out.push_str(&pk_glyph::ansi::to_ansi_string(&self.grid));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pk_core::dex::{NamedResource, StatEntry};

    #[test]
    fn header_width_always_matches_grid() {
        let labels = [
            ("bulbasaur", Some("HP (45)")),
            ("a-very-long-pokemon-name", Some("HP (255)")),
            ("", None),
            ("x", Some("HP (1)")),
        ];
        for width in [0u16, 1, 3, 7, 9, 20, 64] {
            for (name, stat) in labels {
                let card = Card::new(name, stat, GlyphGrid::new(width, 2));
                assert_eq!(
                    card.header.chars().count(),
                    usize::from(width),
                    "{name:?} {stat:?} @ {width}"
                );
            }
        }
    }

    #[test]
    fn pokemon_card_uses_hp() {
        let pokemon = Pokemon {
            name: "charmander".into(),
            stats: vec![StatEntry {
                base_stat: 39,
                effort: 0,
                stat: NamedResource {
                    name: "hp".into(),
                    url: None,
                },
            }],
            ..Pokemon::default()
        };
        let card = Card::for_pokemon(&pokemon, GlyphGrid::new(20, 3));
        assert!(card.header.starts_with("Charmander"));
        assert!(card.header.ends_with("HP (39)"));
        assert_eq!(card.height(), 4);
    }

    #[test]
    fn title_case_separators() {
        assert_eq!(title_case("nidoran-f"), "Nidoran-F");
        assert_eq!(title_case("tapu koko"), "Tapu Koko");
        assert_eq!(title_case("type_null"), "Type_null");
        assert_eq!(title_case(""), "");
    }
}
