use serde::{Deserialize, Serialize};

/// One page of Pokedex results, PokeAPI field names.
///
/// # Example
/// ```
/// use pk_core::dex::DexPage;
/// let page = DexPage::default();
/// assert!(page.next.is_none());
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct DexPage {
    /// Total number of records across all pages.
    #[serde(default)]
    pub count: u32,
    /// Reference of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,
    /// Reference of the previous page, if any.
    #[serde(default)]
    pub previous: Option<String>,
    /// Records of this page.
    #[serde(default)]
    pub results: Vec<Pokemon>,
}

/// A single Pokemon record.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Pokemon {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
}

/// Sprite references. Either may be missing.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub back_default: Option<String>,
}

/// A named base stat.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct StatEntry {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

/// `{ name, url }` pair used throughout PokeAPI.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Which sprite of a record is displayed.
///
/// # Example
/// ```
/// use pk_core::dex::Side;
/// assert_eq!(Side::Front.toggled(), Side::Back);
/// assert_eq!(Side::Back.toggled(), Side::Front);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Side {
    #[default]
    Front,
    Back,
}

impl Side {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

impl Pokemon {
    /// Sprite reference for the requested side.
    #[must_use]
    pub fn sprite(&self, side: Side) -> Option<&str> {
        match side {
            Side::Front => self.sprites.front_default.as_deref(),
            Side::Back => self.sprites.back_default.as_deref(),
        }
    }

    /// Value of a stat by name.
    #[must_use]
    pub fn stat(&self, name: &str) -> Option<u32> {
        self.stats
            .iter()
            .find(|s| s.stat.name == name)
            .map(|s| s.base_stat)
    }

    /// Hit points: the `hp` stat, or the first listed stat when unnamed.
    ///
    /// # Example
    /// ```
    /// use pk_core::dex::Pokemon;
    /// let p: Pokemon = serde_json::from_str(
    ///     r#"{"name":"bulbasaur","stats":[{"base_stat":45,"stat":{"name":"hp"}}]}"#,
    /// ).unwrap();
    /// assert_eq!(p.hp(), Some(45));
    /// ```
    #[must_use]
    pub fn hp(&self) -> Option<u32> {
        self.stat("hp")
            .or_else(|| self.stats.first().map(|s| s.base_stat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "count": 2,
        "next": "page-2.json",
        "previous": null,
        "results": [
            {
                "id": 1,
                "name": "bulbasaur",
                "order": 1,
                "sprites": { "front_default": "sprites/1.png", "back_default": null },
                "stats": [
                    { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "x" } },
                    { "base_stat": 49, "effort": 0, "stat": { "name": "attack" } }
                ]
            },
            { "name": "missingno" }
        ]
    }"#;

    #[test]
    fn parses_pokeapi_shape() {
        let page: DexPage = parse(PAGE);
        assert_eq!(page.count, 2);
        assert_eq!(page.next.as_deref(), Some("page-2.json"));
        assert!(page.previous.is_none());
        assert_eq!(page.results.len(), 2);

        let bulba = &page.results[0];
        assert_eq!(bulba.sprite(Side::Front), Some("sprites/1.png"));
        assert_eq!(bulba.sprite(Side::Back), None);
        assert_eq!(bulba.hp(), Some(45));
        assert_eq!(bulba.stat("attack"), Some(49));

        let missing = &page.results[1];
        assert_eq!(missing.hp(), None);
        assert_eq!(missing.sprite(Side::Front), None);
    }

    #[test]
    fn hp_falls_back_to_first_stat() {
        let p = Pokemon {
            name: "ditto".into(),
            stats: vec![StatEntry {
                base_stat: 48,
                effort: 1,
                stat: NamedResource {
                    name: "special".into(),
                    url: None,
                },
            }],
            ..Pokemon::default()
        };
        assert_eq!(p.hp(), Some(48));
    }

    fn parse(s: &str) -> DexPage {
        serde_json::from_str(s).unwrap()
    }
}
