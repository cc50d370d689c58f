use pk_core::dex::{DexPage, Pokemon, Side};

/// État de navigation : page courante, sélection et face affichée.
#[derive(Clone, Debug, Default)]
pub struct Navigator {
    reference: Option<String>,
    page: DexPage,
    selected: usize,
    side: Side,
}

impl Navigator {
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self {
            side,
            ..Self::default()
        }
    }

    /// Install a freshly loaded page and reset the selection.
    pub fn set_page(&mut self, reference: Option<String>, page: DexPage) {
        self.reference = reference;
        self.page = page;
        self.selected = 0;
    }

    /// Reference to fetch for the next page, if there is one.
    #[must_use]
    pub fn next_page(&self) -> Option<&str> {
        self.page.next.as_deref()
    }

    /// Reference to fetch for the previous page, if there is one.
    #[must_use]
    pub fn previous_page(&self) -> Option<&str> {
        self.page.previous.as_deref()
    }

    /// Move down; stays on the last record. Returns true if it moved.
    pub fn select_next(&mut self) -> bool {
        if self.selected + 1 < self.page.results.len() {
            self.selected += 1;
            true
        } else {
            false
        }
    }

    /// Move up; stays on the first record. Returns true if it moved.
    pub fn select_previous(&mut self) -> bool {
        if self.selected > 0 {
            self.selected -= 1;
            true
        } else {
            false
        }
    }

    pub fn toggle_side(&mut self) {
        self.side = self.side.toggled();
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_pokemon(&self) -> Option<&Pokemon> {
        self.page.results.get(self.selected)
    }

    /// Reference of the page on screen (`None` = first page).
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Noms de la page courante.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.page.results.iter().map(|p| p.name.clone()).collect()
    }

    /// `#first–#last / count`, from the record ids of the page.
    #[must_use]
    pub fn page_label(&self) -> String {
        match (self.page.results.first(), self.page.results.last()) {
            (Some(first), Some(last)) => {
                format!("#{}–#{} / {}", first.id, last.id, self.page.count)
            }
            _ => format!("0 / {}", self.page.count),
        }
    }
}
