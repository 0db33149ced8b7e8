use item_list::Key;

/// The axis a menu's items are laid out on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

impl Orientation {
    /// The (previous, next) arrow keys for this axis.
    pub fn arrows(self) -> (Key, Key) {
        match self {
            Self::Horizontal => (Key::ArrowLeft, Key::ArrowRight),
            Self::Vertical => (Key::ArrowUp, Key::ArrowDown),
        }
    }
}

/// The widget pattern a [`crate::Controller`] implements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pattern {
    /// A select-style listbox.
    #[default]
    Listbox,
    /// A text input driving a popup listbox. Printable keys belong to the input, so there is
    /// no typeahead and Space is not a select key.
    Combobox,
    Menu { orientation: Orientation },
    /// Items laid out row by row, `columns` per row.
    Grid { columns: usize },
}

impl Pattern {
    pub fn uses_typeahead(&self) -> bool {
        matches!(self, Self::Listbox | Self::Menu { .. })
    }

    pub fn is_select_key(&self, key: Key) -> bool {
        match key {
            Key::Enter => true,
            Key::Space => matches!(self, Self::Listbox | Self::Menu { .. }),
            _ => false,
        }
    }
}
