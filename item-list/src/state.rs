use alloc::string::String;

/// The per-item facts an accessibility binding needs (`id`, `aria-selected`,
/// `aria-disabled`, highlighted styling).
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemState {
    pub id: String,
    pub index: usize,
    pub highlighted: bool,
    pub selected: bool,
    pub disabled: bool,
}

/// A lightweight snapshot of a list's ids and highlight.
///
/// `highlighted_id` is what a host puts into `aria-activedescendant`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListSnapshot {
    pub controller_id: String,
    pub list_id: String,
    pub highlighted_index: Option<usize>,
    pub highlighted_id: Option<String>,
    pub item_count: usize,
}
