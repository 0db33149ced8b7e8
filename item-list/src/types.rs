use alloc::rc::Rc;
use alloc::string::String;
use core::cell::Cell;

/// What an item declares about itself on every update cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDescriptor<V, E = ()> {
    pub value: V,
    /// Display text used by typeahead. Falls back to [`crate::ItemValue::search_text`].
    pub text: Option<String>,
    /// The rendered element, used only to scroll the item into view.
    pub element: Option<E>,
    pub disabled: bool,
}

impl<V, E> ItemDescriptor<V, E> {
    pub fn new(value: V) -> Self {
        Self {
            value,
            text: None,
            element: None,
            disabled: false,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_element(mut self, element: E) -> Self {
        self.element = Some(element);
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// One item of the current cycle's collection.
#[derive(Clone, Debug)]
pub struct ItemRecord<V, E = ()> {
    /// Positional id (`<list id>-item-<index>`).
    pub id: String,
    pub index: usize,
    pub value: V,
    pub text: Option<String>,
    pub element: Option<E>,
    pub disabled: bool,
    pub(crate) slot: Rc<ItemSlot>,
}

/// The live position of one logical item, shared with handles and observers.
///
/// A slot outlives the cycle it was created in: when an item is redeclared, its slot is reused
/// and the new index is written through it.
#[derive(Debug)]
pub(crate) struct ItemSlot {
    pub(crate) index: Cell<Option<usize>>,
    pub(crate) generation: Cell<u64>,
}

impl ItemSlot {
    pub(crate) fn new(index: usize, generation: u64) -> Self {
        Self {
            index: Cell::new(Some(index)),
            generation: Cell::new(generation),
        }
    }
}

/// Options for [`crate::ItemList::move_highlight`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOptions {
    /// Wrap around the ends of the list instead of clearing the highlight.
    pub contain: bool,
}

impl MoveOptions {
    pub const CONTAIN: Self = Self { contain: true };
    pub const UNCONTAINED: Self = Self { contain: false };
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self::CONTAIN
    }
}
