//! A headless item-list controller.
//!
//! `item-list` gives any selectable collection (listbox, combobox popup, menu, calendar grid)
//! keyboard navigation, typeahead search, highlight and selection state, and accessibility id
//! wiring, while the collection itself is redeclared on every UI update cycle.
//!
//! It is UI-agnostic. A host (reactive UI, immediate-mode GUI, terminal UI) is expected to:
//! - call [`ItemList::begin_cycle`], declare each item in tree order, then
//!   [`ItemList::end_cycle`] on every update
//! - forward key and pointer input
//! - optionally expose its element tree through [`ScrollHost`] so the highlighted item stays
//!   scrolled into view
//!
//! For widget-pattern key handling (combobox, menu, grid), see the `item-list-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod event;
mod highlight;
mod id;
mod input;
mod key;
mod list;
mod observer;
mod options;
mod registry;
mod scroll;
mod selection;
mod state;
mod typeahead;
mod types;

#[cfg(test)]
mod tests;

pub use event::{EventBus, ListEvent, Subscription};
pub use highlight::{HighlightController, HighlightedIndex, next_index};
pub use id::{IdSource, ListIds, ListKey};
pub use input::{Key, KeyInput, KeyOutcome, Modifiers};
pub use key::ItemValue;
pub use list::ItemList;
pub use observer::{HighlightedIdObserver, HighlightedObserver, ItemHandle};
pub use options::{ItemListOptions, OnHighlightCallback, OnInvalidateCallback, OnSelectCallback};
pub use registry::{Declaration, ItemRegistry};
pub use scroll::{
    ScrollContainer, ScrollHost, ScrollIntoView, ScrollSynchronizer, closest_scroll_container,
    scroll_into_view, scroll_offset_into_view,
};
pub use selection::Selection;
pub use state::{ItemState, ListSnapshot};
pub use typeahead::{DEFAULT_TYPEAHEAD_DELAY_MS, Typeahead, is_typeahead_key};
pub use types::{ItemDescriptor, ItemRecord, MoveOptions};

#[doc(hidden)]
pub use key::ValueKey;
