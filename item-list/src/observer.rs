use alloc::rc::Rc;
use alloc::string::String;
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::event::{EventBus, Subscription};
use crate::highlight::HighlightedIndex;
use crate::id::ListIds;
use crate::types::ItemSlot;
use crate::{ItemList, ItemValue, ListEvent};

/// What a declared item gets back from [`ItemList::declare_item`].
///
/// `id`, `index`, `selected` and `disabled` are as of the declaration. The handle also tracks
/// the item's live position, so [`Self::highlight`] and [`Self::select`] keep targeting the same
/// logical item when a later cycle moves it.
#[derive(Clone)]
pub struct ItemHandle {
    pub(crate) id: String,
    pub(crate) index: usize,
    pub(crate) selected: bool,
    pub(crate) disabled: bool,
    pub(crate) slot: Rc<ItemSlot>,
}

impl ItemHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The item's index in the latest cycle, or `None` once it is no longer declared.
    pub fn current_index(&self) -> Option<usize> {
        self.slot.index.get()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Highlights this item unless it is disabled.
    pub fn highlight<V: ItemValue, E>(&self, list: &mut ItemList<V, E>) {
        list.highlight_item(self);
    }

    /// Requests selection of this item unless it is disabled.
    pub fn select<V: ItemValue, E>(&self, list: &mut ItemList<V, E>) {
        list.select_item(self);
    }

    pub fn observe_highlighted<V: ItemValue, E>(
        &self,
        list: &ItemList<V, E>,
    ) -> HighlightedObserver {
        list.observe_highlighted(self)
    }
}

impl fmt::Debug for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemHandle")
            .field("id", &self.id)
            .field("index", &self.index)
            .field("current_index", &self.current_index())
            .field("selected", &self.selected)
            .field("disabled", &self.disabled)
            .finish()
    }
}

struct Flag {
    value: Cell<bool>,
    changed: Cell<bool>,
}

/// Tracks whether one item is highlighted.
///
/// Only flips (and only reports a change) when this item's own highlighted state changes, so a
/// host can re-render just the affected items.
pub struct HighlightedObserver {
    flag: Rc<Flag>,
    _subscription: Subscription<ListEvent>,
}

impl HighlightedObserver {
    pub(crate) fn new(
        bus: &EventBus<ListEvent>,
        slot: Rc<ItemSlot>,
        highlighted: HighlightedIndex,
        on_change: Option<Rc<dyn Fn(bool)>>,
    ) -> Self {
        let initial = is_at(&slot, highlighted.get());
        let flag = Rc::new(Flag {
            value: Cell::new(initial),
            changed: Cell::new(false),
        });
        let subscription = bus.subscribe({
            let flag = Rc::clone(&flag);
            move |event| {
                let next = match *event {
                    ListEvent::HighlightChanged(index) => is_at(&slot, index),
                    ListEvent::ItemIndexUpdated { .. } => is_at(&slot, highlighted.get()),
                    ListEvent::Selected(_) => return,
                };
                if flag.value.replace(next) != next {
                    flag.changed.set(true);
                    if let Some(f) = &on_change {
                        f(next);
                    }
                }
            }
        });
        Self {
            flag,
            _subscription: subscription,
        }
    }

    pub fn get(&self) -> bool {
        self.flag.value.get()
    }

    /// Whether the state flipped since the last call.
    pub fn take_changed(&self) -> bool {
        self.flag.changed.replace(false)
    }
}

impl fmt::Debug for HighlightedObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HighlightedObserver")
            .field("highlighted", &self.get())
            .field("changed", &self.flag.changed.get())
            .finish()
    }
}

fn is_at(slot: &ItemSlot, highlighted: Option<usize>) -> bool {
    match (slot.index.get(), highlighted) {
        (Some(index), Some(highlighted)) => index == highlighted,
        _ => false,
    }
}

/// Tracks the id of the highlighted item (for `aria-activedescendant`).
pub struct HighlightedIdObserver {
    id: Rc<RefCell<Option<String>>>,
    _subscription: Subscription<ListEvent>,
}

impl HighlightedIdObserver {
    pub(crate) fn new(bus: &EventBus<ListEvent>, ids: ListIds, initial: Option<String>) -> Self {
        let id = Rc::new(RefCell::new(initial));
        let subscription = bus.subscribe({
            let id = Rc::clone(&id);
            move |event| {
                if let ListEvent::HighlightChanged(index) = *event {
                    *id.borrow_mut() = index.map(|i| ids.item_id(i));
                }
            }
        });
        Self {
            id,
            _subscription: subscription,
        }
    }

    pub fn get(&self) -> Option<String> {
        self.id.borrow().clone()
    }
}

impl fmt::Debug for HighlightedIdObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HighlightedIdObserver")
            .field("id", &*self.id.borrow())
            .finish()
    }
}
