use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::mem;

use crate::id::ListIds;
use crate::key::ValueMap;
use crate::types::ItemSlot;
use crate::{ItemDescriptor, ItemRecord, ItemValue};

/// The result of declaring one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Declaration {
    /// A logical item that was not part of the previous cycle.
    Added(usize),
    /// Same index as in the previous cycle.
    Kept(usize),
    /// The item was redeclared at a different index.
    Moved { from: usize, to: usize },
    /// The value was already declared in this cycle; its descriptor fields were overwritten.
    Refreshed(usize),
    /// The collection was already closed when a new value arrived. Nothing was stored and the
    /// whole collection must be redeclared.
    Invalidated,
}

impl Declaration {
    pub fn index(&self) -> Option<usize> {
        match *self {
            Self::Added(i) | Self::Kept(i) | Self::Refreshed(i) => Some(i),
            Self::Moved { to, .. } => Some(to),
            Self::Invalidated => None,
        }
    }
}

/// Tracks the ordered collection of items declared in each update cycle.
///
/// Hosts drive it with two synchronization points per cycle: [`Self::begin_cycle`] before
/// items declare themselves and [`Self::end_cycle`] once the declaration pass is done. Items
/// are matched against the previous cycle by value, so a logical item keeps its slot (and the
/// handles/observers attached to it) while its index moves.
#[derive(Debug)]
pub struct ItemRegistry<V, E = ()> {
    ids: ListIds,
    items: Vec<ItemRecord<V, E>>,
    previous: Vec<ItemRecord<V, E>>,
    slots: ValueMap<V, Weak<ItemSlot>>,
    generation: u64,
    open: bool,
    invalidated: bool,
}

impl<V: ItemValue, E> ItemRegistry<V, E> {
    pub fn new(ids: ListIds) -> Self {
        Self {
            ids,
            items: Vec::new(),
            previous: Vec::new(),
            slots: ValueMap::new(),
            generation: 1,
            open: true,
            invalidated: false,
        }
    }

    pub fn ids(&self) -> &ListIds {
        &self.ids
    }

    /// Clears the working collection and reopens it.
    ///
    /// Returns the former indices of items detached because the previous cycle was never
    /// closed (see [`Self::end_cycle`]).
    pub fn begin_cycle(&mut self) -> Vec<usize> {
        let detached = if self.open {
            self.detach_stale()
        } else {
            Vec::new()
        };
        self.generation = self.generation.wrapping_add(1);
        self.previous = mem::take(&mut self.items);
        self.open = true;
        self.invalidated = false;
        ltrace!(
            generation = self.generation,
            previous = self.previous.len(),
            "ItemRegistry::begin_cycle"
        );
        detached
    }

    /// Marks the collection complete.
    ///
    /// Returns the former indices of items from the previous cycle that were not redeclared.
    pub fn end_cycle(&mut self) -> Vec<usize> {
        self.open = false;
        let detached = self.detach_stale();
        self.slots.retain(|_, slot| slot.strong_count() > 0);
        ltrace!(
            generation = self.generation,
            count = self.items.len(),
            detached = detached.len(),
            "ItemRegistry::end_cycle"
        );
        detached
    }

    pub fn declare(&mut self, descriptor: ItemDescriptor<V, E>) -> Declaration {
        let ItemDescriptor {
            value,
            text,
            element,
            disabled,
        } = descriptor;

        let slot = self.slots.get(&value).and_then(Weak::upgrade);

        if let Some(slot) = &slot {
            if slot.generation.get() == self.generation {
                if let Some(index) = slot.index.get() {
                    if self.open {
                        lwarn!(
                            index,
                            "ItemRegistry: value declared twice in one cycle; keeping the last descriptor"
                        );
                    }
                    let record = &mut self.items[index];
                    record.text = text;
                    record.element = element;
                    record.disabled = disabled;
                    return Declaration::Refreshed(index);
                }
            }
        }

        if !self.open && !self.items.is_empty() {
            if !self.invalidated {
                ldebug!(
                    count = self.items.len(),
                    "ItemRegistry: item declared after the cycle closed; collection invalidated"
                );
            }
            self.invalidated = true;
            return Declaration::Invalidated;
        }

        let index = self.items.len();
        let (slot, declaration) = match slot {
            Some(slot) => {
                let declaration = match slot.index.get() {
                    Some(from) if from == index => Declaration::Kept(index),
                    Some(from) => Declaration::Moved { from, to: index },
                    None => Declaration::Added(index),
                };
                slot.index.set(Some(index));
                slot.generation.set(self.generation);
                (slot, declaration)
            }
            None => {
                let slot = Rc::new(ItemSlot::new(index, self.generation));
                self.slots.insert(value.clone(), Rc::downgrade(&slot));
                (slot, Declaration::Added(index))
            }
        };

        self.items.push(ItemRecord {
            id: self.ids.item_id(index),
            index,
            value,
            text,
            element,
            disabled,
            slot,
        });
        declaration
    }

    fn detach_stale(&mut self) -> Vec<usize> {
        let generation = self.generation;
        let mut detached = Vec::new();
        for record in self.previous.drain(..) {
            if record.slot.generation.get() != generation {
                if let Some(index) = record.slot.index.take() {
                    detached.push(index);
                }
            }
        }
        detached
    }

    pub fn items(&self) -> &[ItemRecord<V, E>] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&ItemRecord<V, E>> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The index of `value` in the current cycle.
    pub fn index_of(&self, value: &V) -> Option<usize> {
        let slot = self.slots.get(value)?.upgrade()?;
        if slot.generation.get() != self.generation {
            return None;
        }
        slot.index.get()
    }

    /// Whether the registry is collecting declarations for the current cycle.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether a declaration arrived after the cycle closed.
    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    pub(crate) fn slot(&self, index: usize) -> Option<Rc<ItemSlot>> {
        self.items.get(index).map(|record| Rc::clone(&record.slot))
    }
}
