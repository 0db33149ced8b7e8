use alloc::collections::VecDeque;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

/// Notifications fanned out by an [`crate::ItemList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListEvent {
    /// The highlighted index was set. Emitted even when the index did not change.
    HighlightChanged(Option<usize>),
    /// Selection of the item at this index was requested.
    Selected(usize),
    /// A logical item changed position between cycles.
    ///
    /// `from: None` is a newly declared item, `to: None` an item that was not redeclared.
    ItemIndexUpdated {
        from: Option<usize>,
        to: Option<usize>,
    },
}

type Handler<T> = Rc<dyn Fn(&T)>;

struct Bus<T> {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(u64, Handler<T>)>>,
    queue: RefCell<VecDeque<T>>,
    dispatching: Cell<bool>,
}

/// A single-threaded publish/subscribe channel.
///
/// Cloning an `EventBus` yields another handle to the same channel.
///
/// Emission is synchronous. A handler may emit again: the nested event is queued and delivered
/// once the current event has reached every subscriber, so each subscriber observes events in
/// emission order. Handlers are called in subscription order.
pub struct EventBus<T> {
    inner: Rc<Bus<T>>,
}

impl<T> EventBus<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Bus {
                next_id: Cell::new(0),
                handlers: RefCell::new(Vec::new()),
                queue: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
            }),
        }
    }

    /// Registers `handler`. It stays subscribed until the returned [`Subscription`] is dropped.
    #[must_use = "dropping the subscription unsubscribes the handler"]
    pub fn subscribe(&self, handler: impl Fn(&T) + 'static) -> Subscription<T> {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id.wrapping_add(1));
        self.inner
            .handlers
            .borrow_mut()
            .push((id, Rc::new(handler)));
        Subscription {
            bus: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.handlers.borrow().len()
    }

    pub fn emit(&self, event: T) {
        self.inner.queue.borrow_mut().push_back(event);
        if self.inner.dispatching.replace(true) {
            return;
        }
        let _guard = DispatchGuard(&self.inner.dispatching);

        loop {
            let next = self.inner.queue.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            // Handlers may (un)subscribe while running; deliver to the set present at emit time.
            let handlers: Vec<Handler<T>> = self
                .inner
                .handlers
                .borrow()
                .iter()
                .map(|(_, h)| Rc::clone(h))
                .collect();
            for handler in handlers {
                handler(&event);
            }
        }
    }
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EventBus<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for EventBus<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.inner.handlers.borrow().len())
            .field("queued", &self.inner.queue.borrow().len())
            .field("dispatching", &self.inner.dispatching.get())
            .finish()
    }
}

struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Keeps a handler registered on an [`EventBus`]; unsubscribes on drop.
pub struct Subscription<T> {
    bus: Weak<Bus<T>>,
    id: u64,
}

impl<T> Subscription<T> {
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Whether the bus this subscription belongs to is still alive.
    pub fn is_active(&self) -> bool {
        self.bus.strong_count() > 0
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.handlers.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
