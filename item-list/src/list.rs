use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::event::{EventBus, Subscription};
use crate::highlight::{HighlightController, next_index};
use crate::id::{IdSource, ListIds, ListKey};
use crate::observer::{HighlightedIdObserver, HighlightedObserver, ItemHandle};
use crate::registry::{Declaration, ItemRegistry};
use crate::scroll::ScrollIntoView;
use crate::state::{ItemState, ListSnapshot};
use crate::typeahead::Typeahead;
use crate::{
    ItemDescriptor, ItemListOptions, ItemRecord, ItemValue, Key, KeyInput, KeyOutcome, ListEvent,
    MoveOptions, Selection,
};

/// A headless controller for one rendered list (listbox, menu, combobox popup, grid).
///
/// The host redeclares the list's items on every update cycle:
///
/// ```
/// use item_list::{ItemDescriptor, ItemList, ItemListOptions};
///
/// let mut list: ItemList<&str> = ItemList::new(0, ItemListOptions::new());
/// list.begin_cycle();
/// let apple = list.declare_item(ItemDescriptor::new("apple")).unwrap();
/// let pear = list.declare_item(ItemDescriptor::new("pear")).unwrap();
/// list.end_cycle();
///
/// assert_eq!(apple.id(), "list-0-item-0");
/// assert_eq!(pear.index(), 1);
/// list.move_highlight(1, Default::default());
/// assert_eq!(list.highlighted_index(), Some(1));
/// ```
///
/// The controller holds no UI objects. Element handles (`E`) are opaque and only passed back
/// to the installed [`ScrollIntoView`] implementation.
pub struct ItemList<V, E = ()> {
    ids: ListIds,
    registry: ItemRegistry<V, E>,
    highlight: HighlightController,
    highlighted_value: Option<V>,
    typeahead: Typeahead,
    bus: EventBus<ListEvent>,
    // Index updates of the open cycle, delivered once the highlight is reconciled.
    pending_updates: Vec<ListEvent>,
    options: ItemListOptions<V, E>,
    scroller: Option<Box<dyn ScrollIntoView<E>>>,
    invalidation_reported: bool,
}

impl<V: ItemValue, E> ItemList<V, E> {
    pub fn new(key: impl Into<ListKey>, options: ItemListOptions<V, E>) -> Self {
        let ids = ListIds::new(key);
        ldebug!(
            list_id = ids.list_id(),
            initial_highlighted_index = ?options.initial_highlighted_index,
            "ItemList::new"
        );
        Self {
            registry: ItemRegistry::new(ids.clone()),
            highlight: HighlightController::new(options.initial_highlighted_index),
            highlighted_value: None,
            typeahead: Typeahead::new(options.typeahead_delay_ms),
            bus: EventBus::new(),
            pending_updates: Vec::new(),
            scroller: None,
            invalidation_reported: false,
            ids,
            options,
        }
    }

    /// Creates a list keyed by the next id of `source`.
    pub fn from_source(source: &IdSource, options: ItemListOptions<V, E>) -> Self {
        Self::new(source.next(), options)
    }

    pub fn ids(&self) -> &ListIds {
        &self.ids
    }

    pub fn controller_id(&self) -> &str {
        self.ids.controller_id()
    }

    pub fn list_id(&self) -> &str {
        self.ids.list_id()
    }

    pub fn item_id(&self, index: usize) -> String {
        self.ids.item_id(index)
    }

    pub fn options(&self) -> &ItemListOptions<V, E> {
        &self.options
    }

    /// Replaces the options. The typeahead delay applies to the next key; the initial highlight
    /// is only consulted at construction.
    pub fn set_options(&mut self, options: ItemListOptions<V, E>) {
        self.typeahead.set_delay_ms(options.typeahead_delay_ms);
        self.options = options;
    }

    /// Replaces the selection source. Hosts typically do this every cycle, before declaring.
    pub fn set_selection(&mut self, selection: Selection<V>) {
        self.options.selection = selection;
    }

    pub fn set_scroll_synchronizer(&mut self, scroller: impl ScrollIntoView<E> + 'static) {
        self.scroller = Some(Box::new(scroller));
    }

    pub fn clear_scroll_synchronizer(&mut self) {
        self.scroller = None;
    }

    pub fn events(&self) -> &EventBus<ListEvent> {
        &self.bus
    }

    #[must_use = "dropping the subscription unsubscribes the handler"]
    pub fn subscribe(&self, handler: impl Fn(&ListEvent) + 'static) -> Subscription<ListEvent> {
        self.bus.subscribe(handler)
    }

    // Collection

    /// Starts a declaration pass. Call before items declare themselves.
    pub fn begin_cycle(&mut self) {
        let detached = self.registry.begin_cycle();
        self.invalidation_reported = false;
        self.queue_detached(detached);
        self.flush_index_updates();
    }

    /// Declares one item of the current cycle, in tree order.
    ///
    /// Returns `None` when the item arrived after the cycle closed and was not part of it. The
    /// collection is then stale: [`Self::needs_redeclare`] turns true and `on_invalidate` fires
    /// once, and the host should run a full declaration pass again.
    pub fn declare_item(&mut self, descriptor: ItemDescriptor<V, E>) -> Option<ItemHandle> {
        let selected = self.options.selection.is_selected(&descriptor.value);
        let declaration = self.registry.declare(descriptor);
        match declaration {
            Declaration::Invalidated => {
                if !self.invalidation_reported {
                    self.invalidation_reported = true;
                    if let Some(cb) = self.options.on_invalidate.clone() {
                        cb();
                    }
                }
                return None;
            }
            Declaration::Added(index) => self.queue_index_update(ListEvent::ItemIndexUpdated {
                from: None,
                to: Some(index),
            }),
            Declaration::Moved { from, to } => {
                self.queue_index_update(ListEvent::ItemIndexUpdated {
                    from: Some(from),
                    to: Some(to),
                })
            }
            Declaration::Kept(_) | Declaration::Refreshed(_) => {}
        }
        let index = declaration.index()?;
        self.handle_with_selected(index, selected)
    }

    /// Closes the current declaration pass.
    ///
    /// Items of the previous cycle that were not redeclared are detached, and the highlight is
    /// reconciled with the new collection. The cycle's [`ListEvent::ItemIndexUpdated`] events
    /// are delivered after that, so observers only see the settled state.
    pub fn end_cycle(&mut self) {
        let detached = self.registry.end_cycle();
        self.queue_detached(detached);
        self.reconcile_highlight();
        self.flush_index_updates();
    }

    /// Runs a full cycle over `descriptors`.
    pub fn rebuild(
        &mut self,
        descriptors: impl IntoIterator<Item = ItemDescriptor<V, E>>,
    ) -> Vec<ItemHandle> {
        self.begin_cycle();
        let handles = descriptors
            .into_iter()
            .filter_map(|d| self.declare_item(d))
            .collect();
        self.end_cycle();
        handles
    }

    /// Whether a late declaration invalidated the current collection.
    pub fn needs_redeclare(&self) -> bool {
        self.registry.is_invalidated()
    }

    pub fn is_collecting(&self) -> bool {
        self.registry.is_open()
    }

    fn queue_detached(&mut self, detached: Vec<usize>) {
        for from in detached {
            self.pending_updates.push(ListEvent::ItemIndexUpdated {
                from: Some(from),
                to: None,
            });
        }
    }

    /// Declarations outside an open cycle are delivered right away.
    fn queue_index_update(&mut self, event: ListEvent) {
        if self.registry.is_open() {
            self.pending_updates.push(event);
        } else {
            self.bus.emit(event);
        }
    }

    fn flush_index_updates(&mut self) {
        for event in core::mem::take(&mut self.pending_updates) {
            self.bus.emit(event);
        }
    }

    fn reconcile_highlight(&mut self) {
        let count = self.registry.len();
        if self.highlight.is_pending_initial() {
            if count == 0 {
                return;
            }
            // Settled without `on_highlight` or scrolling; observers still hear about it.
            let initial = self.highlight.current();
            let index = self.highlight.set(initial, count);
            self.highlighted_value = self.value_at(index);
            ldebug!(index = ?index, "initial highlight settled");
            self.bus.emit(ListEvent::HighlightChanged(index));
            return;
        }

        let Some(current) = self.highlight.current() else {
            return;
        };

        if self.options.track_highlighted_value {
            if let Some(value) = &self.highlighted_value {
                match self.registry.index_of(value) {
                    Some(index) if index != current => {
                        ldebug!(from = current, to = index, "highlight follows moved item");
                        self.set_highlighted(Some(index));
                        return;
                    }
                    Some(_) => return,
                    None => {}
                }
            }
        }

        if current >= count {
            self.set_highlighted(None);
        } else {
            self.highlighted_value = self.value_at(Some(current));
        }
    }

    fn value_at(&self, index: Option<usize>) -> Option<V> {
        index
            .and_then(|i| self.registry.get(i))
            .map(|record| record.value.clone())
    }

    // Items

    pub fn items(&self) -> &[ItemRecord<V, E>] {
        self.registry.items()
    }

    pub fn item(&self, index: usize) -> Option<&ItemRecord<V, E>> {
        self.registry.get(index)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn index_of(&self, value: &V) -> Option<usize> {
        self.registry.index_of(value)
    }

    /// A handle for the item currently at `index`.
    pub fn handle(&self, index: usize) -> Option<ItemHandle> {
        let selected = self.is_selected(&self.registry.get(index)?.value);
        self.handle_with_selected(index, selected)
    }

    fn handle_with_selected(&self, index: usize, selected: bool) -> Option<ItemHandle> {
        let record = self.registry.get(index)?;
        Some(ItemHandle {
            id: record.id.clone(),
            index,
            selected,
            disabled: record.disabled,
            slot: self.registry.slot(index)?,
        })
    }

    // Selection

    pub fn is_selected(&self, value: &V) -> bool {
        self.options.selection.is_selected(value)
    }

    /// Requests selection of the highlighted item. No-op when nothing is highlighted.
    pub fn select_highlighted(&mut self) {
        if let Some(index) = self.highlight.current() {
            self.select_index(index);
        }
    }

    /// Calls `on_select` with the item at `index` and emits [`ListEvent::Selected`].
    pub fn select_index(&mut self, index: usize) {
        let Some(record) = self.registry.get(index) else {
            lwarn!(
                index,
                count = self.registry.len(),
                "ItemList: select of a missing item ignored"
            );
            return;
        };
        ltrace!(index, "ItemList::select_index");
        if let Some(cb) = self.options.on_select.clone() {
            cb(record, index);
        }
        self.bus.emit(ListEvent::Selected(index));
    }

    pub fn select_item(&mut self, handle: &ItemHandle) {
        if handle.disabled {
            return;
        }
        if let Some(index) = handle.current_index() {
            self.select_index(index);
        }
    }

    // Highlight

    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlight.current()
    }

    pub fn highlighted_item(&self) -> Option<&ItemRecord<V, E>> {
        self.registry.get(self.highlight.current()?)
    }

    pub fn highlighted_id(&self) -> Option<String> {
        self.highlighted_item().map(|record| record.id.clone())
    }

    /// Sets the highlighted index.
    ///
    /// Always emits [`ListEvent::HighlightChanged`] (also when the index is unchanged, which
    /// hosts use to force a refresh), then calls `on_highlight` and scrolls the item into view.
    /// An index outside the collection clears the highlight.
    pub fn set_highlighted(&mut self, index: Option<usize>) {
        let index = self.highlight.set(index, self.registry.len());
        self.highlighted_value = self.value_at(index);
        ltrace!(index = ?index, "ItemList::set_highlighted");

        self.bus.emit(ListEvent::HighlightChanged(index));

        let record = index.and_then(|i| self.registry.get(i));
        if let Some(cb) = self.options.on_highlight.clone() {
            cb(record, index);
        }
        if let (Some(scroller), Some(element)) = (
            self.scroller.as_mut(),
            record.and_then(|r| r.element.as_ref()),
        ) {
            scroller.scroll_into_view(element);
        }
    }

    /// Moves the highlight by `amount`, skipping disabled items.
    ///
    /// With nothing highlighted, a forward move starts at the first item and a backward move at
    /// the last. See [`crate::next_index`] for the exact rules.
    pub fn move_highlight(&mut self, amount: isize, options: MoveOptions) {
        let items = self.registry.items();
        let next = self
            .highlight
            .next(amount, options.contain, items.len(), |i| items[i].disabled);
        self.set_highlighted(next);
    }

    pub fn clear_highlight(&mut self) {
        self.set_highlighted(None);
    }

    /// Highlights the first enabled item.
    pub fn highlight_first(&mut self) {
        let items = self.registry.items();
        let next = next_index(None, 1, true, items.len(), |i| items[i].disabled);
        self.set_highlighted(next);
    }

    /// Highlights the last enabled item.
    pub fn highlight_last(&mut self) {
        let items = self.registry.items();
        let next = next_index(None, -1, true, items.len(), |i| items[i].disabled);
        self.set_highlighted(next);
    }

    /// Highlights the item behind `handle` unless it is disabled or no longer declared.
    pub fn highlight_item(&mut self, handle: &ItemHandle) {
        if handle.disabled {
            return;
        }
        if let Some(index) = handle.current_index() {
            self.set_highlighted(Some(index));
        }
    }

    pub fn highlight_value(&mut self, value: &V) {
        if let Some(index) = self.registry.index_of(value) {
            self.set_highlighted(Some(index));
        }
    }

    // Typeahead and keys

    /// Feeds a key to typeahead search.
    ///
    /// Accepted keys are appended to the search buffer and the first enabled item whose text
    /// starts with the buffer (case-insensitively) is highlighted. Returns
    /// [`KeyOutcome::Handled`] for every accepted key, matched or not.
    pub fn highlight_by_key(&mut self, input: &KeyInput, now_ms: u64) -> KeyOutcome {
        let Some(buffer) = self.typeahead.push(input, now_ms) else {
            return KeyOutcome::Ignored;
        };
        let query = String::from(buffer);
        self.highlight_matching(&query);
        KeyOutcome::Handled
    }

    /// Highlights the first enabled item whose text starts with `prefix`, ignoring case.
    ///
    /// Returns the matched index. Leaves the highlight alone when nothing matches.
    pub fn highlight_matching(&mut self, prefix: &str) -> Option<usize> {
        let prefix = prefix.to_lowercase();
        let index = self.registry.items().iter().position(|record| {
            !record.disabled
                && search_text(record).is_some_and(|text| text.to_lowercase().starts_with(&prefix))
        })?;
        self.set_highlighted(Some(index));
        Some(index)
    }

    /// Listbox-style key handling.
    ///
    /// ArrowDown/ArrowUp move the highlight by one (wrapping), Home/End jump to the first/last
    /// enabled item, Enter/Space select the highlighted item; anything else goes to typeahead.
    pub fn on_key(&mut self, input: &KeyInput, now_ms: u64) -> KeyOutcome {
        if !input.is_combo() {
            match input.key {
                Key::ArrowDown => self.move_highlight(1, MoveOptions::CONTAIN),
                Key::ArrowUp => self.move_highlight(-1, MoveOptions::CONTAIN),
                Key::Home => self.highlight_first(),
                Key::End => self.highlight_last(),
                Key::Enter | Key::Space => self.select_highlighted(),
                _ => return self.highlight_by_key(input, now_ms),
            }
            return KeyOutcome::Handled;
        }
        self.highlight_by_key(input, now_ms)
    }

    /// Expires the typeahead buffer once its delay has passed.
    pub fn tick(&mut self, now_ms: u64) {
        self.typeahead.tick(now_ms);
    }

    pub fn typeahead_buffer(&self) -> &str {
        self.typeahead.buffer()
    }

    // Observers

    /// Observes whether the item behind `handle` is highlighted.
    pub fn observe_highlighted(&self, handle: &ItemHandle) -> HighlightedObserver {
        HighlightedObserver::new(
            &self.bus,
            Rc::clone(&handle.slot),
            self.highlight.shared(),
            None,
        )
    }

    /// Like [`Self::observe_highlighted`], additionally calling `on_change` on every flip.
    pub fn observe_highlighted_with(
        &self,
        handle: &ItemHandle,
        on_change: impl Fn(bool) + 'static,
    ) -> HighlightedObserver {
        HighlightedObserver::new(
            &self.bus,
            Rc::clone(&handle.slot),
            self.highlight.shared(),
            Some(Rc::new(on_change)),
        )
    }

    /// Observes the id of the highlighted item.
    pub fn observe_highlighted_id(&self) -> HighlightedIdObserver {
        HighlightedIdObserver::new(&self.bus, self.ids.clone(), self.highlighted_id())
    }

    // Snapshots

    pub fn item_state(&self, index: usize) -> Option<ItemState> {
        let record = self.registry.get(index)?;
        Some(ItemState {
            id: record.id.clone(),
            index,
            highlighted: self.highlight.current() == Some(index),
            selected: self.is_selected(&record.value),
            disabled: record.disabled,
        })
    }

    pub fn item_states(&self) -> Vec<ItemState> {
        (0..self.registry.len())
            .filter_map(|i| self.item_state(i))
            .collect()
    }

    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            controller_id: String::from(self.ids.controller_id()),
            list_id: String::from(self.ids.list_id()),
            highlighted_index: self.highlight.current(),
            highlighted_id: self.highlighted_id(),
            item_count: self.registry.len(),
        }
    }

    /// Restores the highlight captured in `snapshot`.
    pub fn restore_highlight(&mut self, snapshot: &ListSnapshot) {
        self.set_highlighted(snapshot.highlighted_index);
    }
}

fn search_text<V: ItemValue, E>(record: &ItemRecord<V, E>) -> Option<Cow<'_, str>> {
    match &record.text {
        Some(text) => Some(Cow::Borrowed(text.as_str())),
        None => record.value.search_text(),
    }
}

impl<V: ItemValue + fmt::Debug, E> fmt::Debug for ItemList<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemList")
            .field("controller_id", &self.ids.controller_id())
            .field("list_id", &self.ids.list_id())
            .field("count", &self.registry.items().len())
            .field("highlighted_index", &self.highlight.current())
            .field("collecting", &self.registry.is_open())
            .field("invalidated", &self.registry.is_invalidated())
            .field("typeahead", &self.typeahead.buffer())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
