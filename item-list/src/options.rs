use alloc::rc::Rc;

use crate::typeahead::DEFAULT_TYPEAHEAD_DELAY_MS;
use crate::{ItemRecord, Selection};

/// A callback fired after every highlight change, with the highlighted record (if any).
pub type OnHighlightCallback<V, E> = Rc<dyn Fn(Option<&ItemRecord<V, E>>, Option<usize>)>;

/// A callback fired when selection of an item is requested.
pub type OnSelectCallback<V, E> = Rc<dyn Fn(&ItemRecord<V, E>, usize)>;

/// A callback fired once per cycle when the collection is invalidated and must be redeclared.
pub type OnInvalidateCallback = Rc<dyn Fn()>;

/// Configuration for [`crate::ItemList`].
///
/// Callbacks are stored in `Rc`s, so cloning options to tweak a field is cheap.
pub struct ItemListOptions<V, E = ()> {
    /// Highlighted index before any input. `None` starts unhighlighted.
    pub initial_highlighted_index: Option<usize>,
    pub selection: Selection<V>,
    pub on_highlight: Option<OnHighlightCallback<V, E>>,
    pub on_select: Option<OnSelectCallback<V, E>>,
    pub on_invalidate: Option<OnInvalidateCallback>,
    /// How long the typeahead buffer survives without input.
    pub typeahead_delay_ms: u64,
    /// Let the highlight follow the highlighted item's value when a cycle moves it to another
    /// index. When off, the highlight is purely positional.
    pub track_highlighted_value: bool,
}

impl<V, E> ItemListOptions<V, E> {
    pub fn new() -> Self {
        Self {
            initial_highlighted_index: Some(0),
            selection: Selection::None,
            on_highlight: None,
            on_select: None,
            on_invalidate: None,
            typeahead_delay_ms: DEFAULT_TYPEAHEAD_DELAY_MS,
            track_highlighted_value: true,
        }
    }

    pub fn with_initial_highlighted_index(mut self, index: Option<usize>) -> Self {
        self.initial_highlighted_index = index;
        self
    }

    pub fn with_selection(mut self, selection: Selection<V>) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_selected_value(mut self, value: V) -> Self {
        self.selection = Selection::Value(value);
        self
    }

    pub fn with_selected_predicate(mut self, f: impl Fn(&V) -> bool + 'static) -> Self {
        self.selection = Selection::Predicate(Rc::new(f));
        self
    }

    pub fn with_on_highlight(
        mut self,
        on_highlight: Option<impl Fn(Option<&ItemRecord<V, E>>, Option<usize>) + 'static>,
    ) -> Self {
        self.on_highlight = on_highlight.map(|f| Rc::new(f) as _);
        self
    }

    pub fn with_on_select(
        mut self,
        on_select: Option<impl Fn(&ItemRecord<V, E>, usize) + 'static>,
    ) -> Self {
        self.on_select = on_select.map(|f| Rc::new(f) as _);
        self
    }

    pub fn with_on_invalidate(mut self, on_invalidate: Option<impl Fn() + 'static>) -> Self {
        self.on_invalidate = on_invalidate.map(|f| Rc::new(f) as _);
        self
    }

    pub fn with_typeahead_delay_ms(mut self, delay_ms: u64) -> Self {
        self.typeahead_delay_ms = delay_ms;
        self
    }

    pub fn with_track_highlighted_value(mut self, track: bool) -> Self {
        self.track_highlighted_value = track;
        self
    }
}

impl<V, E> Default for ItemListOptions<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone, E> Clone for ItemListOptions<V, E> {
    fn clone(&self) -> Self {
        Self {
            initial_highlighted_index: self.initial_highlighted_index,
            selection: self.selection.clone(),
            on_highlight: self.on_highlight.clone(),
            on_select: self.on_select.clone(),
            on_invalidate: self.on_invalidate.clone(),
            typeahead_delay_ms: self.typeahead_delay_ms,
            track_highlighted_value: self.track_highlighted_value,
        }
    }
}

impl<V: core::fmt::Debug, E> core::fmt::Debug for ItemListOptions<V, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemListOptions")
            .field("initial_highlighted_index", &self.initial_highlighted_index)
            .field("selection", &self.selection)
            .field("on_highlight", &self.on_highlight.is_some())
            .field("on_select", &self.on_select.is_some())
            .field("on_invalidate", &self.on_invalidate.is_some())
            .field("typeahead_delay_ms", &self.typeahead_delay_ms)
            .field("track_highlighted_value", &self.track_highlighted_value)
            .finish()
    }
}
