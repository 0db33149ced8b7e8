use item_list::{
    ItemHandle, ItemList, ItemListOptions, ItemValue, Key, KeyInput, KeyOutcome, ListKey,
    MoveOptions,
};

use crate::{Orientation, Pattern};

/// A framework-neutral controller that wraps an `item_list::ItemList` and maps input onto it
/// according to a widget [`Pattern`].
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `begin_cycle` / `declare_item` / `end_cycle` on the wrapped list (via `list_mut`) whenever
///   the items are rendered
/// - `on_key(input, now_ms)` for key presses; prevent the default action when it returns
///   [`KeyOutcome::Handled`]
/// - the `on_pointer_*` helpers for mouse or touch input
/// - `tick(now_ms)` on a timer, so the typeahead buffer expires without further input
pub struct Controller<V, E = ()> {
    list: ItemList<V, E>,
    pattern: Pattern,
}

impl<V: ItemValue, E> Controller<V, E> {
    pub fn new(key: impl Into<ListKey>, options: ItemListOptions<V, E>, pattern: Pattern) -> Self {
        Self::from_list(ItemList::new(key, options), pattern)
    }

    pub fn from_list(list: ItemList<V, E>, pattern: Pattern) -> Self {
        Self { list, pattern }
    }

    pub fn list(&self) -> &ItemList<V, E> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ItemList<V, E> {
        &mut self.list
    }

    pub fn into_list(self) -> ItemList<V, E> {
        self.list
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    pub fn set_pattern(&mut self, pattern: Pattern) {
        self.pattern = pattern;
    }

    /// Handles a key press.
    ///
    /// Key combinations (ctrl/alt/meta) are never handled, so host shortcuts keep working.
    pub fn on_key(&mut self, input: &KeyInput, now_ms: u64) -> KeyOutcome {
        if input.is_combo() {
            return KeyOutcome::Ignored;
        }
        let outcome = match self.pattern {
            Pattern::Grid { columns } => self.on_grid_key(input.key, columns),
            Pattern::Menu { orientation } => self.on_linear_key(input, orientation, now_ms),
            Pattern::Listbox | Pattern::Combobox => {
                self.on_linear_key(input, Orientation::Vertical, now_ms)
            }
        };
        atrace!(key = ?input.key, pattern = ?self.pattern, ?outcome, "Controller::on_key");
        outcome
    }

    fn on_linear_key(
        &mut self,
        input: &KeyInput,
        orientation: Orientation,
        now_ms: u64,
    ) -> KeyOutcome {
        let (prev, next) = orientation.arrows();
        let key = input.key;
        if key == prev {
            self.list.move_highlight(-1, MoveOptions::CONTAIN);
        } else if key == next {
            self.list.move_highlight(1, MoveOptions::CONTAIN);
        } else if self.pattern.is_select_key(key) {
            self.list.select_highlighted();
        } else if matches!(key, Key::Home | Key::End) && self.pattern != Pattern::Combobox {
            // In a combobox Home/End move the text cursor.
            if key == Key::Home {
                self.list.highlight_first();
            } else {
                self.list.highlight_last();
            }
        } else if key == Key::Escape && self.pattern != Pattern::Listbox {
            self.list.clear_highlight();
        } else if self.pattern.uses_typeahead() {
            return self.list.highlight_by_key(input, now_ms);
        } else {
            return KeyOutcome::Ignored;
        }
        KeyOutcome::Handled
    }

    fn on_grid_key(&mut self, key: Key, columns: usize) -> KeyOutcome {
        let row = isize::try_from(columns.max(1)).unwrap_or(isize::MAX);
        let delta = match key {
            Key::ArrowLeft => -1,
            Key::ArrowRight => 1,
            Key::ArrowUp => -row,
            Key::ArrowDown => row,
            Key::Enter => {
                self.list.select_highlighted();
                return KeyOutcome::Handled;
            }
            _ => return KeyOutcome::Ignored,
        };
        match self.list.highlighted_index() {
            // Positional like the list itself: stepping off the grid clears the highlight.
            Some(current) => match current.checked_add_signed(delta) {
                Some(target) if target < self.list.len() => {
                    self.list.set_highlighted(Some(target));
                }
                _ => self.list.clear_highlight(),
            },
            None => self.list.highlight_first(),
        }
        KeyOutcome::Handled
    }

    /// Expires the typeahead buffer once its delay has passed.
    pub fn tick(&mut self, now_ms: u64) {
        self.list.tick(now_ms);
    }

    /// The pointer moved over an item.
    pub fn on_pointer_enter(&mut self, handle: &ItemHandle) {
        self.list.highlight_item(handle);
    }

    /// The pointer left an item.
    pub fn on_pointer_leave(&mut self) {
        self.list.clear_highlight();
    }

    /// An item was pressed.
    pub fn on_pointer_down(&mut self, handle: &ItemHandle) {
        self.list.select_item(handle);
    }

    /// Call this when a combobox's input text changes: the highlight returns to the first
    /// result (or clears when there is none).
    pub fn reset_on_input_change(&mut self) {
        if self.list.is_empty() {
            self.list.clear_highlight();
        } else {
            self.list.set_highlighted(Some(0));
        }
    }
}

impl<V: ItemValue + core::fmt::Debug, E> core::fmt::Debug for Controller<V, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("pattern", &self.pattern)
            .field("list", &self.list)
            .finish()
    }
}
