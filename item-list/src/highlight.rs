use alloc::rc::Rc;
use core::cell::Cell;

/// Read-only view of a list's highlighted index, shared with observers.
#[derive(Clone, Debug)]
pub struct HighlightedIndex(Rc<Cell<Option<usize>>>);

impl HighlightedIndex {
    pub fn get(&self) -> Option<usize> {
        self.0.get()
    }
}

/// Owns the highlighted-index state.
///
/// States are "unhighlighted" (`None`) and "highlighted at `i`". The configured initial index
/// stays pending until the collection is first populated, so a list can be created before its
/// items have declared themselves.
#[derive(Debug)]
pub struct HighlightController {
    index: Rc<Cell<Option<usize>>>,
    pending_initial: bool,
}

impl HighlightController {
    pub fn new(initial: Option<usize>) -> Self {
        Self {
            index: Rc::new(Cell::new(initial)),
            pending_initial: initial.is_some(),
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.index.get()
    }

    pub fn shared(&self) -> HighlightedIndex {
        HighlightedIndex(Rc::clone(&self.index))
    }

    pub fn is_pending_initial(&self) -> bool {
        self.pending_initial
    }

    /// Stores `index`, clamping requests outside `0..count` to `None`. Returns the stored value.
    pub fn set(&mut self, index: Option<usize>, count: usize) -> Option<usize> {
        let index = match index {
            Some(i) if i >= count => {
                lwarn!(
                    index = i,
                    count,
                    "HighlightController: out-of-range highlight request; clearing"
                );
                None
            }
            other => other,
        };
        self.pending_initial = false;
        self.index.set(index);
        index
    }

    /// Computes the index a move of `amount` lands on. See [`next_index`].
    pub fn next(
        &self,
        amount: isize,
        contain: bool,
        count: usize,
        is_disabled: impl Fn(usize) -> bool,
    ) -> Option<usize> {
        next_index(self.index.get(), amount, contain, count, is_disabled)
    }
}

/// Steps from `current` by `amount`, skipping disabled items.
///
/// - With no (or a stale) current index, the first candidate is `0` for `amount >= 0` and the
///   last index otherwise.
/// - A step that leaves `0..count` wraps with a non-negative modulo when `contain` is set and
///   yields `None` otherwise.
/// - Disabled candidates are stepped over with the same amount. At most `count` candidates are
///   visited; if none is enabled the result is `None`.
pub fn next_index(
    current: Option<usize>,
    amount: isize,
    contain: bool,
    count: usize,
    is_disabled: impl Fn(usize) -> bool,
) -> Option<usize> {
    if count == 0 {
        return None;
    }

    let mut candidate = match current {
        Some(i) if i < count => step(i, amount, contain, count)?,
        _ => {
            if amount >= 0 {
                0
            } else {
                count - 1
            }
        }
    };

    let mut visited = 1usize;
    while is_disabled(candidate) {
        if visited >= count {
            return None;
        }
        candidate = step(candidate, amount, contain, count)?;
        visited += 1;
    }
    Some(candidate)
}

fn step(from: usize, amount: isize, contain: bool, count: usize) -> Option<usize> {
    let count = count as i128;
    let next = from as i128 + amount as i128;
    if (0..count).contains(&next) {
        return Some(next as usize);
    }
    if contain {
        Some(next.rem_euclid(count) as usize)
    } else {
        None
    }
}
