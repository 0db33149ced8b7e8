use alloc::rc::Rc;
use core::fmt;

/// Where an item's selected state comes from.
///
/// The controller never stores selection: it asks this source on every declaration and only
/// signals selection intent through `on_select` / [`crate::ListEvent::Selected`]. Hosts that
/// keep a set of selected values typically use a [`Selection::Predicate`] over that set.
pub enum Selection<V> {
    None,
    Value(V),
    Predicate(Rc<dyn Fn(&V) -> bool>),
}

impl<V: PartialEq> Selection<V> {
    pub fn predicate(f: impl Fn(&V) -> bool + 'static) -> Self {
        Self::Predicate(Rc::new(f))
    }

    pub fn is_selected(&self, value: &V) -> bool {
        match self {
            Self::None => false,
            Self::Value(selected) => selected == value,
            Self::Predicate(f) => f(value),
        }
    }
}

impl<V> Default for Selection<V> {
    fn default() -> Self {
        Self::None
    }
}

impl<V: Clone> Clone for Selection<V> {
    fn clone(&self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Value(v) => Self::Value(v.clone()),
            Self::Predicate(f) => Self::Predicate(Rc::clone(f)),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Selection<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl<V> From<Option<V>> for Selection<V> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::None,
        }
    }
}
