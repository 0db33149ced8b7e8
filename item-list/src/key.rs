use alloc::borrow::Cow;
use alloc::string::{String, ToString};

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type ValueMap<K, T> = HashMap<K, T>;
#[cfg(not(feature = "std"))]
pub(crate) type ValueMap<K, T> = BTreeMap<K, T>;

#[cfg(feature = "std")]
#[doc(hidden)]
pub trait ValueKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> ValueKey for K {}

#[cfg(not(feature = "std"))]
#[doc(hidden)]
pub trait ValueKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> ValueKey for K {}

/// The identity of a declared item.
///
/// Values are matched across update cycles, so the same logical item must produce an equal
/// value every time it is declared. `search_text` is the string form used by typeahead when
/// an item is declared without display text.
pub trait ItemValue: Clone + ValueKey {
    fn search_text(&self) -> Option<Cow<'_, str>> {
        None
    }
}

impl ItemValue for String {
    fn search_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl ItemValue for &'static str {
    fn search_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl ItemValue for char {
    fn search_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(self.to_string()))
    }
}

impl ItemValue for bool {
    fn search_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(if *self { "true" } else { "false" }))
    }
}

macro_rules! impl_item_value_for_ints {
    ($($t:ty),* $(,)?) => {
        $(
            impl ItemValue for $t {
                fn search_text(&self) -> Option<Cow<'_, str>> {
                    Some(Cow::Owned(self.to_string()))
                }
            }
        )*
    };
}

impl_item_value_for_ints!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
