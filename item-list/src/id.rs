use alloc::format;
use alloc::string::String;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// The key a list's ids are derived from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListKey {
    Number(u64),
    Name(String),
}

impl fmt::Display for ListKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<u64> for ListKey {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for ListKey {
    fn from(value: String) -> Self {
        Self::Name(value)
    }
}

impl From<&str> for ListKey {
    fn from(value: &str) -> Self {
        Self::Name(String::from(value))
    }
}

/// A monotonically increasing source of list keys.
///
/// Own one at your application's composition root and hand it to every list you mount; lists
/// created from the same source never share ids. Tests can build isolated sources and get
/// deterministic ids.
#[derive(Debug, Default)]
pub struct IdSource {
    next: AtomicU64,
}

impl IdSource {
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    pub fn next(&self) -> ListKey {
        ListKey::Number(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// The key the next call to [`Self::next`] will hand out.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

/// Accessibility ids for one list instance.
///
/// `controller_id` and `list_id` are stable for the lifetime of the list. Item ids are
/// positional: an item that moves to another index gets that index's id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListIds {
    key: ListKey,
    controller_id: String,
    list_id: String,
}

impl ListIds {
    pub fn new(key: impl Into<ListKey>) -> Self {
        let key = key.into();
        Self {
            controller_id: format!("controller-{key}"),
            list_id: format!("list-{key}"),
            key,
        }
    }

    pub fn key(&self) -> &ListKey {
        &self.key
    }

    pub fn controller_id(&self) -> &str {
        &self.controller_id
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn item_id(&self, index: usize) -> String {
        format!("{}-item-{index}", self.list_id)
    }
}
