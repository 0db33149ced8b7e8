use alloc::rc::Rc;
use core::cell::RefCell;

/// The host's element tree, as far as scrolling needs it.
///
/// Positions follow the usual layout conventions: `top` is the element's top edge relative to
/// the root viewport (negative when scrolled past), `scroll_offset` is how far a container is
/// scrolled.
pub trait ScrollHost {
    type Element: Clone;

    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Whether `element` is the document root. The root always counts as scrollable and its
    /// visible window starts at the top of the viewport.
    fn is_root(&self, element: &Self::Element) -> bool;

    fn content_height(&self, element: &Self::Element) -> u64;

    fn visible_height(&self, element: &Self::Element) -> u32;

    fn scroll_offset(&self, element: &Self::Element) -> u64;

    fn top(&self, element: &Self::Element) -> i64;

    fn height(&self, element: &Self::Element) -> u32;

    fn set_scroll_offset(&mut self, element: &Self::Element, offset: u64);
}

impl<H: ScrollHost> ScrollHost for Rc<RefCell<H>> {
    type Element = H::Element;

    fn parent(&self, element: &Self::Element) -> Option<Self::Element> {
        self.borrow().parent(element)
    }

    fn is_root(&self, element: &Self::Element) -> bool {
        self.borrow().is_root(element)
    }

    fn content_height(&self, element: &Self::Element) -> u64 {
        self.borrow().content_height(element)
    }

    fn visible_height(&self, element: &Self::Element) -> u32 {
        self.borrow().visible_height(element)
    }

    fn scroll_offset(&self, element: &Self::Element) -> u64 {
        self.borrow().scroll_offset(element)
    }

    fn top(&self, element: &Self::Element) -> i64 {
        self.borrow().top(element)
    }

    fn height(&self, element: &Self::Element) -> u32 {
        self.borrow().height(element)
    }

    fn set_scroll_offset(&mut self, element: &Self::Element, offset: u64) {
        self.borrow_mut().set_scroll_offset(element, offset);
    }
}

/// The visible window of a scroll container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollContainer<T> {
    pub element: T,
    /// Top edge of the visible window relative to the viewport.
    pub window_top: i64,
    pub scroll_offset: u64,
    pub visible_height: u32,
}

/// Finds the nearest ancestor of `element` whose content overflows, falling back to the root.
///
/// The search starts at the parent; `element` itself is never its own container.
pub fn closest_scroll_container<H: ScrollHost>(
    host: &H,
    element: &H::Element,
) -> Option<ScrollContainer<H::Element>> {
    let mut node = host.parent(element);
    while let Some(current) = node {
        if host.is_root(&current) {
            return Some(ScrollContainer {
                scroll_offset: host.scroll_offset(&current),
                visible_height: host.visible_height(&current),
                window_top: 0,
                element: current,
            });
        }
        if host.content_height(&current) > u64::from(host.visible_height(&current)) {
            return Some(ScrollContainer {
                window_top: host.top(&current),
                scroll_offset: host.scroll_offset(&current),
                visible_height: host.visible_height(&current),
                element: current,
            });
        }
        node = host.parent(&current);
    }
    None
}

/// Computes the offset that brings an item into a container's window, if it is not fully
/// visible already.
///
/// `item_top` is relative to the viewport. An item above the window is aligned to the window's
/// top; an item below is aligned to its bottom.
pub fn scroll_offset_into_view(
    container_window_top: i64,
    container_offset: u64,
    container_height: u32,
    item_top: i64,
    item_height: u32,
) -> Option<u64> {
    let offset = i128::from(container_offset);
    let view = i128::from(container_height);
    let height = i128::from(item_height);
    let start = offset + (i128::from(item_top) - i128::from(container_window_top));
    let end = start + height;

    let target = if start < offset {
        start
    } else if end > offset + view {
        end - view
    } else {
        return None;
    };
    Some(target.clamp(0, i128::from(u64::MAX)) as u64)
}

/// Scrolls the nearest scroll container of `element` so the element is visible.
///
/// Returns the new scroll offset, or `None` when nothing had to move.
pub fn scroll_into_view<H: ScrollHost>(host: &mut H, element: &H::Element) -> Option<u64> {
    let container = closest_scroll_container(host, element)?;
    let target = scroll_offset_into_view(
        container.window_top,
        container.scroll_offset,
        container.visible_height,
        host.top(element),
        host.height(element),
    )?;
    if target == container.scroll_offset {
        return None;
    }
    ltrace!(offset = target, "scroll_into_view");
    host.set_scroll_offset(&container.element, target);
    Some(target)
}

/// Something that can bring a highlighted element into view.
pub trait ScrollIntoView<E> {
    fn scroll_into_view(&mut self, element: &E) -> Option<u64>;
}

/// Keeps the highlighted item visible inside its nearest scrollable ancestor.
///
/// Install it with [`crate::ItemList::set_scroll_synchronizer`]; the list calls it on every
/// highlight change whose item has an element.
#[derive(Debug)]
pub struct ScrollSynchronizer<H> {
    host: H,
}

impl<H: ScrollHost> ScrollSynchronizer<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}

impl<H: ScrollHost> ScrollIntoView<H::Element> for ScrollSynchronizer<H> {
    fn scroll_into_view(&mut self, element: &H::Element) -> Option<u64> {
        scroll_into_view(&mut self.host, element)
    }
}

impl<E, F: FnMut(&E) -> Option<u64>> ScrollIntoView<E> for F {
    fn scroll_into_view(&mut self, element: &E) -> Option<u64> {
        self(element)
    }
}
