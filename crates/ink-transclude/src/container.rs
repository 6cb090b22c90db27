//! Host-owned render target.
//!
//! A [`Container`] outlives any single render. Renders started with
//! [`Container::begin_render`] receive a generation token; only the holder of
//! the newest token may commit, and nothing commits after [`Container::detach`].

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::dom::Element;

/// Generation issued to a single render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderToken(u64);

/// Render target shared between the host and in-flight renders.
///
/// Cloning is cheap and every clone refers to the same target.
#[derive(Clone, Debug)]
pub struct Container {
    inner: Arc<ContainerState>,
}

#[derive(Debug)]
struct ContainerState {
    root: Mutex<Element>,
    generation: AtomicU64,
    attached: AtomicBool,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// Create an attached, empty container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ContainerState {
                root: Mutex::new(Element::new("div")),
                generation: AtomicU64::new(0),
                attached: AtomicBool::new(true),
            }),
        }
    }

    /// Start a render. Tokens issued earlier stop being current.
    pub fn begin_render(&self) -> RenderToken {
        RenderToken(self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `token` belongs to the newest render.
    #[must_use]
    pub fn is_current(&self, token: RenderToken) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == token.0
    }

    /// Tear the container down. Later commits are ignored.
    pub fn detach(&self) {
        self.inner.attached.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.attached.load(Ordering::SeqCst)
    }

    /// Append `element` if the container is attached and `token` is current.
    ///
    /// Returns whether the element was appended.
    pub fn commit(&self, token: RenderToken, element: Element) -> bool {
        let mut root = self.inner.root.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.is_attached() || !self.is_current(token) {
            return false;
        }
        root.push_child(element);
        true
    }

    /// Snapshot of the committed elements.
    #[must_use]
    pub fn children(&self) -> Vec<Element> {
        let root = self.inner.root.lock().unwrap_or_else(PoisonError::into_inner);
        root.child_elements().cloned().collect()
    }

    /// Serialized content of the container.
    #[must_use]
    pub fn to_html(&self) -> String {
        let root = self.inner.root.lock().unwrap_or_else(PoisonError::into_inner);
        root.to_html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_current_token() {
        let container = Container::new();
        let token = container.begin_render();

        assert!(container.commit(token, Element::div("a")));
        assert_eq!(container.children().len(), 1);
        assert_eq!(container.to_html(), "<div><div class=\"a\"></div></div>");
    }

    #[test]
    fn test_stale_token_is_ignored() {
        let container = Container::new();
        let stale = container.begin_render();
        let fresh = container.begin_render();

        assert!(!container.commit(stale, Element::div("old")));
        assert!(container.commit(fresh, Element::div("new")));

        let children = container.children();
        assert_eq!(children.len(), 1);
        assert!(children[0].has_class("new"));
    }

    #[test]
    fn test_detached_ignores_commits() {
        let container = Container::new();
        let token = container.begin_render();
        container.clone().detach();

        assert!(!container.is_attached());
        assert!(!container.commit(token, Element::div("late")));
        assert!(container.children().is_empty());
    }

    #[test]
    fn test_container_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Container>();
    }
}
