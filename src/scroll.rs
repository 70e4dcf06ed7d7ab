//! Scroll-linked effects: one-shot reveal subscriptions and hero parallax.

use crate::dom::{Dom, Role};

pub const REVEAL_PENDING: &str = "scroll-reveal";
pub const REVEAL_ACTIVE: &str = "active";

/// Set of watched elements that each fire at most once.
///
/// Feed it intersection entries; an element that is intersecting is yielded
/// exactly once and dropped from the watch set, later entries for it are
/// ignored.
#[derive(Debug)]
pub struct OnceObserver<N> {
    watched: Vec<N>,
}

impl<N> Default for OnceObserver<N> {
    fn default() -> Self {
        Self {
            watched: Vec::new(),
        }
    }
}

impl<N: Clone + PartialEq> OnceObserver<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, node: N) {
        if !self.watched.contains(&node) {
            self.watched.push(node);
        }
    }

    pub fn watched(&self) -> &[N] {
        &self.watched
    }

    pub fn is_watching(&self, node: &N) -> bool {
        self.watched.contains(node)
    }

    pub fn len(&self) -> usize {
        self.watched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watched.is_empty()
    }

    /// Returns the elements that became visible for the first time.
    pub fn take_visible<I>(&mut self, entries: I) -> Vec<N>
    where
        I: IntoIterator<Item = (N, bool)>,
    {
        let mut fired = Vec::new();
        for (node, intersecting) in entries {
            if !intersecting {
                continue;
            }
            if let Some(pos) = self.watched.iter().position(|n| *n == node) {
                fired.push(self.watched.swap_remove(pos));
            }
        }
        fired
    }
}

/// Tags every reveal target as pending and subscribes it.
pub fn init_reveal<D: Dom>(dom: &mut D) -> OnceObserver<D::Node> {
    let mut observer = OnceObserver::new();
    for el in dom.query_all(Role::RevealTarget) {
        dom.add_class(&el, REVEAL_PENDING);
        observer.observe(el);
    }
    observer
}

pub fn reveal<D: Dom>(dom: &mut D, nodes: &[D::Node]) {
    for node in nodes {
        dom.add_class(node, REVEAL_ACTIVE);
    }
}

pub fn parallax_offset(scroll: f64, speed: f64) -> f64 {
    scroll * speed
}

pub fn apply_parallax<D: Dom>(dom: &mut D, hero: &D::Node, scroll: f64, speed: f64) {
    let y = parallax_offset(scroll, speed);
    dom.set_style(hero, "transform", &format!("translateY({y}px)"));
}
