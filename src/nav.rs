//! Navigation bar: collapsible menu, scrolled state and anchor scrolling.

use crate::dom::{Dom, Role};
use crate::error::{PageError, PageResult};

const ACTIVE: &str = "active";
const SCROLLED: &str = "scrolled";

/// Per-bar (transform, opacity) while the menu is open; bars form an "X".
const OPEN_BARS: [(&str, &str); 3] = [
    ("rotate(45deg) translateY(10px)", "1"),
    ("none", "0"),
    ("rotate(-45deg) translateY(-10px)", "1"),
];

/// Collapsible menu bound to its toggle control and panel.
pub struct Menu<N> {
    toggle: N,
    panel: N,
    bars: Vec<N>,
    open: bool,
}

impl<N: Clone + PartialEq> Menu<N> {
    /// Both the toggle and the panel are required.
    pub fn bind<D: Dom<Node = N>>(dom: &D) -> PageResult<Self> {
        let toggle = dom
            .query(Role::MenuToggle)
            .ok_or(PageError::MissingElement(Role::MenuToggle))?;
        let panel = dom
            .query(Role::NavMenu)
            .ok_or(PageError::MissingElement(Role::NavMenu))?;
        let bars = dom.query_within(&toggle, Role::MenuBar);
        Ok(Self {
            toggle,
            panel,
            bars,
            open: false,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle<D: Dom<Node = N>>(&mut self, dom: &mut D) {
        dom.toggle_class(&self.panel, ACTIVE);
        self.open = dom.toggle_class(&self.toggle, ACTIVE);
        self.paint_bars(dom);
    }

    /// Link activation: collapse the menu on narrow viewports.
    pub fn on_link<D: Dom<Node = N>>(&mut self, dom: &mut D, viewport_width: f64, breakpoint: f64) {
        if viewport_width > breakpoint {
            return;
        }
        dom.remove_class(&self.panel, ACTIVE);
        dom.remove_class(&self.toggle, ACTIVE);
        self.open = false;
        self.paint_bars(dom);
    }

    fn paint_bars<D: Dom<Node = N>>(&self, dom: &mut D) {
        for (i, bar) in self.bars.iter().take(OPEN_BARS.len()).enumerate() {
            let (transform, opacity) = if self.open {
                OPEN_BARS[i]
            } else {
                ("none", "1")
            };
            dom.set_style(bar, "transform", transform);
            dom.set_style(bar, "opacity", opacity);
        }
    }
}

pub fn is_scrolled(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

pub fn apply_scrolled<D: Dom>(dom: &mut D, navbar: &D::Node, offset: f64, threshold: f64) {
    if is_scrolled(offset, threshold) {
        dom.add_class(navbar, SCROLLED);
    } else {
        dom.remove_class(navbar, SCROLLED);
    }
}

/// Scroll position for an in-page `#id` link, or `None` when there is no
/// such target.
pub fn anchor_target<D: Dom>(dom: &D, href: &str, offset: f64) -> Option<f64> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        return None;
    }
    let target = dom.by_id(id)?;
    Some(dom.offset_top(&target) - offset)
}
