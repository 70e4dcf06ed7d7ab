//! Cursor follower: a marker that eases toward the mouse every frame.

use crate::dom::{Dom, Role};
use crate::frame::FrameTask;

pub const MARKER_CLASS: &str = "cursor-trail";

/// Styles injected at start: the follower marker and the collapsible
/// navigation menu for narrow viewports.
pub const PAGE_STYLES: &str = r#"
.cursor-trail {
    position: fixed;
    width: 20px;
    height: 20px;
    border-radius: 50%;
    background: radial-gradient(circle, rgba(102, 126, 234, 0.3) 0%, rgba(118, 75, 162, 0.1) 100%);
    pointer-events: none;
    z-index: 9999;
    transition: transform 0.2s ease;
    mix-blend-mode: screen;
}

@media (max-width: 968px) {
    .cursor-trail {
        display: none;
    }

    .nav-menu {
        position: fixed;
        top: 70px;
        left: 0;
        right: 0;
        background: var(--glass-bg);
        backdrop-filter: blur(20px);
        border-bottom: 1px solid var(--glass-border);
        flex-direction: column;
        padding: var(--spacing-lg);
        transform: translateY(-100%);
        opacity: 0;
        transition: all var(--transition-base);
        box-shadow: var(--shadow-lg);
    }

    .nav-menu.active {
        transform: translateY(0);
        opacity: 1;
    }

    .nav-menu li {
        width: 100%;
    }

    .nav-link {
        display: block;
        padding: var(--spacing-md);
        text-align: center;
    }
}
"#;

/// Exponentially smoothed position chasing the raw mouse position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Follower {
    pub mouse: (f64, f64),
    pub pos: (f64, f64),
    pub ease: f64,
}

impl Follower {
    pub fn new(ease: f64) -> Self {
        Self {
            ease,
            ..Default::default()
        }
    }

    pub fn on_mouse_move(&mut self, x: f64, y: f64) {
        self.mouse = (x, y);
    }

    /// Covers `ease` of the remaining distance and returns the new position.
    pub fn step(&mut self) -> (f64, f64) {
        self.pos.0 += (self.mouse.0 - self.pos.0) * self.ease;
        self.pos.1 += (self.mouse.1 - self.pos.1) * self.ease;
        self.pos
    }
}

pub fn hover_transform(hovering: bool, scale: f64) -> String {
    format!("scale({})", if hovering { scale } else { 1.0 })
}

/// Injects the page stylesheet and creates the marker element.
pub fn install<D: Dom>(dom: &mut D) -> Option<D::Node> {
    if let Some(head) = dom.query(Role::Head) {
        if let Some(style) = dom.append_element(&head, "style") {
            dom.set_text(&style, PAGE_STYLES);
        }
    }
    let body = dom.query(Role::Body)?;
    let marker = dom.append_element(&body, "div")?;
    dom.set_attribute(&marker, "class", MARKER_CLASS);
    Some(marker)
}

/// Follower bound to its marker element. Frames paint through the `Dom`
/// handed to [`CursorTrail::paint`], so the trail itself stays DOM-agnostic
/// when stepped as a [`FrameTask`].
pub struct CursorTrail<N> {
    pub follower: Follower,
    pub marker: N,
    hover_scale: f64,
}

impl<N: Clone> CursorTrail<N> {
    pub fn new(marker: N, ease: f64, hover_scale: f64) -> Self {
        Self {
            follower: Follower::new(ease),
            marker,
            hover_scale,
        }
    }

    pub fn paint<D: Dom<Node = N>>(&self, dom: &mut D) {
        let (x, y) = self.follower.pos;
        dom.set_style(&self.marker, "left", &format!("{x}px"));
        dom.set_style(&self.marker, "top", &format!("{y}px"));
    }

    pub fn hover<D: Dom<Node = N>>(&self, dom: &mut D, hovering: bool) {
        dom.set_style(
            &self.marker,
            "transform",
            &hover_transform(hovering, self.hover_scale),
        );
    }
}

impl<N: Clone> FrameTask for CursorTrail<N> {
    fn frame(&mut self, _now_ms: f64) {
        self.follower.step();
    }
}
