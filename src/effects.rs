//! One-shot page effects: skill bar fill, hero title reveal, card tilt and
//! the page-loaded marker.

use crate::dom::{Dom, Role};

/// Work deferred by an effect, applied once its delay elapses.
#[derive(Clone, Debug, PartialEq)]
pub enum Deferred<N> {
    RestoreWidth { node: N, width: String },
    RestoreMarkup { node: N, markup: String },
}

impl<N> Deferred<N> {
    pub fn apply<D: Dom<Node = N>>(self, dom: &mut D) {
        match self {
            Deferred::RestoreWidth { node, width } => dom.set_style(&node, "width", &width),
            Deferred::RestoreMarkup { node, markup } => dom.set_markup(&node, &markup),
        }
    }
}

/// Captures the bar's inline width and collapses it to zero; the returned
/// task grows it back.
pub fn start_fill<D: Dom>(dom: &mut D, bar: &D::Node) -> Deferred<D::Node> {
    let width = dom.style(bar, "width");
    dom.set_style(bar, "width", "0%");
    Deferred::RestoreWidth {
        node: bar.clone(),
        width,
    }
}

/// Hides the hero title's content; the returned task puts it back unchanged.
pub fn hide_title<D: Dom>(dom: &mut D) -> Option<Deferred<D::Node>> {
    let title = dom.query(Role::HeroTitle)?;
    let markup = dom.markup(&title);
    dom.set_markup(&title, "");
    dom.set_style(&title, "opacity", "1");
    Some(Deferred::RestoreMarkup {
        node: title,
        markup,
    })
}

pub fn mark_loaded<D: Dom>(dom: &mut D) {
    if let Some(body) = dom.query(Role::Body) {
        dom.add_class(&body, "loaded");
    }
}

/// Card box in client coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct Tilt {
    pub damping: f64,
    pub lift_px: f64,
    pub perspective_px: f64,
}

impl Tilt {
    /// (rotateX, rotateY) in degrees for a pointer at client (x, y).
    pub fn angles(&self, rect: Rect, x: f64, y: f64) -> (f64, f64) {
        let local_x = x - rect.left;
        let local_y = y - rect.top;
        let rotate_x = (local_y - rect.height / 2.0) / self.damping;
        let rotate_y = (rect.width / 2.0 - local_x) / self.damping;
        (rotate_x, rotate_y)
    }

    pub fn transform(&self, rect: Rect, x: f64, y: f64) -> String {
        let (rx, ry) = self.angles(rect, x, y);
        format!(
            "perspective({}px) rotateX({rx}deg) rotateY({ry}deg) translateY(-{}px)",
            self.perspective_px, self.lift_px
        )
    }

    pub fn rest(&self) -> String {
        format!(
            "perspective({}px) rotateX(0) rotateY(0) translateY(0)",
            self.perspective_px
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDom;

    fn tilt() -> Tilt {
        Tilt {
            damping: 10.0,
            lift_px: 5.0,
            perspective_px: 1000.0,
        }
    }

    #[test]
    fn test_fill_collapses_then_restores() {
        let mut dom = MemoryDom::new();
        let bar = dom.append(MemoryDom::BODY, "div.progress-fill");
        dom.set_style(&bar, "width", "85%");
        let task = start_fill(&mut dom, &bar);
        assert_eq!(dom.style(&bar, "width"), "0%");
        task.apply(&mut dom);
        assert_eq!(dom.style(&bar, "width"), "85%");
    }

    #[test]
    fn test_title_restored_verbatim() {
        let mut dom = MemoryDom::new();
        let title = dom.append(MemoryDom::BODY, "h1.hero-title");
        let html = "Hi, I'm <span class=\"gradient\">Best</span>";
        dom.set_markup(&title, html);
        let task = hide_title(&mut dom).unwrap();
        assert_eq!(dom.markup(&title), "");
        assert_eq!(dom.style(&title, "opacity"), "1");
        task.apply(&mut dom);
        assert_eq!(dom.markup(&title), html);
    }

    #[test]
    fn test_no_title_no_task() {
        let mut dom = MemoryDom::new();
        assert!(hide_title(&mut dom).is_none());
    }

    #[test]
    fn test_tilt_angles_relative_to_center() {
        let rect = Rect {
            left: 100.0,
            top: 50.0,
            width: 300.0,
            height: 200.0,
        };
        assert_eq!(tilt().angles(rect, 250.0, 150.0), (0.0, 0.0));
        assert_eq!(tilt().angles(rect, 100.0, 50.0), (-10.0, 15.0));
        assert_eq!(
            tilt().transform(rect, 400.0, 250.0),
            "perspective(1000px) rotateX(10deg) rotateY(-15deg) translateY(-5px)"
        );
        assert_eq!(
            tilt().rest(),
            "perspective(1000px) rotateX(0) rotateY(0) translateY(0)"
        );
    }

    #[test]
    fn test_mark_loaded() {
        let mut dom = MemoryDom::new();
        mark_loaded(&mut dom);
        assert!(dom.has_class(&MemoryDom::BODY, "loaded"));
    }
}
