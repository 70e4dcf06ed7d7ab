//! Particle canvas appended to the animated background container.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::dom::{Dom, Role};
use crate::error::{PageError, PageResult};
use crate::particles::Surface;

use super::dom::WebDom;

const CANVAS_STYLE: &str = "position:fixed; top:0; left:0; width:100%; height:100%; z-index:-1; pointer-events:none;";

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Creates the canvas inside `.animated-bg`; `Ok(None)` when the page has
    /// no such container.
    pub fn attach(dom: &WebDom) -> PageResult<Option<Self>> {
        let Some(container) = dom.query(Role::AnimatedBackground) else {
            return Ok(None);
        };
        let canvas: HtmlCanvasElement = dom
            .document()
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| PageError::Js("created element is not a canvas".to_string()))?;
        canvas.set_attribute("style", CANVAS_STYLE)?;
        container.append_child(&canvas)?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .and_then(|ctx| ctx.dyn_into().ok())
            .ok_or_else(|| PageError::Js("2d context unavailable".to_string()))?;
        Ok(Some(Self { canvas, ctx }))
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.begin_path();
        self.ctx
            .arc(x, y, radius, 0.0, std::f64::consts::TAU)
            .ok();
        self.ctx.fill();
    }
}
