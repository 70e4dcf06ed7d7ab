//! Portfolio Motion core crate.
//!
//! Page behaviours for a static portfolio site compiled to WebAssembly:
//! persisted theme / language toggles, the responsive navigation menu,
//! scroll reveal and parallax, a particle canvas background, a cursor
//! follower, skill-bar fills and card tilt. Everything except the `web`
//! module runs against the [`dom::Dom`] abstraction and is testable natively.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod counter;
pub mod cursor;
pub mod dom;
pub mod effects;
pub mod error;
pub mod frame;
pub mod nav;
pub mod page;
pub mod particles;
pub mod prefs;
pub mod scroll;
pub mod timeline;
pub mod web;

pub use config::PageConfig;
pub use error::{PageError, PageResult};
pub use page::{PageController, Viewport};
pub use prefs::{Language, Theme};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Wires every behaviour onto the current document with the stock settings.
#[wasm_bindgen]
pub fn start_page() -> Result<(), JsValue> {
    web::start(PageConfig::default())?;
    Ok(())
}

/// Same as [`start_page`] with tuning overrides given as a JSON object.
#[wasm_bindgen]
pub fn start_page_with_config(json: &str) -> Result<(), JsValue> {
    let config = PageConfig::from_json(json)?;
    web::start(config)?;
    Ok(())
}

/// Counts the text of `#element_id` up from zero to `target`.
#[wasm_bindgen]
pub fn animate_number(element_id: &str, target: f64, duration_ms: Option<f64>) -> Result<(), JsValue> {
    web::animate_number(element_id, target, duration_ms.unwrap_or(2000.0))?;
    Ok(())
}

/// Stops the particle and cursor frame loops.
#[wasm_bindgen]
pub fn stop_animations() {
    web::stop_animations();
}
