//! Error type shared by the controller and the browser glue.

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::dom::Role;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    /// A control the feature cannot work without is absent from the page.
    #[error("required element missing: {0}")]
    MissingElement(Role),
    #[error("invalid page config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<PageError> for JsValue {
    fn from(err: PageError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type PageResult<T> = Result<T, PageError>;
