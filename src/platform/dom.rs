//! DOM lookup and navigation helpers

use wasm_bindgen::JsCast;
use web_sys::{Document, Window};

use crate::error::{Error, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(Error::NoWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(Error::NoDocument)
}

/// Fetch `#id` and cast it to the expected element type
pub fn element_by_id<T: JsCast>(document: &Document, id: &str, expected: &'static str) -> Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| Error::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| Error::WrongElementType {
            id: id.to_string(),
            expected,
        })
}

/// Point the browser at `url`
pub fn navigate(url: &str) -> Result<()> {
    window()?.location().set_href(url)?;
    Ok(())
}
