//! Crate error type
//!
//! Only page setup can fail. Per-frame drawing and gate transitions are
//! infallible; persistence failures are reported here and then swallowed by
//! the best-effort callers.

use thiserror::Error;

/// Errors raised while wiring the page or touching browser storage.
#[derive(Debug, Error)]
pub enum Error {
    /// No global `window` (not running in a browser main thread).
    #[error("no window available")]
    NoWindow,

    /// `window.document` missing.
    #[error("no document available")]
    NoDocument,

    /// No element with the given id.
    #[error("element #{0} not found")]
    MissingElement(String),

    /// Element exists but is not the expected kind.
    #[error("element #{id} is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },

    /// `getContext("2d")` returned nothing.
    #[error("canvas 2d context unavailable")]
    NoContext,

    /// LocalStorage access failed or is disabled.
    #[error("storage error: {0}")]
    Storage(String),

    /// Inline configuration could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// A JavaScript exception crossing the wasm boundary.
    #[error("javascript error: {0}")]
    Js(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Error::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::MissingElement("accessBtn".into()).to_string(),
            "element #accessBtn not found"
        );
        let err = Error::WrongElementType {
            id: "particleCanvas".into(),
            expected: "canvas",
        };
        assert_eq!(err.to_string(), "element #particleCanvas is not a canvas");
    }

    #[test]
    fn test_config_error_from_json() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("nope");
        let err: Error = parse.unwrap_err().into();
        assert!(err.to_string().starts_with("invalid config"));
    }
}
