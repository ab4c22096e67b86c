use wasm_bindgen::JsValue;

/// Setup failures of the browser side. The engine itself never fails; once
/// a viewer is running, per-event problems are logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum LightboxError {
    #[error("no global window")]
    NoWindow,
    #[error("element not found: {0}")]
    MissingElement(String),
    #[error("JS error: {0}")]
    Js(String),
    #[error("invalid viewer config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("logger already initialised")]
    Logger,
}

impl From<JsValue> for LightboxError {
    fn from(value: JsValue) -> Self {
        LightboxError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
