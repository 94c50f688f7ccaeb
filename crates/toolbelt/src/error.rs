#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Dispatch failed: {0}")]
    Dispatch(String),

    #[error("Failed to read input: {0}")]
    Input(String),
}

impl From<toolbelt_core::DispatchError> for Error {
    fn from(err: toolbelt_core::DispatchError) -> Self {
        Error::Dispatch(err.to_string())
    }
}

impl From<toolbelt_core::UnknownTool> for Error {
    fn from(err: toolbelt_core::UnknownTool) -> Self {
        Error::UnknownTool(err.0)
    }
}
