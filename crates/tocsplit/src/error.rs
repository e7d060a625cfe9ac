#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Validation failed for {0} section(s)")]
    ValidationFailed(usize),
}
