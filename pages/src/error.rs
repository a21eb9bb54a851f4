use happyshop_core::FieldErrors;

/// Why a page refused to dispatch.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FieldErrors),

    #[error("Form payload does not match the action input: {source}")]
    Malformed { source: serde_json::Error },

    #[error("Product is not loaded yet")]
    NotLoaded,

    #[error("No order is being edited")]
    NoSelection,
}
