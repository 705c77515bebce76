use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Missing required fields.")]
    MissingFields,

    #[error("Payload must be a JSON object, got {0}")]
    InvalidPayload(&'static str),

    #[error("Field {0} must be a string")]
    InvalidFieldType(String),
}
