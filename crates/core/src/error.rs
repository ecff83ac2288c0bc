use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("field encode error: {0}")]
    FieldEncode(String),

    #[error("field decode error: {0}")]
    FieldDecode(String),
}
