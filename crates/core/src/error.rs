use thiserror::Error;

pub type AudienceResult<T> = Result<T, AudienceError>;

#[derive(Error, Debug)]
pub enum AudienceError {
    #[error("Cannot obtain audience list without an ad account selected")]
    MissingAdAccount,

    #[error("Missing state_url parameter for login form")]
    MissingStateUrl,

    #[error("Payload encryption error: {0}")]
    Encryption(String),

    #[error("Payload decryption error: {0}")]
    Decryption(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid OAuth URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}
