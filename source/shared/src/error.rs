use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Invalid worker parameters: {0}")]
    Params(String),
    #[error("Messaging platform rejected setup: {0}")]
    Platform(String),
    #[error("Messaging client already initialized with a different configuration")]
    AlreadyInitialized,
    #[error("Messaging client not initialized")]
    NotInitialized,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedPayloadError {
    #[error("Payload doesn't match expected format: {0}")]
    Decode(String),
    #[error("Payload has no notification section")]
    MissingNotification,
    #[error("Payload notification has no title")]
    MissingTitle,
    #[error("Payload notification has no body")]
    MissingBody,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Error showing notification: {0}")]
pub struct DisplayError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    MalformedPayload(#[from] MalformedPayloadError),
    #[error(transparent)]
    Display(#[from] DisplayError),
}
