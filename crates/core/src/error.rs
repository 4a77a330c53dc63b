#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("User already owns this {kind}: {id}")]
    AlreadyOwned { kind: &'static str, id: String },

    #[error("Not enough money: cost {cost}, balance {balance}")]
    InsufficientFunds { cost: i64, balance: i64 },

    #[error("Text generation failed: {0}")]
    UpstreamGeneration(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
