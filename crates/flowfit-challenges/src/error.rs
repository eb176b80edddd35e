use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChallengeError {
    #[error("No active challenge for {0}")]
    NotFound(String),

    #[error("Challenge already active for {0}")]
    AlreadyActive(String),

    #[error("Challenge expired for {user} (day {day_epoch})")]
    Expired { user: String, day_epoch: u64 },

    #[error("Challenge already claimed for {0}")]
    AlreadyClaimed(String),

    #[error("Invalid progress report: {0}")]
    InvalidProgress(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChallengeError>;
