use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A load row is missing a required field, fails to parse, or repeats an
    /// id. `row` is the 1-based position of the row in its input sequence.
    #[error("data integrity error in {entity} row {row}: {reason}")]
    DataIntegrity {
        entity: &'static str,
        row: usize,
        reason: String,
    },

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("invalid geohash precision {0}; must be between 1 and 12")]
    InvalidPrecision(usize),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
