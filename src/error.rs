//! Error types for the simulation engine

use thiserror::Error;

/// Errors raised while validating inputs or exporting results
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A parameter is outside its allowed domain
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// A modular loan was requested without a repayment schedule
    #[error("modular loan requires a repayment schedule")]
    MissingSchedule,

    /// API dispatch on an operation name that does not exist
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SimulationError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input (maps to HTTP 400)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SimulationError::InvalidParameter { .. }
                | SimulationError::MissingSchedule
                | SimulationError::UnknownOperation(_)
                | SimulationError::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;

/// Reject NaN and infinities
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::invalid(field, format!("must be finite, got {}", value)))
    }
}

/// Reject negative (and non-finite) values
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<()> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(SimulationError::invalid(field, format!("must be >= 0, got {}", value)));
    }
    Ok(())
}

/// Reject zero, negative and non-finite values
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<()> {
    ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(SimulationError::invalid(field, format!("must be > 0, got {}", value)));
    }
    Ok(())
}
