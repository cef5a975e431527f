//! Error types for line balancing runs.

use thiserror::Error;

use crate::scheduler::InfeasibleDiagnosis;
use crate::validation::ValidationError;

/// Why a balancing run produced no outcome.
#[derive(Debug, Clone, Error)]
pub enum BalanceError {
    /// Input rejected before the run started.
    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// The scheduler could not place every task.
    #[error("line cannot be balanced: {} of {} tasks left unassigned", .0.tasks.len(), .0.task_count)]
    Infeasible(InfeasibleDiagnosis),
}

impl BalanceError {
    /// The diagnosis, if the run was infeasible.
    pub fn diagnosis(&self) -> Option<&InfeasibleDiagnosis> {
        match self {
            BalanceError::Infeasible(d) => Some(d),
            BalanceError::InvalidInput(_) => None,
        }
    }

    /// The validation errors, if the input was rejected.
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            BalanceError::InvalidInput(errors) => Some(errors),
            BalanceError::Infeasible(_) => None,
        }
    }
}

impl From<InfeasibleDiagnosis> for BalanceError {
    fn from(diagnosis: InfeasibleDiagnosis) -> Self {
        BalanceError::Infeasible(diagnosis)
    }
}

impl From<Vec<ValidationError>> for BalanceError {
    fn from(errors: Vec<ValidationError>) -> Self {
        BalanceError::InvalidInput(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for balancing operations.
pub type Result<T> = std::result::Result<T, BalanceError>;
