//! Input validation for line balancing problems.
//!
//! Checks field-level integrity of the project parameters and task list
//! before a run. Detects:
//! - Out-of-range project parameters (production minutes, daily demand)
//! - Empty task lists
//! - Duplicate or zero task IDs
//! - Empty or overlong names
//! - Non-positive or excessive durations
//!
//! Precedence references are deliberately not checked here: a dangling
//! or circular precedence is reported by the scheduler's
//! [`InfeasibleDiagnosis`](crate::scheduler::InfeasibleDiagnosis).

use crate::models::{ProjectConfig, Task};
use std::collections::HashSet;

/// Maximum length of task and project names (characters).
pub const MAX_NAME_LEN: usize = 100;
/// Maximum task duration (seconds).
pub const MAX_TASK_DURATION: f64 = 10_000.0;
/// Accepted production time per day (minutes).
pub const PRODUCTION_TIME_RANGE: std::ops::RangeInclusive<f64> = 1.0..=1440.0;
/// Accepted required production per day (units).
pub const REQUIRED_PRODUCTION_RANGE: std::ops::RangeInclusive<u32> = 1..=100_000;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same ID.
    DuplicateId,
    /// Task ID is zero.
    InvalidTaskId,
    /// Task or project name is empty or too long.
    InvalidName,
    /// Task duration is not in (0, 10000].
    InvalidDuration,
    /// No tasks to balance.
    EmptyTaskList,
    /// Production time per day is outside 1..=1440 minutes.
    InvalidProductionTime,
    /// Required production per day is outside 1..=100000 units.
    InvalidRequiredProduction,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the input data for a balancing run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(config: &ProjectConfig, tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();
    errors.extend(project_errors(config));
    errors.extend(task_errors(tasks));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the project parameters only.
pub fn validate_project(config: &ProjectConfig) -> ValidationResult {
    let errors = project_errors(config);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn project_errors(config: &ProjectConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(problem) = name_problem(&config.project_name) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidName,
            format!("Project name {problem}"),
        ));
    }

    // NaN fails `contains`, so it is rejected too.
    if !PRODUCTION_TIME_RANGE.contains(&config.production_time_per_day) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidProductionTime,
            format!(
                "Production time per day must be within 1..=1440 minutes, got {}",
                config.production_time_per_day
            ),
        ));
    }

    if !REQUIRED_PRODUCTION_RANGE.contains(&config.required_production_per_day) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidRequiredProduction,
            format!(
                "Required production per day must be within 1..=100000 units, got {}",
                config.required_production_per_day
            ),
        ));
    }

    errors
}

fn task_errors(tasks: &[Task]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if tasks.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyTaskList,
            "At least one task is required",
        ));
    }

    let mut task_ids = HashSet::new();
    for task in tasks {
        if task.id == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTaskId,
                format!("Task '{}' has ID 0; IDs must be positive", task.name),
            ));
        }

        if !task_ids.insert(task.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }

        if let Some(problem) = name_problem(&task.name) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidName,
                format!("Task {} name {problem}", task.id),
            ));
        }

        if !(task.duration > 0.0 && task.duration <= MAX_TASK_DURATION) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!(
                    "Task {} duration must be within (0, 10000] seconds, got {}",
                    task.id, task.duration
                ),
            ));
        }
    }

    errors
}

fn name_problem(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        Some("is empty")
    } else if name.chars().count() > MAX_NAME_LEN {
        Some("exceeds 100 characters")
    } else {
        None
    }
}
