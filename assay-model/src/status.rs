//! Closed enumerations for status, licensing, and dataset typing.
//!
//! Wire strings match the upstream API contract exactly (`"Created"`,
//! `"Open_Source"`, …). An out-of-set value is a validation error, never a
//! silent default.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a [`Project`](crate::Project).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Created,
    Pending,
    Ready,
    Closed,
    Archived,
}

impl ProjectStatus {
    /// The accepted wire values, in declaration order.
    pub const VALUES: &'static [&'static str] =
        &["Created", "Pending", "Ready", "Closed", "Archived"];
}

/// Lifecycle status of an [`Evaluation`](crate::Evaluation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvaluationStatus {
    Pending,
    Archived,
    Processing,
    Custom,
    Done,
}

impl EvaluationStatus {
    /// The accepted wire values, in declaration order.
    pub const VALUES: &'static [&'static str] =
        &["Pending", "Archived", "Processing", "Custom", "Done"];
}

/// Licensing of a tool, dataset, or model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Licensing {
    Proprietary,
    #[serde(rename = "Open_Source")]
    OpenSource,
}

impl Licensing {
    /// The accepted wire values, in declaration order.
    pub const VALUES: &'static [&'static str] = &["Proprietary", "Open_Source"];
}

/// Role of a dataset within an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetType {
    Validation,
    Test,
    Training,
}

impl DatasetType {
    /// The accepted wire values, in declaration order.
    pub const VALUES: &'static [&'static str] = &["Validation", "Test", "Training"];
}
