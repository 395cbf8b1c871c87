//! Error types for assetflow.
//!
//! Only decision-table inconsistencies are errors. Missing options fall back to
//! defaults and dangling localization targets are skipped, so neither appears
//! here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for assetflow operations.
#[derive(Debug, Error)]
pub enum AssetflowError {
    /// The decision table failed validation.
    #[error("{0}")]
    Validation(#[from] TableValidationError),

    /// A resolved asset depends on a handle nobody provides.
    #[error("{0}")]
    UnresolvedDependency(#[from] UnresolvedDependencyError),

    /// A dependency cycle was found among resolved assets.
    #[error("{0}")]
    CycleDetected(#[from] CycleDetectedError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Diagnostic metadata attached to validation errors.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ErrorInfo {
    /// Error code (e.g., "TABLE-003-CYCLE").
    pub code: String,
    /// Short summary of the error.
    pub summary: String,
    /// Hint for fixing the error.
    pub fix_hint: Option<String>,
    /// Additional context key-value pairs.
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl ErrorInfo {
    /// Creates new error info.
    #[must_use]
    pub fn new(code: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
            fix_hint: None,
            context: HashMap::new(),
        }
    }

    /// Sets the fix hint.
    #[must_use]
    pub fn with_fix_hint(mut self, hint: impl Into<String>) -> Self {
        self.fix_hint = Some(hint.into());
        self
    }

    /// Adds a single context entry.
    #[must_use]
    pub fn with_context_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Converts to a JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert("code".to_string(), serde_json::json!(self.code));
        map.insert("summary".to_string(), serde_json::json!(self.summary));
        if let Some(ref hint) = self.fix_hint {
            map.insert("fix_hint".to_string(), serde_json::json!(hint));
        }
        if !self.context.is_empty() {
            let mut keys: Vec<_> = self.context.keys().collect();
            keys.sort();
            let context: serde_json::Map<String, serde_json::Value> = keys
                .into_iter()
                .map(|k| (k.clone(), serde_json::json!(self.context[k])))
                .collect();
            map.insert("context".to_string(), serde_json::Value::Object(context));
        }
        serde_json::Value::Object(map)
    }
}

/// Error raised when a decision table fails construction-time validation.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TableValidationError {
    /// The error message.
    pub message: String,
    /// Entry names or handles involved in the error.
    pub subjects: Vec<String>,
    /// Optional diagnostic info.
    pub error_info: Option<ErrorInfo>,
}

impl TableValidationError {
    /// Creates a new table validation error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            subjects: Vec::new(),
            error_info: None,
        }
    }

    /// Sets the subjects involved.
    #[must_use]
    pub fn with_subjects(mut self, subjects: Vec<String>) -> Self {
        self.subjects = subjects;
        self
    }

    /// Sets the diagnostic info.
    #[must_use]
    pub fn with_error_info(mut self, info: ErrorInfo) -> Self {
        self.error_info = Some(info);
        self
    }

    /// Returns the error code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.error_info.as_ref().map(|i| i.code.as_str())
    }
}

/// Error raised when asset dependencies form a cycle.
#[derive(Debug, Clone, Error)]
#[error("Cycle detected between assets: {}", cycle_path.join(" -> "))]
pub struct CycleDetectedError {
    /// The handles forming the cycle, first handle repeated at the end.
    pub cycle_path: Vec<String>,
    /// Diagnostic info.
    pub error_info: ErrorInfo,
}

impl CycleDetectedError {
    /// Creates a new cycle detected error.
    #[must_use]
    pub fn new(cycle_path: Vec<String>) -> Self {
        let info = ErrorInfo::new(
            codes::CYCLE,
            format!("Asset dependencies form a cycle: {}", cycle_path.join(" -> ")),
        )
        .with_fix_hint("Remove one of the dependencies in the cycle to break it.");

        Self {
            cycle_path,
            error_info: info,
        }
    }
}

impl From<CycleDetectedError> for TableValidationError {
    fn from(err: CycleDetectedError) -> Self {
        Self {
            message: err.to_string(),
            subjects: err.cycle_path.clone(),
            error_info: Some(err.error_info),
        }
    }
}

/// Error raised when a resolved asset references a handle that is neither
/// earlier in the output nor provided by the host.
#[derive(Debug, Clone, Error)]
#[error("Asset '{handle}' depends on '{dependency}' which is neither resolved nor host-provided")]
pub struct UnresolvedDependencyError {
    /// The dependent asset.
    pub handle: String,
    /// The missing dependency.
    pub dependency: String,
}

impl UnresolvedDependencyError {
    /// Creates a new unresolved dependency error.
    #[must_use]
    pub fn new(handle: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            dependency: dependency.into(),
        }
    }
}

/// Validation error codes.
pub mod codes {
    /// A dependency no entry produces and the host does not provide.
    pub const MISSING_DEP: &str = "TABLE-001-MISSING_DEP";
    /// Two entries share a name.
    pub const DUPLICATE_ENTRY: &str = "TABLE-002-DUPLICATE_ENTRY";
    /// Dependency cycle.
    pub const CYCLE: &str = "TABLE-003-CYCLE";
    /// Table without entries.
    pub const EMPTY: &str = "TABLE-004-EMPTY";
    /// Localization binding for a handle no entry produces.
    pub const ORPHAN_BINDING: &str = "TABLE-005-ORPHAN_BINDING";
    /// Two bindings share an object name.
    pub const DUPLICATE_OBJECT: &str = "TABLE-006-DUPLICATE_OBJECT";
    /// A dependency whose producers are not guaranteed to be emitted
    /// whenever the dependent is.
    pub const CONDITIONAL_DEP: &str = "TABLE-007-CONDITIONAL_DEP";
}

/// Provides default suggestions for table validation codes.
pub struct TableSuggestions;

impl TableSuggestions {
    /// Gets a suggestion for a given error code.
    #[must_use]
    pub fn get(code: &str) -> Option<&'static str> {
        match code {
            codes::MISSING_DEP => Some(
                "Add an entry that produces the handle, or list it in the host handles \
                 if the host registers it.",
            ),
            codes::DUPLICATE_ENTRY => Some("Rename one of the entries."),
            codes::CYCLE => Some(
                "Check asset dependencies for circular references.",
            ),
            codes::EMPTY => Some("Add at least one entry before building the table."),
            codes::ORPHAN_BINDING => Some(
                "Bind localization data only to handles some entry can produce. \
                 Check for typos in the handle.",
            ),
            codes::DUPLICATE_OBJECT => Some(
                "Localization object names are global on the page; pick a unique name.",
            ),
            codes::CONDITIONAL_DEP => Some(
                "Gate the dependent asset on the same conditions as its dependency, \
                 or move the dependency into an unconditional entry.",
            ),
            _ => None,
        }
    }
}
