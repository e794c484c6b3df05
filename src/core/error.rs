//! PP-008: Typed compile errors.
//!
//! "No transformation required" is `Ok(None)` from the compiler, never an
//! error variant.

/// Every failure the compiler, template library, or plan store can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// A retained variable's classification has no registry entry.
    #[error("no type mapping for '{label}' (variable '{variable}')")]
    UnknownTypeMapping { variable: String, label: String },

    /// A template parameter names a variable that is not in the dataset.
    #[error("unknown variable '{name}'")]
    UnknownVariable { name: String },

    /// A template parameter is out of range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("cannot access {path}: {message}")]
    Io { path: String, message: String },

    #[error("parse error: {message}")]
    Parse { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pp008_display_mapping() {
        let e = PlanError::UnknownTypeMapping {
            variable: "test_var_0".to_string(),
            label: "blordinal".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "no type mapping for 'blordinal' (variable 'test_var_0')"
        );
    }

    #[test]
    fn test_pp008_display_parameter() {
        let e = PlanError::InvalidParameter {
            name: "accuracy".to_string(),
            reason: "must be in (0, 1]".to_string(),
        };
        assert!(e.to_string().contains("accuracy"));
    }
}
