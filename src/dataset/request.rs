//! PP-011: Compile request parsing and validation.
//!
//! A request names the pipeline, the target, and the selected features, and
//! carries the variables either inline or as full dataset metadata:
//! - Variable indices and names must be unique
//! - Selected features must name existing, non-deleted variables

use super::types::{DataResource, Metadata, Variable};
use crate::core::error::PlanError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Resource id used for column removal when no main resource is known.
pub const DEFAULT_RESOURCE_ID: &str = "0";

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A user dataset compile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileRequest {
    /// Pipeline name
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Prediction target variable name
    pub target: String,

    /// Selected feature variable names
    #[serde(default)]
    pub features: Vec<String>,

    /// Explicit primary resource id (overrides the dataset's main resource)
    #[serde(default)]
    pub resource_id: Option<String>,

    /// Inline variables
    #[serde(default)]
    pub variables: Vec<Variable>,

    /// Full dataset metadata, used when `variables` is empty
    #[serde(default)]
    pub dataset: Option<Metadata>,
}

impl CompileRequest {
    /// The dataset resource the request compiles against: the main resource
    /// (holding `d3mIndex`), else the first one.
    pub fn primary_resource(&self) -> Option<&DataResource> {
        let meta = self.dataset.as_ref()?;
        meta.main_data_resource()
            .or_else(|| meta.data_resources.first())
    }

    /// The variables to compile against: inline ones, else the primary
    /// resource's.
    pub fn variables(&self) -> &[Variable] {
        if !self.variables.is_empty() {
            return &self.variables;
        }
        self.primary_resource()
            .map(|dr| dr.variables.as_slice())
            .unwrap_or_default()
    }

    /// Resource id addressed by column removal.
    pub fn primary_resource_id(&self) -> String {
        if let Some(ref id) = self.resource_id {
            return id.clone();
        }
        self.primary_resource()
            .map(|dr| dr.res_id.clone())
            .unwrap_or_else(|| DEFAULT_RESOURCE_ID.to_string())
    }
}

/// Parse a request file from disk.
pub fn parse_request_file(path: &Path) -> Result<CompileRequest, PlanError> {
    let content = std::fs::read_to_string(path).map_err(|e| PlanError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_request(&content)
}

/// Parse a request from a YAML (or JSON) string.
pub fn parse_request(yaml: &str) -> Result<CompileRequest, PlanError> {
    serde_yaml_ng::from_str(yaml).map_err(|e| PlanError::Parse {
        message: e.to_string(),
    })
}

/// Validate a parsed request. Returns a list of errors (empty = valid).
pub fn validate_request(request: &CompileRequest) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if request.name.is_empty() {
        errors.push(ValidationError {
            message: "name must not be empty".to_string(),
        });
    }

    let variables = request.variables();
    if variables.is_empty() {
        errors.push(ValidationError {
            message: "request has no variables".to_string(),
        });
    }

    let mut seen_index = HashSet::new();
    let mut seen_name = HashSet::new();
    for v in variables {
        if !seen_index.insert(v.index) {
            errors.push(ValidationError {
                message: format!("duplicate variable index {}", v.index),
            });
        }
        if !seen_name.insert(v.name.as_str()) {
            errors.push(ValidationError {
                message: format!("duplicate variable name '{}'", v.name),
            });
        }
    }

    for feature in &request.features {
        match variables.iter().find(|v| &v.name == feature) {
            None => errors.push(ValidationError {
                message: format!("selected feature '{}' is not a variable", feature),
            }),
            Some(v) if v.deleted => errors.push(ValidationError {
                message: format!("selected feature '{}' is deleted", feature),
            }),
            Some(_) => {}
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    const INLINE: &str = r#"
name: user-pipeline
description: retype and drop
target: label
features: [a, b]
variables:
  - { colName: a, colType: integer, colOriginalType: categorical, colIndex: 0 }
  - { colName: b, colType: real, colOriginalType: real, colIndex: 1 }
  - { colName: c, colType: text, colOriginalType: text, colIndex: 2 }
"#;

    #[test]
    fn test_pp011_parse_inline() {
        let req = parse_request(INLINE).unwrap();
        assert_eq!(req.name, "user-pipeline");
        assert_eq!(req.variables().len(), 3);
        assert_eq!(req.primary_resource_id(), "0");
        assert!(validate_request(&req).is_empty());
    }

    #[test]
    fn test_pp011_dataset_main_resource() {
        let yaml = r#"
name: p
target: label
features: [value]
dataset:
  ID: ds
  Name: dataset
  DataResources:
    - resID: media
      resType: image
      columns:
        - { colName: filename, colIndex: 0 }
    - resID: learningData
      resType: table
      columns:
        - { colName: d3mIndex, colType: index, colOriginalType: index, colIndex: 0 }
        - { colName: value, colType: real, colOriginalType: integer, colIndex: 1 }
"#;
        let req = parse_request(yaml).unwrap();
        assert_eq!(req.primary_resource_id(), "learningData");
        assert_eq!(req.variables().len(), 2);
        assert_eq!(req.variables()[1].name, "value");
    }

    #[test]
    fn test_pp011_resource_without_index_column() {
        let yaml = r#"
name: p
target: y
features: [a]
dataset:
  ID: ds
  Name: dataset
  DataResources:
    - resID: learningData
      resType: table
      columns:
        - { colName: a, colType: integer, colOriginalType: integer, colIndex: 0 }
        - { colName: b, colType: text, colOriginalType: text, colIndex: 1 }
        - { colName: y, colType: integer, colOriginalType: integer, colIndex: 2 }
"#;
        let req = parse_request(yaml).unwrap();
        assert_eq!(req.primary_resource().unwrap().res_id, "learningData");
        assert_eq!(req.primary_resource_id(), "learningData");
        assert_eq!(req.variables().len(), 3);
    }

    #[test]
    fn test_pp011_explicit_resource_id_wins() {
        let mut req = parse_request(INLINE).unwrap();
        req.resource_id = Some("learningData".to_string());
        assert_eq!(req.primary_resource_id(), "learningData");
    }

    #[test]
    fn test_pp011_duplicate_index() {
        let yaml = r#"
name: p
target: t
variables:
  - { colName: a, colIndex: 0 }
  - { colName: b, colIndex: 0 }
"#;
        let req = parse_request(yaml).unwrap();
        let errors = validate_request(&req);
        assert!(errors.iter().any(|e| e.message.contains("duplicate variable index")));
    }

    #[test]
    fn test_pp011_unknown_and_deleted_feature() {
        let yaml = r#"
name: p
target: t
features: [ghost, gone]
variables:
  - { colName: gone, colIndex: 0, deleted: true }
"#;
        let req = parse_request(yaml).unwrap();
        let errors = validate_request(&req);
        assert!(errors.iter().any(|e| e.message.contains("'ghost' is not a variable")));
        assert!(errors.iter().any(|e| e.message.contains("'gone' is deleted")));
    }

    #[test]
    fn test_pp011_empty_request() {
        let req = parse_request("name: ''\ntarget: t\n").unwrap();
        let errors = validate_request(&req);
        assert!(errors.iter().any(|e| e.message.contains("name must not be empty")));
        assert!(errors.iter().any(|e| e.message.contains("no variables")));
    }

    #[test]
    fn test_pp011_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.yaml");
        std::fs::write(&path, INLINE).unwrap();
        let req = parse_request_file(&path).unwrap();
        assert_eq!(req.target, "label");
    }

    #[test]
    fn test_pp011_parse_missing_file() {
        let err = parse_request_file(Path::new("/nonexistent/request.yaml")).unwrap_err();
        assert!(matches!(err, PlanError::Io { .. }));
    }

    #[test]
    fn test_pp011_parse_invalid_yaml() {
        let result = parse_request("not: [valid: yaml: {{");
        assert!(matches!(result, Err(PlanError::Parse { .. })));
    }
}
