//! PP-010: Dataset metadata model: variables, data resources, metadata.
//!
//! Read-only view of the dataset metadata collaborator. Variable and resource
//! field names follow the metadata JSON documents (`colName`, `colType`,
//! `resID`, ...); `Metadata` itself uses the store's PascalCase names (`ID`,
//! `DataResources`, `NumRows`, ...).

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Variable name of the row index column.
pub const D3M_INDEX_NAME: &str = "d3mIndex";

/// Distil role for data variables.
pub const VAR_ROLE_DATA: &str = "data";
/// Distil role for metadata variables.
pub const VAR_ROLE_METADATA: &str = "metadata";

pub const RES_TYPE_AUDIO: &str = "audio";
pub const RES_TYPE_IMAGE: &str = "image";
pub const RES_TYPE_TABLE: &str = "table";
pub const RES_TYPE_TEXT: &str = "text";
pub const RES_TYPE_TIME: &str = "timeseries";

const VARIABLE_NAME_SIZE_LIMIT: usize = 50;

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[^a-zA-Z0-9]").unwrap());

// ============================================================================
// Variables
// ============================================================================

/// A single variable (column) description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    #[serde(rename = "colName")]
    pub name: String,

    /// Working classification chosen by the user
    #[serde(rename = "colType", default, skip_serializing_if = "String::is_empty")]
    pub var_type: String,

    /// Classification assigned when the dataset was ingested
    #[serde(rename = "colOriginalType", default, skip_serializing_if = "String::is_empty")]
    pub original_type: String,

    #[serde(rename = "selectedRole", default, skip_serializing_if = "String::is_empty")]
    pub selected_role: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role: Vec<String>,

    #[serde(rename = "distilRole", default, skip_serializing_if = "String::is_empty")]
    pub distil_role: String,

    #[serde(rename = "varOriginalName", default)]
    pub original_variable: String,

    #[serde(rename = "colOriginalName", default, skip_serializing_if = "String::is_empty")]
    pub original_name: String,

    #[serde(rename = "colDisplayName", default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub importance: i64,

    /// Positional order within the owning resource
    #[serde(rename = "colIndex")]
    pub index: usize,

    #[serde(rename = "suggestedTypes", default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_types: Vec<SuggestedType>,

    #[serde(rename = "refersTo", default, skip_serializing_if = "Option::is_none")]
    pub refers_to: Option<IndexMap<String, serde_json::Value>>,

    #[serde(default)]
    pub deleted: bool,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

/// A classifier's suggestion for a variable type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedType {
    #[serde(rename = "type")]
    pub suggested_type: String,
    pub probability: f64,
    pub provenance: String,
}

/// Construction parameters for [`Variable::create`].
#[derive(Debug, Clone, Default)]
pub struct VariableInit {
    pub index: usize,
    pub name: String,
    pub display_name: String,
    pub original_name: String,
    pub var_type: String,
    pub original_type: String,
    pub role: Vec<String>,
    pub distil_role: String,
    pub refers_to: Option<IndexMap<String, serde_json::Value>>,
}

/// Normalize a variable name: non-alphanumerics become `_`, max 50 chars.
pub fn normalize_variable_name(name: &str) -> String {
    let mut normalized = NAME_RE.replace_all(name, "_").into_owned();
    // every remaining char is ASCII, so byte truncation is safe
    normalized.truncate(VARIABLE_NAME_SIZE_LIMIT);
    normalized
}

impl Variable {
    /// Create a variable, optionally normalizing its name and making it unique
    /// among `existing`.
    pub fn create(init: VariableInit, existing: &[Variable], normalize_name: bool) -> Self {
        let mut normed = init.name.clone();
        if normalize_name {
            normed = normalize_variable_name(&init.name);
            let count = existing.iter().filter(|v| v.name == normed).count();
            if count > 0 {
                normed = format!("{}_{}", normed, count);
            }
        }

        let selected_role = init.role.first().cloned().unwrap_or_default();
        let distil_role = if init.distil_role.is_empty() {
            VAR_ROLE_DATA.to_string()
        } else {
            init.distil_role
        };
        let original_variable = if init.original_name.is_empty() {
            normed.clone()
        } else {
            init.original_name
        };
        let display_name = if init.display_name.is_empty() {
            init.name
        } else {
            init.display_name
        };

        Variable {
            name: normed.clone(),
            var_type: init.var_type,
            original_type: init.original_type,
            selected_role,
            role: init.role,
            distil_role,
            original_variable,
            original_name: normed,
            display_name,
            importance: 0,
            index: init.index,
            suggested_types: Vec::new(),
            refers_to: init.refers_to,
            deleted: false,
        }
    }

    /// True if the variable points at a media resource (`refersTo.resObject` is a string).
    pub fn is_media_reference(&self) -> bool {
        self.refers_to
            .as_ref()
            .and_then(|r| r.get("resObject"))
            .is_some_and(|v| v.is_string())
    }
}

// ============================================================================
// Data resources
// ============================================================================

/// A set of variables found in one data asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataResource {
    #[serde(rename = "resID")]
    pub res_id: String,

    #[serde(rename = "resType", default)]
    pub res_type: String,

    #[serde(rename = "resPath", default)]
    pub res_path: String,

    #[serde(rename = "isCollection", default)]
    pub is_collection: bool,

    #[serde(rename = "columns", default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Variable>,

    #[serde(rename = "resFormat", default)]
    pub res_format: Vec<String>,
}

impl DataResource {
    pub fn new(res_id: &str, res_type: &str, res_format: Vec<String>) -> Self {
        Self {
            res_id: res_id.to_string(),
            res_type: res_type.to_string(),
            res_format,
            ..Default::default()
        }
    }

    /// Only image resources can be featurized.
    pub fn can_be_featurized(&self) -> bool {
        self.res_type == RES_TYPE_IMAGE
    }

    /// Append a variable at the next index. Type and original type start equal.
    pub fn add_variable(
        &mut self,
        name: &str,
        original_name: &str,
        var_type: &str,
        role: Vec<String>,
        distil_role: &str,
    ) {
        let init = VariableInit {
            index: self.variables.len(),
            name: name.to_string(),
            original_name: original_name.to_string(),
            var_type: var_type.to_string(),
            original_type: var_type.to_string(),
            role,
            distil_role: distil_role.to_string(),
            ..Default::default()
        };
        let v = Variable::create(init, &self.variables, false);
        self.variables.push(v);
    }

    /// CSV header row for this resource.
    pub fn generate_header(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.name.clone()).collect()
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// A dataset description: a collection of data resources. Field names are
/// PascalCase, as in the metadata store's exports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Metadata {
    #[serde(rename = "ID")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub summary_machine: String,
    #[serde(default)]
    pub raw: bool,
    #[serde(default)]
    pub data_resources: Vec<DataResource>,
    #[serde(default)]
    pub num_rows: i64,
    #[serde(default)]
    pub num_bytes: i64,
    #[serde(default)]
    pub schema_source: String,
    #[serde(default)]
    pub redacted: bool,
    #[serde(default)]
    pub dataset_folder: String,
}

impl Metadata {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    /// The resource holding the `d3mIndex` variable, if any.
    pub fn main_data_resource(&self) -> Option<&DataResource> {
        self.data_resources
            .iter()
            .find(|dr| dr.variables.iter().any(|v| v.name == D3M_INDEX_NAME))
    }

    /// One header row per data resource.
    pub fn generate_headers(&self) -> Vec<Vec<String>> {
        self.data_resources
            .iter()
            .map(DataResource::generate_header)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pp010_normalize_replaces_symbols() {
        assert_eq!(normalize_variable_name("sepal length (cm)"), "sepal_length__cm_");
        assert_eq!(normalize_variable_name("plain"), "plain");
    }

    #[test]
    fn test_pp010_normalize_truncates() {
        let long = "x".repeat(80);
        assert_eq!(normalize_variable_name(&long).len(), 50);
    }

    #[test]
    fn test_pp010_normalize_non_ascii() {
        let n = normalize_variable_name("café");
        assert_eq!(n, "caf_");
    }

    #[test]
    fn test_pp010_create_unique_suffix() {
        let existing = vec![Variable {
            name: "a_b".to_string(),
            ..Default::default()
        }];
        let init = VariableInit {
            index: 1,
            name: "a b".to_string(),
            ..Default::default()
        };
        let v = Variable::create(init, &existing, true);
        assert_eq!(v.name, "a_b_1");
        assert_eq!(v.display_name, "a b");
        assert_eq!(v.original_variable, "a_b_1");
    }

    #[test]
    fn test_pp010_create_defaults() {
        let init = VariableInit {
            index: 3,
            name: "price".to_string(),
            var_type: "real".to_string(),
            original_type: "integer".to_string(),
            role: vec!["attribute".to_string(), "suggestedTarget".to_string()],
            ..Default::default()
        };
        let v = Variable::create(init, &[], false);
        assert_eq!(v.selected_role, "attribute");
        assert_eq!(v.distil_role, VAR_ROLE_DATA);
        assert_eq!(v.index, 3);
        assert!(!v.deleted);
    }

    #[test]
    fn test_pp010_add_variable_indexes() {
        let mut dr = DataResource::new("0", RES_TYPE_TABLE, vec!["text/csv".to_string()]);
        dr.add_variable(D3M_INDEX_NAME, "", "index", vec![], "");
        dr.add_variable("value", "", "real", vec![], VAR_ROLE_METADATA);
        assert_eq!(dr.variables[1].index, 1);
        assert_eq!(dr.variables[1].original_type, "real");
        assert_eq!(dr.variables[1].distil_role, VAR_ROLE_METADATA);
        assert_eq!(dr.generate_header(), vec!["d3mIndex", "value"]);
    }

    #[test]
    fn test_pp010_main_data_resource() {
        let mut media = DataResource::new("0", RES_TYPE_IMAGE, vec![]);
        media.add_variable("filename", "", "text", vec![], "");
        let mut table = DataResource::new("learningData", RES_TYPE_TABLE, vec![]);
        table.add_variable(D3M_INDEX_NAME, "", "index", vec![], "");

        let mut meta = Metadata::new("ds", "dataset", "");
        meta.data_resources = vec![media, table];
        assert_eq!(meta.main_data_resource().unwrap().res_id, "learningData");
        assert!(meta.data_resources[0].can_be_featurized());
        assert_eq!(meta.generate_headers().len(), 2);
    }

    #[test]
    fn test_pp010_main_data_resource_missing() {
        let meta = Metadata::new("ds", "dataset", "");
        assert!(meta.main_data_resource().is_none());
    }

    #[test]
    fn test_pp010_media_reference() {
        let mut v = Variable::default();
        assert!(!v.is_media_reference());
        let mut refers = IndexMap::new();
        refers.insert("resID".to_string(), serde_json::json!("0"));
        refers.insert("resObject".to_string(), serde_json::json!("item"));
        v.refers_to = Some(refers);
        assert!(v.is_media_reference());
    }

    #[test]
    fn test_pp010_variable_json_names() {
        let json = r#"{"colName":"x","colType":"integer","colOriginalType":"categorical","varOriginalName":"x","colIndex":2,"deleted":false}"#;
        let v: Variable = serde_json::from_str(json).unwrap();
        assert_eq!(v.name, "x");
        assert_eq!(v.var_type, "integer");
        assert_eq!(v.original_type, "categorical");
        assert_eq!(v.index, 2);
    }

    #[test]
    fn test_pp010_metadata_pascal_case_names() {
        let json = r#"{
            "ID": "ds",
            "Name": "dataset",
            "SummaryMachine": "auto",
            "NumRows": 12,
            "DataResources": [
                {"resID": "learningData", "resType": "table", "columns": [{"colName": "d3mIndex", "colIndex": 0}]}
            ]
        }"#;
        let meta: Metadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.id, "ds");
        assert_eq!(meta.summary_machine, "auto");
        assert_eq!(meta.num_rows, 12);
        assert_eq!(meta.main_data_resource().unwrap().res_id, "learningData");

        let out = serde_json::to_value(&meta).unwrap();
        assert_eq!(out["ID"], "ds");
        assert!(out.get("DataResources").is_some());
        assert!(out.get("data_resources").is_none());
    }
}
