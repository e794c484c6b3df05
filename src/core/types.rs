//! PP-002: Plan data model: type diffs, steps, hyperparameters, plans.
//!
//! A `Plan` is the compiler's artifact: abstract steps in application order.
//! `PipelineDescription` is the lowered form handed to an external encoder.
//! All types derive Serialize/Deserialize for YAML/JSON output.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type diffs
// ============================================================================

/// A retained variable whose canonical semantic type changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDiff {
    pub index: usize,
    pub old_type_id: &'static str,
    pub new_type_id: &'static str,
}

// ============================================================================
// Primitives
// ============================================================================

/// Descriptor of an engine primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Primitive {
    pub id: String,
    pub version: String,
    pub name: String,
    pub python_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// A step that invokes an arbitrary primitive (fixed-recipe templates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveStep {
    pub primitive: Primitive,

    /// Methods whose results are exposed (first one feeds the next step)
    #[serde(default = "default_outputs")]
    pub outputs: Vec<String>,

    /// Explicit argument data references; empty means "chain from previous step"
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub arguments: IndexMap<String, String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub hyperparams: IndexMap<String, HyperValue>,
}

fn default_outputs() -> Vec<String> {
    vec!["produce".to_string()]
}

impl PrimitiveStep {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            outputs: default_outputs(),
            arguments: IndexMap::new(),
            hyperparams: IndexMap::new(),
        }
    }

    pub fn with_hyperparam(mut self, key: &str, value: HyperValue) -> Self {
        self.hyperparams.insert(key.to_string(), value);
        self
    }

    pub fn with_argument(mut self, key: &str, data_ref: &str) -> Self {
        self.arguments.insert(key.to_string(), data_ref.to_string());
        self
    }

    pub fn with_outputs(mut self, outputs: &[&str]) -> Self {
        self.outputs = outputs.iter().map(|o| o.to_string()).collect();
        self
    }
}

// ============================================================================
// Hyperparameters
// ============================================================================

/// A raw hyperparameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HyperValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<HyperValue>),
}

impl HyperValue {
    pub fn string(s: &str) -> Self {
        Self::String(s.to_string())
    }

    /// Integer list from column indices.
    pub fn int_list(values: &[usize]) -> Self {
        Self::List(
            values
                .iter()
                .map(|&v| Self::Int(i64::try_from(v).unwrap_or(i64::MAX)))
                .collect(),
        )
    }

    /// String list. A logically empty list becomes `[""]`: the consuming
    /// schema requires at least one element.
    pub fn string_list<S: AsRef<str>>(values: &[S]) -> Self {
        if values.is_empty() {
            return Self::List(vec![Self::String(String::new())]);
        }
        Self::List(
            values
                .iter()
                .map(|v| Self::String(v.as_ref().to_string()))
                .collect(),
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer elements of a list; `None` if this is not a list of ints.
    pub fn as_ints(&self) -> Option<Vec<i64>> {
        match self {
            Self::List(items) => items
                .iter()
                .map(|i| match i {
                    Self::Int(n) => Some(*n),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    /// String elements of a list; `None` if this is not a list of strings.
    pub fn as_strings(&self) -> Option<Vec<String>> {
        match self {
            Self::List(items) => items
                .iter()
                .map(|i| i.as_str().map(str::to_string))
                .collect(),
            _ => None,
        }
    }
}

// ============================================================================
// Steps
// ============================================================================

/// One unit of a plan. Steps are self-contained and applied in list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Add a semantic type to columns (ascending, deduplicated).
    AddSemanticType {
        target_columns: Vec<usize>,
        type_id: String,
    },
    /// Remove a semantic type from columns (ascending, deduplicated).
    RemoveSemanticType {
        target_columns: Vec<usize>,
        type_id: String,
    },
    /// Remove columns from a resource.
    RemoveColumns {
        resource_id: String,
        columns: Vec<usize>,
    },
    /// Invoke a named primitive. Never produced by the diff compiler.
    Primitive(PrimitiveStep),
}

impl Step {
    /// Method whose result the next step consumes.
    pub fn output_method(&self) -> &str {
        match self {
            Self::Primitive(p) => p.outputs.first().map_or("produce", String::as_str),
            _ => "produce",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddSemanticType {
                target_columns,
                type_id,
            } => write!(f, "ADD-TYPE {} -> {:?}", type_id, target_columns),
            Self::RemoveSemanticType {
                target_columns,
                type_id,
            } => write!(f, "REMOVE-TYPE {} <- {:?}", type_id, target_columns),
            Self::RemoveColumns {
                resource_id,
                columns,
            } => write!(f, "REMOVE-COLUMNS {:?} from resource {}", columns, resource_id),
            Self::Primitive(p) => write!(f, "PRIMITIVE {}", p.primitive.python_path),
        }
    }
}

// ============================================================================
// Plans
// ============================================================================

/// A declared pipeline input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineInput {
    pub name: String,
}

/// A declared pipeline output and the data reference it exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub name: String,
    pub data: String,
}

/// Compiled plan. `None` from the compiler means "nothing to do".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// BLAKE3 digest of name and steps
    pub id: String,
    pub name: String,
    pub description: String,
    pub inputs: Vec<PipelineInput>,
    pub outputs: Vec<PipelineOutput>,
    pub steps: Vec<Step>,
}

// ============================================================================
// Lowered pipeline
// ============================================================================

/// A step bound to a primitive with resolved data references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStep {
    pub primitive: Primitive,
    pub arguments: IndexMap<String, String>,
    pub outputs: Vec<String>,
    pub hyperparams: IndexMap<String, HyperValue>,
}

/// Encoder-facing pipeline description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineDescription {
    pub id: String,
    pub name: String,
    pub description: String,
    pub inputs: Vec<PipelineInput>,
    pub outputs: Vec<PipelineOutput>,
    pub steps: Vec<PipelineStep>,
}
