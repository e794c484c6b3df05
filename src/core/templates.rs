//! PP-014: Fixed-recipe pipeline templates.
//!
//! Each template is a static step list around one analysis primitive. No diff
//! synthesis happens here; parameters go in, a `Plan` comes out. Templates
//! can also be instantiated from `key=value` parameters (see [`Template`]).

use super::assembler::PlanAssembler;
use super::error::PlanError;
use super::primitives::{self, PrimitiveInfo};
use super::registry::semantic;
use super::types::{HyperValue, Plan, PrimitiveStep, Step};
use crate::dataset::types::Variable;
use std::collections::HashMap;

const SLOTH_CLUSTERS: i64 = 4;

fn primitive(p: PrimitiveStep) -> Step {
    Step::Primitive(p)
}

/// Denormalize then convert to a dataframe.
fn dataframe_prelude() -> Vec<Step> {
    vec![
        primitive(primitives::DENORMALIZE.step()),
        primitive(primitives::DATASET_TO_DATAFRAME.step()),
    ]
}

fn finish(assembler: PlanAssembler, steps: Vec<Step>) -> Result<Plan, PlanError> {
    assembler
        .assemble(steps)
        .ok_or_else(|| PlanError::InvalidParameter {
            name: "steps".to_string(),
            reason: "template produced no steps".to_string(),
        })
}

fn prelude_then(name: &str, description: &str, last: PrimitiveStep) -> Result<Plan, PlanError> {
    let mut steps = dataframe_prelude();
    steps.push(primitive(last));
    finish(PlanAssembler::new(name, description), steps)
}

fn find_variable(variables: &[Variable], name: &str) -> Result<usize, PlanError> {
    variables
        .iter()
        .find(|v| v.name == name)
        .map(|v| v.index)
        .ok_or_else(|| PlanError::UnknownVariable {
            name: name.to_string(),
        })
}

fn require_non_empty(name: &str, values: &[String]) -> Result<(), PlanError> {
    if values.is_empty() {
        return Err(PlanError::InvalidParameter {
            name: name.to_string(),
            reason: "must name at least one column".to_string(),
        });
    }
    Ok(())
}

fn index_param(value: usize) -> HyperValue {
    HyperValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
}

// ============================================================================
// Builders
// ============================================================================

/// PCA-based feature ranking.
pub fn pca_features(name: &str, description: &str) -> Result<Plan, PlanError> {
    prelude_then(
        name,
        description,
        primitives::PCA_FEATURES
            .step()
            .with_outputs(&["produce_metafeatures"]),
    )
}

/// Column type classification.
pub fn simon(name: &str, description: &str) -> Result<Plan, PlanError> {
    prelude_then(
        name,
        description,
        primitives::SIMON.step().with_outputs(&["produce_metafeatures"]),
    )
}

/// Object detection over image file columns.
pub fn croc(
    name: &str,
    description: &str,
    target_columns: &[String],
    output_labels: &[String],
) -> Result<Plan, PlanError> {
    detector(primitives::CROC, name, description, target_columns, output_labels)
}

/// Image detection over image file columns.
pub fn unicorn(
    name: &str,
    description: &str,
    target_columns: &[String],
    output_labels: &[String],
) -> Result<Plan, PlanError> {
    detector(primitives::UNICORN, name, description, target_columns, output_labels)
}

fn detector(
    info: PrimitiveInfo,
    name: &str,
    description: &str,
    target_columns: &[String],
    output_labels: &[String],
) -> Result<Plan, PlanError> {
    require_non_empty("target_columns", target_columns)?;
    require_non_empty("output_labels", output_labels)?;
    prelude_then(
        name,
        description,
        info.step()
            .with_hyperparam("target_columns", HyperValue::string_list(target_columns))
            .with_hyperparam("output_labels", HyperValue::string_list(output_labels)),
    )
}

/// Generic data cleaning.
pub fn data_cleaning(name: &str, description: &str) -> Result<Plan, PlanError> {
    prelude_then(name, description, primitives::DATA_CLEANING.step())
}

/// Time series clustering over a (time, value) pair of columns.
pub fn sloth(
    name: &str,
    description: &str,
    time_column: &str,
    value_column: &str,
    variables: &[Variable],
) -> Result<Plan, PlanError> {
    let time_index = find_variable(variables, time_column)?;
    let value_index = find_variable(variables, value_column)?;

    let steps = vec![
        primitive(primitives::DENORMALIZE.step()),
        primitive(
            primitives::TIMESERIES_LOADER
                .step()
                .with_hyperparam("time_col_index", index_param(time_index))
                .with_hyperparam("value_col_index", index_param(value_index)),
        ),
        primitive(
            primitives::SLOTH
                .step()
                .with_hyperparam("nclusters", HyperValue::Int(SLOTH_CLUSTERS)),
        ),
    ];
    finish(PlanAssembler::new(name, description), steps)
}

/// Dataset summary.
pub fn duke(name: &str, description: &str) -> Result<Plan, PlanError> {
    prelude_then(name, description, primitives::DUKE.step())
}

/// Feature ranking against a target: the target column is tagged first.
pub fn target_ranking(
    name: &str,
    description: &str,
    target: &str,
    variables: &[Variable],
) -> Result<Plan, PlanError> {
    let target_index = find_variable(variables, target)?;

    let mut steps = vec![Step::AddSemanticType {
        target_columns: vec![target_index],
        type_id: semantic::TRUE_TARGET.to_string(),
    }];
    steps.extend(dataframe_prelude());
    steps.push(primitive(primitives::COLUMN_PARSER.step()));
    steps.push(primitive(
        primitives::TARGET_RANKING
            .step()
            .with_hyperparam("target_col_index", index_param(target_index)),
    ));
    finish(PlanAssembler::new(name, description), steps)
}

/// Forward geocoding of a place-name column.
pub fn goat_forward(name: &str, description: &str, place_column: &str) -> Result<Plan, PlanError> {
    prelude_then(
        name,
        description,
        primitives::GOAT_FORWARD
            .step()
            .with_hyperparam("target_columns", HyperValue::string_list(&[place_column]))
            .with_hyperparam("rampup", HyperValue::Int(1)),
    )
}

/// Reverse geocoding of a latitude/longitude column pair.
pub fn goat_reverse(
    name: &str,
    description: &str,
    lat_column: &str,
    lon_column: &str,
) -> Result<Plan, PlanError> {
    prelude_then(
        name,
        description,
        primitives::GOAT_REVERSE
            .step()
            .with_hyperparam("lat_col", HyperValue::string(lat_column))
            .with_hyperparam("lon_col", HyperValue::string(lon_column)),
    )
}

/// Fuzzy join of two datasets on one column each. `accuracy` in (0, 1].
pub fn join(
    name: &str,
    description: &str,
    left_column: &str,
    right_column: &str,
    accuracy: f64,
) -> Result<Plan, PlanError> {
    if !(accuracy > 0.0 && accuracy <= 1.0) {
        return Err(PlanError::InvalidParameter {
            name: "accuracy".to_string(),
            reason: format!("must be in (0, 1], got {}", accuracy),
        });
    }

    let steps = vec![
        primitive(
            primitives::DENORMALIZE
                .step()
                .with_argument("inputs", "inputs.0"),
        ),
        primitive(
            primitives::DENORMALIZE
                .step()
                .with_argument("inputs", "inputs.1"),
        ),
        primitive(
            primitives::JOIN
                .step()
                .with_argument("left", "steps.0.produce")
                .with_argument("right", "steps.1.produce")
                .with_hyperparam("left_col", HyperValue::string(left_column))
                .with_hyperparam("right_col", HyperValue::string(right_column))
                .with_hyperparam("accuracy", HyperValue::Float(accuracy)),
        ),
    ];
    finish(
        PlanAssembler::new(name, description).with_inputs(&["left", "right"]),
        steps,
    )
}

/// Flatten a time series collection into the main resource.
pub fn timeseries_formatter(
    name: &str,
    description: &str,
    main_resource_id: &str,
    file_col_index: usize,
) -> Result<Plan, PlanError> {
    let steps = vec![
        primitive(
            primitives::TIMESERIES_FORMATTER
                .step()
                .with_hyperparam("main_resource_id", HyperValue::string(main_resource_id))
                .with_hyperparam("file_col_index", index_param(file_col_index)),
        ),
        primitive(primitives::DATASET_TO_DATAFRAME.step()),
    ];
    finish(PlanAssembler::new(name, description), steps)
}

// ============================================================================
// Parameterized instantiation
// ============================================================================

/// A named template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    PcaFeatures,
    Simon,
    Croc,
    DataCleaning,
    Unicorn,
    Sloth,
    Duke,
    TargetRanking,
    GoatForward,
    GoatReverse,
    Join,
    TimeseriesFormatter,
}

impl Template {
    pub const ALL: [Template; 12] = [
        Self::PcaFeatures,
        Self::Simon,
        Self::Croc,
        Self::DataCleaning,
        Self::Unicorn,
        Self::Sloth,
        Self::Duke,
        Self::TargetRanking,
        Self::GoatForward,
        Self::GoatReverse,
        Self::Join,
        Self::TimeseriesFormatter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::PcaFeatures => "pca-features",
            Self::Simon => "simon",
            Self::Croc => "croc",
            Self::DataCleaning => "data-cleaning",
            Self::Unicorn => "unicorn",
            Self::Sloth => "sloth",
            Self::Duke => "duke",
            Self::TargetRanking => "target-ranking",
            Self::GoatForward => "goat-forward",
            Self::GoatReverse => "goat-reverse",
            Self::Join => "join",
            Self::TimeseriesFormatter => "timeseries-formatter",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Parameters that must be supplied to [`Template::build`].
    pub fn required_params(&self) -> &'static [&'static str] {
        match self {
            Self::Croc | Self::Unicorn => &["target_columns", "output_labels"],
            Self::Sloth => &["time_column", "value_column"],
            Self::TargetRanking => &["target"],
            Self::GoatForward => &["place_column"],
            Self::GoatReverse => &["lat_column", "lon_column"],
            Self::Join => &["left_column", "right_column", "accuracy"],
            Self::TimeseriesFormatter => &["main_resource_id", "file_col_index"],
            Self::PcaFeatures | Self::Simon | Self::DataCleaning | Self::Duke => &[],
        }
    }

    /// Instantiate from string parameters. List parameters are comma separated.
    pub fn build(
        &self,
        name: &str,
        description: &str,
        params: &HashMap<String, String>,
        variables: &[Variable],
    ) -> Result<Plan, PlanError> {
        for key in self.required_params() {
            if !params.contains_key(*key) {
                return Err(PlanError::InvalidParameter {
                    name: key.to_string(),
                    reason: format!("required by template '{}'", self.name()),
                });
            }
        }
        let get = |key: &str| param(params, key);

        match self {
            Self::PcaFeatures => pca_features(name, description),
            Self::Simon => simon(name, description),
            Self::Croc => croc(
                name,
                description,
                &split_list(get("target_columns")),
                &split_list(get("output_labels")),
            ),
            Self::DataCleaning => data_cleaning(name, description),
            Self::Unicorn => unicorn(
                name,
                description,
                &split_list(get("target_columns")),
                &split_list(get("output_labels")),
            ),
            Self::Sloth => sloth(
                name,
                description,
                get("time_column"),
                get("value_column"),
                variables,
            ),
            Self::Duke => duke(name, description),
            Self::TargetRanking => target_ranking(name, description, get("target"), variables),
            Self::GoatForward => goat_forward(name, description, get("place_column")),
            Self::GoatReverse => {
                goat_reverse(name, description, get("lat_column"), get("lon_column"))
            }
            Self::Join => {
                let accuracy: f64 =
                    get("accuracy")
                        .parse()
                        .map_err(|_| PlanError::InvalidParameter {
                            name: "accuracy".to_string(),
                            reason: format!("not a number: {}", get("accuracy")),
                        })?;
                join(
                    name,
                    description,
                    get("left_column"),
                    get("right_column"),
                    accuracy,
                )
            }
            Self::TimeseriesFormatter => {
                let index: usize =
                    get("file_col_index")
                        .parse()
                        .map_err(|_| PlanError::InvalidParameter {
                            name: "file_col_index".to_string(),
                            reason: format!("not a column index: {}", get("file_col_index")),
                        })?;
                timeseries_formatter(name, description, get("main_resource_id"), index)
            }
        }
    }
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> &'a str {
    params.get(key).map(String::as_str).unwrap_or_default()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
