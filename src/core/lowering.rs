//! PP-013: Lowering: plan steps into engine-bound pipeline steps.
//!
//! Each step kind maps to one primitive and its hyperparameters:
//! - add/remove semantic type: `update_semantic_types` with both arms present;
//!   the unused arm carries `[]` columns and the `[""]` type placeholder
//! - remove columns: `remove_columns` with `resource_id` and `columns`
//!
//! Step 0 reads `inputs.0`; every later step reads the previous step's output
//! unless it declares its own arguments.

use super::primitives;
use super::types::{HyperValue, PipelineDescription, PipelineStep, Plan, Step};
use indexmap::IndexMap;

/// Lower a plan into a pipeline description.
pub fn lower(plan: &Plan) -> PipelineDescription {
    let mut steps = Vec::with_capacity(plan.steps.len());
    let mut previous: Option<String> = None;

    for (i, step) in plan.steps.iter().enumerate() {
        let input_ref = previous.unwrap_or_else(|| "inputs.0".to_string());
        steps.push(lower_step(step, &input_ref));
        previous = Some(format!("steps.{}.{}", i, step.output_method()));
    }

    PipelineDescription {
        id: plan.id.clone(),
        name: plan.name.clone(),
        description: plan.description.clone(),
        inputs: plan.inputs.clone(),
        outputs: plan.outputs.clone(),
        steps,
    }
}

/// Lower one step, reading its data from `input_ref`.
pub fn lower_step(step: &Step, input_ref: &str) -> PipelineStep {
    match step {
        Step::AddSemanticType {
            target_columns,
            type_id,
        } => semantic_type_step(input_ref, target_columns, Some(type_id), &[], None),
        Step::RemoveSemanticType {
            target_columns,
            type_id,
        } => semantic_type_step(input_ref, &[], None, target_columns, Some(type_id)),
        Step::RemoveColumns {
            resource_id,
            columns,
        } => {
            let mut hyperparams = IndexMap::new();
            hyperparams.insert("resource_id".to_string(), HyperValue::string(resource_id));
            hyperparams.insert("columns".to_string(), HyperValue::int_list(columns));
            PipelineStep {
                primitive: primitives::REMOVE_COLUMNS.to_primitive(),
                arguments: chained(input_ref),
                outputs: vec!["produce".to_string()],
                hyperparams,
            }
        }
        Step::Primitive(p) => PipelineStep {
            primitive: p.primitive.clone(),
            arguments: if p.arguments.is_empty() {
                chained(input_ref)
            } else {
                p.arguments.clone()
            },
            outputs: p.outputs.clone(),
            hyperparams: p.hyperparams.clone(),
        },
    }
}

fn semantic_type_step(
    input_ref: &str,
    add_columns: &[usize],
    add_type: Option<&String>,
    remove_columns: &[usize],
    remove_type: Option<&String>,
) -> PipelineStep {
    let add_types: Vec<&String> = add_type.into_iter().collect();
    let remove_types: Vec<&String> = remove_type.into_iter().collect();

    let mut hyperparams = IndexMap::new();
    hyperparams.insert("add_columns".to_string(), HyperValue::int_list(add_columns));
    hyperparams.insert("add_types".to_string(), HyperValue::string_list(add_types.as_slice()));
    hyperparams.insert(
        "remove_columns".to_string(),
        HyperValue::int_list(remove_columns),
    );
    hyperparams.insert(
        "remove_types".to_string(),
        HyperValue::string_list(remove_types.as_slice()),
    );

    PipelineStep {
        primitive: primitives::UPDATE_SEMANTIC_TYPES.to_primitive(),
        arguments: chained(input_ref),
        outputs: vec!["produce".to_string()],
        hyperparams,
    }
}

fn chained(input_ref: &str) -> IndexMap<String, String> {
    IndexMap::from([("inputs".to_string(), input_ref.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compiler::compile_user_dataset_plan;
    use crate::core::registry::semantic;
    use crate::dataset::types::Variable;

    fn scenario_a_plan() -> Plan {
        let vars: Vec<Variable> = [
            ("ordinal", "categorical"),
            ("categorical", "integer"),
            ("categorical", "integer"),
            ("categorical", "integer"),
        ]
        .iter()
        .enumerate()
        .map(|(i, (orig, typ))| Variable {
            name: format!("test_var_{i}"),
            index: i,
            original_type: orig.to_string(),
            var_type: typ.to_string(),
            ..Default::default()
        })
        .collect();
        compile_user_dataset_plan(
            "test_user_pipeline",
            "a test user pipeline",
            &vars,
            "test_target",
            &["test_var_0", "test_var_1", "test_var_3"],
            None,
        )
        .unwrap()
        .unwrap()
    }

    #[test]
    fn test_pp013_add_step_hyperparams() {
        let desc = lower(&scenario_a_plan());
        let hp = &desc.steps[0].hyperparams;
        assert_eq!(hp["add_columns"].as_ints(), Some(vec![1, 3]));
        assert_eq!(
            hp["add_types"].as_strings(),
            Some(vec![semantic::INTEGER.to_string()])
        );
        assert_eq!(hp["remove_columns"].as_ints(), Some(vec![]));
        assert_eq!(hp["remove_types"].as_strings(), Some(vec![String::new()]));
    }

    #[test]
    fn test_pp013_remove_step_hyperparams() {
        let desc = lower(&scenario_a_plan());
        let hp = &desc.steps[1].hyperparams;
        assert_eq!(hp["add_columns"].as_ints(), Some(vec![]));
        assert_eq!(hp["add_types"].as_strings(), Some(vec![String::new()]));
        assert_eq!(hp["remove_columns"].as_ints(), Some(vec![1, 3]));
        assert_eq!(
            hp["remove_types"].as_strings(),
            Some(vec![semantic::CATEGORICAL.to_string()])
        );
    }

    #[test]
    fn test_pp013_remove_columns_hyperparams() {
        let desc = lower(&scenario_a_plan());
        let step = &desc.steps[2];
        assert_eq!(step.primitive, primitives::REMOVE_COLUMNS.to_primitive());
        assert_eq!(step.hyperparams["resource_id"].as_str(), Some("0"));
        assert_eq!(step.hyperparams["columns"].as_ints(), Some(vec![2]));
    }

    #[test]
    fn test_pp013_data_references_chain() {
        let desc = lower(&scenario_a_plan());
        let refs: Vec<&str> = desc
            .steps
            .iter()
            .map(|s| s.arguments["inputs"].as_str())
            .collect();
        assert_eq!(refs, vec!["inputs.0", "steps.0.produce", "steps.1.produce"]);
        assert_eq!(desc.outputs[0].data, "steps.2.produce");
    }

    #[test]
    fn test_pp013_identity_preserved() {
        let plan = scenario_a_plan();
        let desc = lower(&plan);
        assert_eq!(desc.id, plan.id);
        assert_eq!(desc.name, "test_user_pipeline");
        assert_eq!(desc.inputs, plan.inputs);
    }

    #[test]
    fn test_pp013_explicit_arguments_kept() {
        let step = Step::Primitive(
            primitives::JOIN
                .step()
                .with_argument("left", "inputs.0")
                .with_argument("right", "inputs.1"),
        );
        let lowered = lower_step(&step, "steps.4.produce");
        assert_eq!(lowered.arguments["left"], "inputs.0");
        assert!(!lowered.arguments.contains_key("inputs"));
    }

    #[test]
    fn test_pp013_hyperparam_key_order() {
        let desc = lower(&scenario_a_plan());
        let keys: Vec<&str> = desc.steps[0].hyperparams.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["add_columns", "add_types", "remove_columns", "remove_types"]
        );
    }
}
