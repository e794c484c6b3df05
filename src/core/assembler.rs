//! PP-007: Plan assembly: steps plus pipeline identity into a `Plan`.

use super::digest;
use super::types::{PipelineInput, PipelineOutput, Plan, Step};

/// Wraps synthesized steps with name, description, inputs, and outputs.
#[derive(Debug, Clone)]
pub struct PlanAssembler {
    name: String,
    description: String,
    inputs: Vec<String>,
}

impl PlanAssembler {
    /// Assembler with the single standard `inputs` declaration.
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            inputs: vec!["inputs".to_string()],
        }
    }

    /// Replace the input declarations (multi-dataset pipelines).
    pub fn with_inputs(mut self, names: &[&str]) -> Self {
        self.inputs = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Build the plan. No steps means no plan: nothing needs transforming.
    pub fn assemble(&self, steps: Vec<Step>) -> Option<Plan> {
        let last = steps.last()?;
        let outputs = vec![PipelineOutput {
            name: "outputs".to_string(),
            data: format!("steps.{}.{}", steps.len() - 1, last.output_method()),
        }];

        Some(Plan {
            id: digest::plan_digest(&self.name, &steps),
            name: self.name.clone(),
            description: self.description.clone(),
            inputs: self
                .inputs
                .iter()
                .map(|name| PipelineInput { name: name.clone() })
                .collect(),
            outputs,
            steps,
        })
    }
}
