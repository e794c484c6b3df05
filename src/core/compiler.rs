//! PP-012: User dataset plan compilation.
//!
//! variables → retention → type diffs → step synthesis → plan assembly.
//! Returns `Ok(None)` when the selection and typing already match the
//! dataset, and an error (never a partial plan) on an unmapped label.

use super::assembler::PlanAssembler;
use super::error::PlanError;
use super::registry::{TypeRegistry, STANDARD};
use super::types::Plan;
use super::{diff, retention, synthesizer};
use crate::dataset::request::{CompileRequest, DEFAULT_RESOURCE_ID};
use crate::dataset::types::Variable;

/// Compile a user dataset plan against the standard registry.
///
/// Column removal targets `resource_id`, or `"0"` when none is given.
pub fn compile_user_dataset_plan<S: AsRef<str>>(
    name: &str,
    description: &str,
    variables: &[Variable],
    target: &str,
    selected_features: &[S],
    resource_id: Option<&str>,
) -> Result<Option<Plan>, PlanError> {
    compile_with_registry(
        &STANDARD,
        name,
        description,
        variables,
        target,
        selected_features,
        resource_id,
    )
}

/// Compile a parsed request file.
pub fn compile_request(request: &CompileRequest) -> Result<Option<Plan>, PlanError> {
    let resource_id = request.primary_resource_id();
    compile_user_dataset_plan(
        &request.name,
        &request.description,
        request.variables(),
        &request.target,
        request.features.as_slice(),
        Some(&resource_id),
    )
}

/// Compile against an explicit registry.
pub fn compile_with_registry<S: AsRef<str>>(
    registry: &TypeRegistry,
    name: &str,
    description: &str,
    variables: &[Variable],
    target: &str,
    selected_features: &[S],
    resource_id: Option<&str>,
) -> Result<Option<Plan>, PlanError> {
    let partition = retention::classify(variables, target, selected_features);
    tracing::debug!(
        retained = partition.retained.len(),
        dropped = partition.dropped.len(),
        "classified variables"
    );

    let diffs = diff::resolve_diffs(&partition.retained, registry)?;
    if diffs.is_homogeneous() {
        if let Some((old, new)) = diffs.representative() {
            tracing::debug!(diffs = diffs.diffs.len(), old, new, "type diffs");
        }
    } else {
        tracing::debug!(groups = diffs.groups.len(), "heterogeneous type diffs");
    }

    let resource_id = resource_id.unwrap_or(DEFAULT_RESOURCE_ID);
    let steps = synthesizer::synthesize(&diffs, &partition.dropped, resource_id);
    let plan = PlanAssembler::new(name, description).assemble(steps);

    match &plan {
        Some(p) => tracing::info!(pipeline = name, steps = p.steps.len(), id = %p.id, "compiled plan"),
        None => tracing::info!(pipeline = name, "no transformation required"),
    }
    Ok(plan)
}
