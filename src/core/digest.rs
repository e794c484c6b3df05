//! PP-009: BLAKE3 plan identity.
//!
//! A plan's id is derived from its name and steps, so identical compiles of
//! identical inputs always yield the same id.

use super::types::Step;

/// Hash a string. Returns `"blake3:{hex}"`.
pub fn hash_string(s: &str) -> String {
    format!("blake3:{}", blake3::hash(s.as_bytes()).to_hex())
}

/// Compute a composite hash from multiple components.
pub fn composite_hash(components: &[&str]) -> String {
    let mut hasher = blake3::Hasher::new();
    for c in components {
        hasher.update(c.as_bytes());
        hasher.update(b"\0");
    }
    format!("blake3:{}", hasher.finalize().to_hex())
}

/// Digest of a plan's name and its ordered steps.
pub fn plan_digest(name: &str, steps: &[Step]) -> String {
    let mut components = vec![name.to_string()];
    for step in steps {
        components.push(step_component(step));
    }
    let refs: Vec<&str> = components.iter().map(String::as_str).collect();
    composite_hash(&refs)
}

fn step_component(step: &Step) -> String {
    match step {
        Step::AddSemanticType {
            target_columns,
            type_id,
        } => format!("add\0{}\0{}", type_id, join_indices(target_columns)),
        Step::RemoveSemanticType {
            target_columns,
            type_id,
        } => format!("remove\0{}\0{}", type_id, join_indices(target_columns)),
        Step::RemoveColumns {
            resource_id,
            columns,
        } => format!("drop\0{}\0{}", resource_id, join_indices(columns)),
        Step::Primitive(p) => {
            let params = serde_json::to_string(&p.hyperparams).unwrap_or_default();
            let args = serde_json::to_string(&p.arguments).unwrap_or_default();
            hash_string(&format!(
                "primitive\0{}\0{}\0{}\0{}",
                p.primitive.id,
                p.outputs.join(","),
                args,
                params
            ))
        }
    }
}

fn join_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
