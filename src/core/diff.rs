//! PP-004: Type diff resolution for retained variables.
//!
//! Both classifications of every retained variable are resolved, in ascending
//! index order, before any diff is emitted. One unresolved label fails the
//! whole compile, even on a variable that would not have produced a diff.

use super::error::PlanError;
use super::registry::TypeRegistry;
use super::types::TypeDiff;
use crate::dataset::types::Variable;

/// Diffs sharing one `(old, new)` canonical pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffGroup {
    pub old_type_id: &'static str,
    pub new_type_id: &'static str,
    /// Ascending
    pub indices: Vec<usize>,
}

/// All type diffs of one compile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSet {
    /// Ascending by index
    pub diffs: Vec<TypeDiff>,
    /// Grouped by pair, in order of first appearance
    pub groups: Vec<DiffGroup>,
}

impl DiffSet {
    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    /// Indices of every diff, ascending.
    pub fn indices(&self) -> Vec<usize> {
        self.diffs.iter().map(|d| d.index).collect()
    }

    /// The `(old, new)` pair of the first group.
    pub fn representative(&self) -> Option<(&'static str, &'static str)> {
        self.groups.first().map(|g| (g.old_type_id, g.new_type_id))
    }

    /// True when all diffs share one pair.
    pub fn is_homogeneous(&self) -> bool {
        self.groups.len() <= 1
    }
}

/// Resolve a classification or fail with the variable that carried it.
fn resolve_label(
    registry: &TypeRegistry,
    variable: &Variable,
    label: &str,
) -> Result<&'static str, PlanError> {
    registry
        .resolve(label)
        .ok_or_else(|| PlanError::UnknownTypeMapping {
            variable: variable.name.clone(),
            label: label.to_string(),
        })
}

/// Compute the type diffs of the retained variables (index ordered).
pub fn resolve_diffs(
    retained: &[&Variable],
    registry: &TypeRegistry,
) -> Result<DiffSet, PlanError> {
    let mut set = DiffSet::default();

    for v in retained {
        let new_type_id = resolve_label(registry, v, &v.var_type)?;
        let old_type_id = resolve_label(registry, v, &v.original_type)?;
        if new_type_id == old_type_id {
            continue;
        }

        set.diffs.push(TypeDiff {
            index: v.index,
            old_type_id,
            new_type_id,
        });
        match set
            .groups
            .iter_mut()
            .find(|g| g.old_type_id == old_type_id && g.new_type_id == new_type_id)
        {
            Some(group) => group.indices.push(v.index),
            None => set.groups.push(DiffGroup {
                old_type_id,
                new_type_id,
                indices: vec![v.index],
            }),
        }
    }

    Ok(set)
}
