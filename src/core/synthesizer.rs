//! PP-005: Step synthesis: type diffs and dropped columns into ordered steps.
//!
//! Order is fixed:
//! 1. AddSemanticType for every diff group (new type)
//! 2. RemoveSemanticType for every diff group (old type)
//! 3. RemoveColumns, only when something is dropped
//!
//! Every retained column holds at least one semantic type between steps.
//! Removal runs last so earlier steps address the original column indices.

use super::diff::DiffSet;
use super::types::Step;

/// Synthesize the steps of a plan. Empty means nothing to do.
pub fn synthesize(diffs: &DiffSet, dropped: &[usize], resource_id: &str) -> Vec<Step> {
    let mut steps = Vec::new();
    if diffs.groups.is_empty() && dropped.is_empty() {
        return steps;
    }

    for group in &diffs.groups {
        steps.push(Step::AddSemanticType {
            target_columns: ascending(&group.indices),
            type_id: group.new_type_id.to_string(),
        });
    }
    for group in &diffs.groups {
        steps.push(Step::RemoveSemanticType {
            target_columns: ascending(&group.indices),
            type_id: group.old_type_id.to_string(),
        });
    }

    if !dropped.is_empty() {
        steps.push(Step::RemoveColumns {
            resource_id: resource_id.to_string(),
            columns: ascending(dropped),
        });
    }

    steps
}

fn ascending(indices: &[usize]) -> Vec<usize> {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diff::DiffGroup;
    use crate::core::registry::semantic;
    use crate::core::types::TypeDiff;

    fn homogeneous(indices: &[usize]) -> DiffSet {
        DiffSet {
            diffs: indices
                .iter()
                .map(|&index| TypeDiff {
                    index,
                    old_type_id: semantic::CATEGORICAL,
                    new_type_id: semantic::INTEGER,
                })
                .collect(),
            groups: vec![DiffGroup {
                old_type_id: semantic::CATEGORICAL,
                new_type_id: semantic::INTEGER,
                indices: indices.to_vec(),
            }],
        }
    }

    #[test]
    fn test_pp005_nothing_to_do() {
        assert!(synthesize(&DiffSet::default(), &[], "0").is_empty());
    }

    #[test]
    fn test_pp005_full_sequence() {
        let steps = synthesize(&homogeneous(&[1, 3]), &[2], "0");
        assert_eq!(
            steps,
            vec![
                Step::AddSemanticType {
                    target_columns: vec![1, 3],
                    type_id: semantic::INTEGER.to_string(),
                },
                Step::RemoveSemanticType {
                    target_columns: vec![1, 3],
                    type_id: semantic::CATEGORICAL.to_string(),
                },
                Step::RemoveColumns {
                    resource_id: "0".to_string(),
                    columns: vec![2],
                },
            ]
        );
    }

    #[test]
    fn test_pp005_drop_only() {
        let steps = synthesize(&DiffSet::default(), &[4, 0, 4], "learningData");
        assert_eq!(
            steps,
            vec![Step::RemoveColumns {
                resource_id: "learningData".to_string(),
                columns: vec![0, 4],
            }]
        );
    }

    #[test]
    fn test_pp005_diff_only_has_no_removal() {
        let steps = synthesize(&homogeneous(&[0]), &[], "0");
        assert_eq!(steps.len(), 2);
        assert!(!steps.iter().any(|s| matches!(s, Step::RemoveColumns { .. })));
    }

    #[test]
    fn test_pp005_heterogeneous_adds_before_removes() {
        let diffs = DiffSet {
            diffs: vec![],
            groups: vec![
                DiffGroup {
                    old_type_id: semantic::CATEGORICAL,
                    new_type_id: semantic::INTEGER,
                    indices: vec![0, 2],
                },
                DiffGroup {
                    old_type_id: semantic::TEXT,
                    new_type_id: semantic::CATEGORICAL,
                    indices: vec![1],
                },
            ],
        };
        let steps = synthesize(&diffs, &[3], "0");
        let kinds: Vec<String> = steps
            .iter()
            .map(|s| s.to_string().split(' ').next().unwrap_or_default().to_string())
            .collect();
        assert_eq!(
            kinds,
            vec!["ADD-TYPE", "ADD-TYPE", "REMOVE-TYPE", "REMOVE-TYPE", "REMOVE-COLUMNS"]
        );
        assert_eq!(
            steps[1],
            Step::AddSemanticType {
                target_columns: vec![1],
                type_id: semantic::CATEGORICAL.to_string(),
            }
        );
    }
}
