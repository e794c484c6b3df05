//! PP-003: Retention: split variables into retained and dropped by name.
//!
//! A variable is retained iff it is the target or a selected feature. No type
//! lookups happen here: a dropped column with an unrecognized classification
//! must never fail the compile.

use crate::dataset::types::Variable;
use std::collections::HashSet;

/// Partition of a variable list, both halves in ascending index order.
#[derive(Debug, Clone, Default)]
pub struct Retention<'a> {
    pub retained: Vec<&'a Variable>,
    pub dropped: Vec<usize>,
}

/// Classify every variable as retained or dropped.
pub fn classify<'a, S: AsRef<str>>(
    variables: &'a [Variable],
    target: &str,
    selected_features: &[S],
) -> Retention<'a> {
    let selected: HashSet<&str> = selected_features.iter().map(AsRef::as_ref).collect();

    let mut ordered: Vec<&Variable> = variables.iter().collect();
    ordered.sort_by_key(|v| v.index);

    let mut retention = Retention::default();
    for v in ordered {
        if v.name == target || selected.contains(v.name.as_str()) {
            retention.retained.push(v);
        } else {
            retention.dropped.push(v.index);
        }
    }
    retention.dropped.dedup();
    retention
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(index: usize, name: &str) -> Variable {
        Variable {
            name: name.to_string(),
            index,
            ..Default::default()
        }
    }

    #[test]
    fn test_pp003_target_and_features_retained() {
        let vars = vec![var(0, "a"), var(1, "b"), var(2, "c"), var(3, "label")];
        let r = classify(&vars, "label", &["a", "c"]);
        let kept: Vec<usize> = r.retained.iter().map(|v| v.index).collect();
        assert_eq!(kept, vec![0, 2, 3]);
        assert_eq!(r.dropped, vec![1]);
    }

    #[test]
    fn test_pp003_index_order_not_input_order() {
        let vars = vec![var(3, "d"), var(0, "a"), var(2, "c"), var(1, "b")];
        let r = classify(&vars, "none", &["d", "a"]);
        let kept: Vec<usize> = r.retained.iter().map(|v| v.index).collect();
        assert_eq!(kept, vec![0, 3]);
        assert_eq!(r.dropped, vec![1, 2]);
    }

    #[test]
    fn test_pp003_nothing_selected_drops_all() {
        let vars = vec![var(0, "a"), var(1, "b")];
        let none: [&str; 0] = [];
        let r = classify(&vars, "missing", &none);
        assert!(r.retained.is_empty());
        assert_eq!(r.dropped, vec![0, 1]);
    }

    #[test]
    fn test_pp003_unmappable_types_ignored() {
        let mut v = var(0, "junk");
        v.var_type = "no-such-type".to_string();
        v.original_type = "also-bogus".to_string();
        let vars = vec![v];
        let r = classify(&vars, "t", &["other"]);
        assert_eq!(r.dropped, vec![0]);
    }

    #[test]
    fn test_pp003_partition_is_complete() {
        let vars: Vec<Variable> = (0..10).map(|i| var(i, &format!("v{i}"))).collect();
        let r = classify(&vars, "v9", &["v1", "v4", "v5"]);
        assert_eq!(r.retained.len() + r.dropped.len(), vars.len());
    }
}
