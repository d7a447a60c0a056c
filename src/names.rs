//! Display names and categories for wildcards
//!
//! Labels depend on the whole live set: adding or removing one wildcard can
//! change how another is shown, so the table is always rebuilt from scratch.
//!
//! Resolution order:
//! 1. The last path segment, when no other wildcard shares it.
//! 2. `"<last> (<category>)"` for wildcards whose last segment is shared.
//!    A single-segment id has no category and keeps its bare name.
//! 3. If labels still collide, the first id (in identifier order) keeps the
//!    label and each later one gets an occurrence counter: `"<label> (2)"`.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::wildcards::WildcardId;

/// Resolved presentation of a single wildcard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub display_name: String,
    pub category: String,
}

/// Display name table for one refresh
pub type NameTable = HashMap<WildcardId, ResolvedName>;

/// Compute display names and categories for every identifier in `ids`.
#[must_use]
pub fn resolve_names(ids: &BTreeSet<WildcardId>) -> NameTable {
    let mut base_counts: HashMap<&str, usize> = HashMap::new();
    for id in ids {
        *base_counts.entry(id.last_segment()).or_default() += 1;
    }

    let mut labels: Vec<(&WildcardId, String)> = ids
        .iter()
        .map(|id| {
            let base = id.last_segment();
            let category = id.category();
            let label = if base_counts[base] > 1 && !category.is_empty() {
                format!("{base} ({category})")
            } else {
                base.to_string()
            };
            (id, label)
        })
        .collect();

    let mut label_counts: HashMap<String, usize> = HashMap::new();
    for (_, label) in &labels {
        *label_counts.entry(label.clone()).or_default() += 1;
    }

    let mut taken: HashSet<String> = labels.iter().map(|(_, label)| label.clone()).collect();
    let mut seen: HashSet<String> = HashSet::new();

    for (_, label) in &mut labels {
        if label_counts[label.as_str()] < 2 || seen.insert(label.clone()) {
            continue;
        }
        let mut occurrence = 2;
        let mut candidate = format!("{label} ({occurrence})");
        while taken.contains(&candidate) {
            occurrence += 1;
            candidate = format!("{label} ({occurrence})");
        }
        taken.insert(candidate.clone());
        *label = candidate;
    }

    labels
        .into_iter()
        .map(|(id, display_name)| {
            let resolved = ResolvedName {
                display_name,
                category: id.category().to_string(),
            };
            (id.clone(), resolved)
        })
        .collect()
}
