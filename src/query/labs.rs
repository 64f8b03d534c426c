//! Lab history filtering.

use std::collections::{HashMap, HashSet};

use crate::models::LabResult;

/// Parse a comma-separated `names` parameter into a case-folded set.
///
/// Returns `None` when the parameter is absent or holds no usable names,
/// which means "every tracked test".
pub fn parse_names(raw: Option<&str>) -> Option<HashSet<String>> {
    let names: HashSet<String> = raw?
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_lowercase)
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

/// Most-recent-first view of `history`, restricted to `names` and capped at
/// `last_n` entries per test name.
pub fn select_labs(
    history: &[LabResult],
    names: Option<&HashSet<String>>,
    last_n: Option<usize>,
) -> Vec<LabResult> {
    let mut selected: Vec<&LabResult> = history
        .iter()
        .filter(|lab| names.map_or(true, |wanted| wanted.contains(&lab.name.to_lowercase())))
        .collect();

    selected.sort_by(|a, b| b.collected_at.cmp(&a.collected_at));

    if let Some(limit) = last_n {
        let mut seen: HashMap<String, usize> = HashMap::new();
        selected.retain(|lab| {
            let count = seen.entry(lab.name.to_lowercase()).or_insert(0);
            *count += 1;
            *count <= limit
        });
    }

    selected.into_iter().cloned().collect()
}

/// Latest result for one test, folded the same way as [`parse_names`].
pub fn latest<'a>(history: &'a [LabResult], name: &str) -> Option<&'a LabResult> {
    let wanted = name.to_lowercase();
    history
        .iter()
        .filter(|lab| lab.name.to_lowercase() == wanted)
        .max_by_key(|lab| lab.collected_at)
}
