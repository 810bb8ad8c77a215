use crate::model::{EdgeRecord, RankedTarget};
use std::collections::HashMap;

/// Most-linked-to pages by raw record count.
///
/// Duplicate records are counted, unlike graph in-degree. Ties keep the order in
/// which targets were first seen. At most `top_n` entries are returned.
pub fn rank_targets(edges: &[EdgeRecord], top_n: usize) -> Vec<RankedTarget> {
    let mut counts: Vec<RankedTarget> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for edge in edges {
        match index.get(edge.target.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(edge.target.as_str(), counts.len());
                counts.push(RankedTarget {
                    target: edge.target.clone(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so first-seen order survives among equal counts
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);
    counts
}
