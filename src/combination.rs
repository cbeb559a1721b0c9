//! Derives combination groups from the color -> combination-id relation.

use std::collections::HashSet;

use crate::catalog::CatalogColor;

/// A group of catalog colors meant to work together. Derived from the
/// catalog at load time, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    pub id: u32,
    /// Members, sorted by name ascending. Never empty.
    pub colors: Vec<CatalogColor>,
}

/// Materialize every combination referenced by `colors`.
///
/// The catalog stores only the color -> combinations direction; this walks
/// it once and regroups. Member collection is a full scan per combination,
/// fine for a small static catalog. The result is sorted ascending by id
/// and does not depend on the input ordering; the processed set only
/// avoids duplicate work.
pub fn build(colors: &[CatalogColor]) -> Vec<Combination> {
    let mut processed: HashSet<u32> = HashSet::new();
    let mut combinations = Vec::new();

    for color in colors {
        for &combination_id in &color.combination_ids {
            if !processed.insert(combination_id) {
                continue;
            }

            let mut members: Vec<CatalogColor> = colors
                .iter()
                .filter(|c| c.combination_ids.contains(&combination_id))
                .cloned()
                .collect();
            if members.is_empty() {
                continue;
            }
            members.sort_by(|a, b| a.name.cmp(&b.name));

            combinations.push(Combination {
                id: combination_id,
                colors: members,
            });
        }
    }

    combinations.sort_by_key(|c| c.id);
    combinations
}
