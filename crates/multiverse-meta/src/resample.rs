//! Hierarchical resampling helpers
//!
//! Resampling happens at the level of hierarchy units (studies, clusters),
//! never individual effect rows: drawing a unit brings all of its effect
//! observations along, preserving the dependence structure within units.

use rand::rngs::StdRng;
use rand::Rng;

/// Group row indices by their hierarchy key, in first-appearance order
///
/// First-appearance order keeps the grouping (and therefore the RNG draw
/// sequence) deterministic for a fixed input.
pub(crate) fn group_rows(rows: &[usize], keys: &[String]) -> Vec<Vec<usize>> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for &row in rows {
        let key = keys[row].as_str();
        match order.iter().position(|&k| k == key) {
            Some(slot) => groups[slot].push(row),
            None => {
                order.push(key);
                groups.push(vec![row]);
            }
        }
    }
    groups
}

/// Draw `groups.len()` groups with replacement, concatenating their rows
pub(crate) fn draw_groups(groups: &[Vec<usize>], rng: &mut StdRng) -> Vec<usize> {
    let mut drawn = Vec::new();
    for _ in 0..groups.len() {
        drawn.extend_from_slice(&groups[rng.gen_range(0..groups.len())]);
    }
    drawn
}
