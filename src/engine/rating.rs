//! Aggregation and sequence rating.
//!
//! A sequence is rated by how far the gaps between consecutive occurrences of
//! every item stray from that item's ideal spacing. The sequence is circular:
//! the gap after the last occurrence wraps around to the first. Lower is better.

use std::collections::HashMap;

use crate::domain::Content;

/// Occurrence positions of one distinct item in a sequence
struct Group<'a> {
    content: &'a Content,
    positions: Vec<usize>,
}

impl Group<'_> {
    fn count(&self) -> f64 {
        self.positions.len() as f64
    }
}

/// Group a sequence by name in first-seen order.
fn group_by_name<'a>(sequence: &[&'a Content]) -> Vec<Group<'a>> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<Group<'a>> = Vec::new();

    for (pos, &content) in sequence.iter().enumerate() {
        match index.get(content.name.as_str()) {
            Some(&g) => groups[g].positions.push(pos),
            None => {
                index.insert(content.name.as_str(), groups.len());
                groups.push(Group {
                    content,
                    positions: vec![pos],
                });
            }
        }
    }

    groups
}

/// Aggregated content view of a sequence.
///
/// One entry per distinct name, cloned from its first occurrence, with
/// `saturation` replaced by the number of occurrences in `sequence`.
pub fn aggregate(sequence: &[&Content]) -> Vec<Content> {
    group_by_name(sequence)
        .into_iter()
        .map(|g| {
            let mut content = g.content.clone();
            content.saturation = g.positions.len() as u32;
            content
        })
        .collect()
}

/// Ideal gap before each occurrence of `groups[target]`: the load of every
/// other item split evenly across the target's occurrences.
fn ideal_spacing(groups: &[Group<'_>], target: usize) -> f64 {
    let others: f64 = groups
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != target)
        .map(|(_, g)| g.content.duration * g.count())
        .sum();
    others / groups[target].count()
}

fn span_duration(sequence: &[&Content]) -> f64 {
    sequence.iter().map(|c| c.duration).sum()
}

/// Mean absolute deviation of the item's gaps from `ideal`.
fn spacing_error(sequence: &[&Content], positions: &[usize], ideal: f64) -> f64 {
    let (Some(&first), Some(&last)) = (positions.first(), positions.last()) else {
        return 0.0;
    };

    let wrap = span_duration(&sequence[last + 1..]) + span_duration(&sequence[..first]);
    let mut error = (ideal - wrap).abs();

    for pair in positions.windows(2) {
        let gap = span_duration(&sequence[pair[0] + 1..pair[1]]);
        error += (ideal - gap).abs();
    }

    error / positions.len() as f64
}

/// Rate a candidate sequence. Pure and deterministic.
pub fn rate(sequence: &[&Content]) -> f64 {
    let groups = group_by_name(sequence);

    groups
        .iter()
        .enumerate()
        .map(|(i, g)| spacing_error(sequence, &g.positions, ideal_spacing(&groups, i)))
        .sum()
}
