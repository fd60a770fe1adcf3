//! Adjacency view of the separation relation.
//!
//! Nodes are the distinct content names; links are the declared separation
//! pairs, each unordered pair reported once no matter which side (or both)
//! declared it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::Content;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
}

impl Link {
    /// Check if this link joins `a` and `b` in either direction
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyView {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

/// Derive the graph view of `contents`.
///
/// Self references and references to names missing from `contents` are
/// skipped. Links keep the orientation of their first declaration.
pub fn compute_adjacency_view(contents: &[Content]) -> AdjacencyView {
    let known: HashSet<&str> = contents.iter().map(|c| c.name.as_str()).collect();

    let nodes = contents
        .iter()
        .map(|c| Node {
            name: c.name.clone(),
            color: c.color.clone(),
        })
        .collect();

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut links = Vec::new();

    for content in contents {
        for other in &content.separation {
            if *other == content.name || !known.contains(other.as_str()) {
                continue;
            }
            let key = if content.name.as_str() < other.as_str() {
                (content.name.as_str(), other.as_str())
            } else {
                (other.as_str(), content.name.as_str())
            };
            if seen.insert(key) {
                links.push(Link {
                    source: content.name.clone(),
                    target: other.clone(),
                });
            }
        }
    }

    AdjacencyView { nodes, links }
}
