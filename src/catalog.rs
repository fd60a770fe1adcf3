//! Content catalog: the authoritative content list plus constraint toggles.
//!
//! The catalog owns every mutation of names and separation sets so the
//! engine can treat its input as read-only. Separation is kept symmetric:
//! linking A to B records the rule on both sides, and removing a content
//! strips every reference to it.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::{ConstraintKind, ConstraintModes, Content, DEFAULT_COLOR, normalize_name, random_color};
use crate::engine::{ComputeOptions, SequenceSummary, compute};
use crate::error::{PlaylistError, Result};
use crate::graph::{AdjacencyView, compute_adjacency_view};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub contents: Vec<Content>,
    #[serde(default)]
    pub modes: ConstraintModes,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = normalize_name(name);
        self.contents.iter().position(|c| c.name == name)
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.position(name)
            .ok_or_else(|| PlaylistError::ContentNotFound(normalize_name(name)))
    }

    /// Look up a content by (unnormalized) name
    pub fn get(&self, name: &str) -> Option<&Content> {
        self.position(name).map(|i| &self.contents[i])
    }

    /// Sum of saturations: the length of a complete sequence
    pub fn total_saturation(&self) -> usize {
        self.contents.iter().map(|c| c.saturation as usize).sum()
    }

    /// Build a catalog from an imported content list. Contents without a
    /// color get a random one; separation is made symmetric by `add`.
    pub fn import<R: Rng + ?Sized>(contents: Vec<Content>, modes: ConstraintModes, rng: &mut R) -> Result<Self> {
        let mut catalog = Self {
            contents: Vec::with_capacity(contents.len()),
            modes,
        };
        for mut content in contents {
            if !content.has_color() {
                content.color = random_color(rng);
            }
            catalog.add(content)?;
        }
        log::info!("Imported {} contents", catalog.len());
        Ok(catalog)
    }

    /// Add a content. Separation is linked both ways with existing contents,
    /// whichever side declared it; unknown names are kept but stay inert.
    pub fn add(&mut self, mut content: Content) -> Result<()> {
        content.name = normalize_name(&content.name);
        content.separation = content.separation.iter().map(|n| normalize_name(n)).collect();
        content.validate()?;

        if self.position(&content.name).is_some() {
            return Err(PlaylistError::DuplicateContent(content.name));
        }
        if !content.has_color() {
            content.color = DEFAULT_COLOR.to_string();
        }

        for peer in self.contents.iter_mut() {
            if content.separation.contains(&peer.name) {
                peer.separation.insert(content.name.clone());
            }
            if peer.separation.contains(&content.name) {
                content.separation.insert(peer.name.clone());
            }
        }

        log::debug!("Added content {}", content.name);
        self.contents.push(content);
        Ok(())
    }

    /// Change duration and/or saturation of an existing content
    pub fn edit(&mut self, name: &str, duration: Option<f64>, saturation: Option<u32>) -> Result<()> {
        let index = self.require(name)?;

        let mut updated = self.contents[index].clone();
        if let Some(duration) = duration {
            updated.duration = duration;
        }
        if let Some(saturation) = saturation {
            updated.saturation = saturation;
        }
        updated.validate()?;

        self.contents[index] = updated;
        Ok(())
    }

    /// Remove a content and every separation reference to it
    pub fn remove(&mut self, name: &str) -> Result<Content> {
        let index = self.require(name)?;
        let removed = self.contents.remove(index);

        for content in self.contents.iter_mut() {
            content.separation.remove(&removed.name);
        }

        log::debug!("Removed content {}", removed.name);
        Ok(removed)
    }

    /// Rename a content: remove it and add it back under the new name with
    /// the same attributes and links.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        let index = self.require(old)?;
        let new_name = normalize_name(new);

        if self.position(&new_name).is_some() {
            return Err(PlaylistError::DuplicateContent(new_name));
        }

        let current = &self.contents[index];
        let old_name = current.name.clone();
        let peers: HashSet<String> = self
            .contents
            .iter()
            .filter(|c| c.name != old_name && (c.is_separated_from(&old_name) || current.is_separated_from(&c.name)))
            .map(|c| c.name.clone())
            .collect();

        // Unknown names ride along; known peers are re-linked by `add`.
        let mut renamed = current.clone();
        renamed.separation = current
            .separation
            .iter()
            .filter(|n| **n != new_name && self.position(n).is_none())
            .cloned()
            .chain(peers)
            .collect();
        renamed.name = new_name;
        renamed.validate()?;

        self.remove(&old_name)?;
        self.add(renamed)
    }

    /// Declare A and B must not be adjacent (both sides)
    pub fn link(&mut self, a: &str, b: &str) -> Result<()> {
        let (ia, ib) = self.pair(a, b)?;
        let (name_a, name_b) = (self.contents[ia].name.clone(), self.contents[ib].name.clone());
        self.contents[ia].separation.insert(name_b);
        self.contents[ib].separation.insert(name_a);
        Ok(())
    }

    /// Drop the separation between A and B. Returns whether one existed.
    pub fn unlink(&mut self, a: &str, b: &str) -> Result<bool> {
        let (ia, ib) = self.pair(a, b)?;
        let (name_a, name_b) = (self.contents[ia].name.clone(), self.contents[ib].name.clone());
        let removed_a = self.contents[ia].separation.remove(&name_b);
        let removed_b = self.contents[ib].separation.remove(&name_a);
        Ok(removed_a || removed_b)
    }

    /// Flip the separation between A and B. Returns true when now linked.
    pub fn toggle_link(&mut self, a: &str, b: &str) -> Result<bool> {
        if self.unlink(a, b)? {
            Ok(false)
        } else {
            self.link(a, b)?;
            Ok(true)
        }
    }

    fn pair(&self, a: &str, b: &str) -> Result<(usize, usize)> {
        let ia = self.require(a)?;
        let ib = self.require(b)?;
        if ia == ib {
            return Err(PlaylistError::InvalidContent(format!(
                "{}: cannot be separated from itself",
                self.contents[ia].name
            )));
        }
        Ok((ia, ib))
    }

    /// Toggle a constraint mode
    pub fn set_mode(&mut self, kind: ConstraintKind, enabled: bool) {
        self.modes.set(kind, enabled);
    }

    /// Check every invariant the engine relies on
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for content in &self.contents {
            content.validate()?;
            if !names.insert(content.name.as_str()) {
                return Err(PlaylistError::DuplicateContent(content.name.clone()));
            }
        }
        Ok(())
    }

    /// Validate and run the engine with this catalog's modes
    pub fn compute(&self, options: ComputeOptions) -> Result<SequenceSummary> {
        self.validate()?;
        let options = ComputeOptions {
            modes: self.modes,
            ..options
        };
        Ok(compute(&self.contents, &options))
    }

    pub fn adjacency_view(&self) -> AdjacencyView {
        compute_adjacency_view(&self.contents)
    }
}
