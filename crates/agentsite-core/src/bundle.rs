//! File bundles prepared for deployment.

use std::collections::BTreeMap;

/// Mapping of relative filename to content for one site deployment.
///
/// Text assets (HTML/CSS/JS) hold raw text; binary assets (images) hold
/// content that was base64-encoded upstream. Which encoding applies is
/// derived from the file extension when the bundle is encoded for the wire,
/// never stored here. Iteration is sorted by filename, so downstream output
/// order is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileBundle {
    files: BTreeMap<String, String>,
}

impl FileBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any previous content under the same name.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.files.insert(name.into(), content.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files in sorted filename order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files
            .iter()
            .map(|(name, content)| (name.as_str(), content.as_str()))
    }

    /// Absorb all files from `other`, overwriting on name collisions.
    pub fn merge(&mut self, other: FileBundle) {
        self.files.extend(other.files);
    }
}

impl FromIterator<(String, String)> for FileBundle {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}
