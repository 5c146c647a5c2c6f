use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classifier::ClassIndex;
use crate::error::{Error, Result};

/// Class index to disease name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiseaseLabels(BTreeMap<ClassIndex, String>);

impl DiseaseLabels {
    pub fn new(labels: BTreeMap<ClassIndex, String>) -> Self {
        Self(labels)
    }

    pub fn get(&self, class: ClassIndex) -> Option<&str> {
        self.0.get(&class).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }

    pub fn classes(&self) -> impl Iterator<Item = ClassIndex> + '_ {
        self.0.keys().copied()
    }

    /// Labelled classes that do not appear in `classes`.
    pub fn unused(&self, classes: &[ClassIndex]) -> Vec<ClassIndex> {
        self.classes()
            .filter(|class| !classes.contains(class))
            .collect()
    }

    /// Fail on the first class that has no label.
    pub fn ensure_covers(&self, classes: &[ClassIndex]) -> Result<()> {
        match classes.iter().find(|class| !self.0.contains_key(*class)) {
            Some(missing) => Err(Error::MissingLabel(*missing)),
            None => Ok(()),
        }
    }
}

impl FromIterator<(ClassIndex, String)> for DiseaseLabels {
    fn from_iter<I: IntoIterator<Item = (ClassIndex, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
