//! Per-camera detection results.

use crate::inventory::region::Region;

/// Output of one detector pass over one camera frame: for each class, the
/// regions where its color was found.
///
/// Classes keep the order in which they were inserted, which is the order the
/// color ranges were configured in. A class missing from the result counts as
/// zero detections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionResult {
    classes: Vec<(String, Vec<Region>)>,
}

impl DetectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the regions of a class, replacing any earlier entry in place.
    pub fn insert(&mut self, class: impl Into<String>, regions: Vec<Region>) {
        let class = class.into();
        match self.classes.iter_mut().find(|(name, _)| *name == class) {
            Some((_, existing)) => *existing = regions,
            None => self.classes.push((class, regions)),
        }
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with(mut self, class: impl Into<String>, regions: Vec<Region>) -> Self {
        self.insert(class, regions);
        self
    }

    pub fn regions(&self, class: &str) -> &[Region] {
        self.classes
            .iter()
            .find(|(name, _)| name == class)
            .map(|(_, regions)| regions.as_slice())
            .unwrap_or(&[])
    }

    /// Number of regions for `class`, 0 when the class is absent.
    pub fn count(&self, class: &str) -> usize {
        self.regions(class).len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Region])> {
        self.classes
            .iter()
            .map(|(name, regions)| (name.as_str(), regions.as_slice()))
    }

    /// Number of classes present, including those with no regions.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Regions across every class.
    pub fn total_regions(&self) -> usize {
        self.classes.iter().map(|(_, regions)| regions.len()).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<Region>)> for DetectionResult {
    fn from_iter<I: IntoIterator<Item = (S, Vec<Region>)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (class, regions) in iter {
            result.insert(class, regions);
        }
        result
    }
}
