use std::collections::hash_map;
use std::collections::{BTreeSet, HashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Feature, Location};

static NO_LOCATIONS: BTreeSet<Location> = BTreeSet::new();

/// Evidence index mapping each [`Feature`] to the set of [`Location`]s where it
/// was observed within one analysis scope.
///
/// A feature that is absent behaves exactly like a feature present with an
/// empty location set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatureTable {
    #[cfg_attr(feature = "serde", serde(with = "entries"))]
    entries: HashMap<Feature, BTreeSet<Location>>,
}

impl FeatureTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `feature` at every location in `locations`, replacing any
    /// evidence already recorded for it.
    #[must_use]
    pub fn set(
        mut self,
        feature: impl Into<Feature>,
        locations: impl IntoIterator<Item = Location>,
    ) -> Self {
        self.entries
            .insert(feature.into(), locations.into_iter().collect());
        self
    }

    /// Add a single observation of `feature` at `location`.
    pub fn insert(&mut self, feature: impl Into<Feature>, location: Location) {
        self.entries.entry(feature.into()).or_default().insert(location);
    }

    /// Mark `feature` as present with no evidence. Evaluates the same as absent.
    pub fn insert_empty(&mut self, feature: impl Into<Feature>) {
        self.entries.entry(feature.into()).or_default();
    }

    /// Raw lookup: `None` only when the feature was never recorded.
    #[must_use]
    pub fn get(&self, feature: &Feature) -> Option<&BTreeSet<Location>> {
        self.entries.get(feature)
    }

    /// Locations of `feature`, or the empty set when it is absent.
    #[must_use]
    pub fn locations(&self, feature: &Feature) -> &BTreeSet<Location> {
        self.entries.get(feature).unwrap_or(&NO_LOCATIONS)
    }

    /// Whether `feature` was observed at least once.
    #[must_use]
    pub fn contains(&self, feature: &Feature) -> bool {
        !self.locations(feature).is_empty()
    }

    /// Number of recorded features, including those with empty evidence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, Feature, BTreeSet<Location>> {
        self.entries.iter()
    }
}

impl<F, I> FromIterator<(F, I)> for FeatureTable
where
    F: Into<Feature>,
    I: IntoIterator<Item = Location>,
{
    fn from_iter<T: IntoIterator<Item = (F, I)>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<F, I> Extend<(F, I)> for FeatureTable
where
    F: Into<Feature>,
    I: IntoIterator<Item = Location>,
{
    fn extend<T: IntoIterator<Item = (F, I)>>(&mut self, iter: T) {
        for (feature, locations) in iter {
            self.entries
                .entry(feature.into())
                .or_default()
                .extend(locations);
        }
    }
}

impl<'a> IntoIterator for &'a FeatureTable {
    type Item = (&'a Feature, &'a BTreeSet<Location>);
    type IntoIter = hash_map::Iter<'a, Feature, BTreeSet<Location>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// JSON object keys must be strings, so the map travels as a list of pairs.
#[cfg(feature = "serde")]
mod entries {
    use std::collections::{BTreeSet, HashMap};

    use serde::{Deserialize, Deserializer, Serializer};

    use crate::{Feature, Location};

    pub(super) fn serialize<S: Serializer>(
        map: &HashMap<Feature, BTreeSet<Location>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(map.iter())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<Feature, BTreeSet<Location>>, D::Error> {
        let pairs: Vec<(Feature, BTreeSet<Location>)> = Vec::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}
