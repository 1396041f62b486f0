//! Resolving place names to locations.
//!
//! The engine consumes a fully resolved city set; how names become
//! coordinates is a collaborator's concern (typically a network geocoder).
//! [`LocationProvider`] is that boundary. [`TableProvider`] is the in-memory
//! implementation for callers that already hold coordinates, and for tests.

use crate::error::UnresolvedLocation;
use crate::geo::Location;
use std::collections::HashMap;

/// Resolves place names to [`Location`]s.
pub trait LocationProvider {
    /// Resolves a single name.
    fn locate(&self, name: &str) -> Result<Location, UnresolvedLocation>;

    /// Resolves every name, failing on the first one that cannot be
    /// resolved. The engine never seeds from a partial city set.
    fn locate_all(&self, names: &[&str]) -> Result<Vec<Location>, UnresolvedLocation> {
        names.iter().map(|name| self.locate(name)).collect()
    }
}

/// A fixed name → location table.
#[derive(Debug, Clone, Default)]
pub struct TableProvider {
    entries: HashMap<String, Location>,
}

impl TableProvider {
    /// Builds a provider from a list of known locations, keyed by label.
    pub fn new(locations: impl IntoIterator<Item = Location>) -> Self {
        Self {
            entries: locations
                .into_iter()
                .map(|loc| (loc.label.clone(), loc))
                .collect(),
        }
    }
}

impl LocationProvider for TableProvider {
    fn locate(&self, name: &str) -> Result<Location, UnresolvedLocation> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| UnresolvedLocation { name: name.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> TableProvider {
        TableProvider::new([
            Location::new(37.39, -5.98, "Sevilla"),
            Location::new(36.53, -6.29, "Cadiz"),
        ])
    }

    #[test]
    fn test_locate_known_name() {
        let loc = provider().locate("Cadiz").unwrap();
        assert_eq!(loc.label, "Cadiz");
        assert!((loc.latitude - 36.53).abs() < 1e-9);
    }

    #[test]
    fn test_locate_unknown_name() {
        let err = provider().locate("Atlantis").unwrap_err();
        assert_eq!(err.name, "Atlantis");
    }

    #[test]
    fn test_locate_all_preserves_order() {
        let locs = provider().locate_all(&["Cadiz", "Sevilla"]).unwrap();
        let labels: Vec<&str> = locs.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["Cadiz", "Sevilla"]);
    }

    #[test]
    fn test_locate_all_fails_fast() {
        let err = provider()
            .locate_all(&["Sevilla", "Atlantis", "Cadiz"])
            .unwrap_err();
        assert_eq!(err.name, "Atlantis");
    }
}
