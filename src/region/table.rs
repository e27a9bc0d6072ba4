//! Country code → region label lookup.

use hashbrown::HashMap;
use serde::Deserialize;

use crate::error::{Error, Result};

/// A named group of country codes sharing one label
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionSet {
    pub name: String,
    pub label: char,
    pub codes: Vec<String>,
}

impl RegionSet {
    pub fn new(name: &str, label: char, codes: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            label,
            codes: codes.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Immutable classification table. Built once, then shared read-only.
#[derive(Debug, Clone)]
pub struct RegionTable {
    sets: Vec<RegionSet>,
    /// code -> index into `sets`
    lookup: HashMap<String, usize>,
    default: char,
}

impl RegionTable {
    /// Build a table from region sets. Fails if a code appears in two sets.
    pub fn new(sets: Vec<RegionSet>, default: char) -> Result<Self> {
        let mut lookup: HashMap<String, usize> = HashMap::new();

        for (idx, set) in sets.iter().enumerate() {
            for code in &set.codes {
                if let Some(&prev) = lookup.get(code) {
                    // Repeats inside one set are harmless
                    if prev == idx {
                        continue;
                    }
                    return Err(Error::OverlappingRegion {
                        code: code.clone(),
                        first: sets[prev].name.clone(),
                        second: set.name.clone(),
                    });
                }
                lookup.insert(code.clone(), idx);
            }
        }

        Ok(Self::from_parts(sets, lookup, default))
    }

    pub(super) fn from_parts(
        sets: Vec<RegionSet>,
        lookup: HashMap<String, usize>,
        default: char,
    ) -> Self {
        Self {
            sets,
            lookup,
            default,
        }
    }

    /// Region label for a country code. Total: unknown, empty or malformed
    /// codes get the default label.
    pub fn classify(&self, code: &str) -> char {
        self.lookup
            .get(code)
            .map(|&idx| self.sets[idx].label)
            .unwrap_or(self.default)
    }

    /// Label for a feature id that may be missing
    pub fn classify_id(&self, id: Option<&str>) -> char {
        id.map_or(self.default, |code| self.classify(code))
    }

    pub fn default_label(&self) -> char {
        self.default
    }

    pub fn sets(&self) -> &[RegionSet] {
        &self.sets
    }

    /// Every label this table can produce, default included
    pub fn labels(&self) -> impl Iterator<Item = char> + '_ {
        self.sets
            .iter()
            .map(|s| s.label)
            .chain(std::iter::once(self.default))
    }

    /// Name of the set holding `code`, if any
    pub fn region_name(&self, code: &str) -> Option<&str> {
        self.lookup.get(code).map(|&idx| self.sets[idx].name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> RegionTable {
        RegionTable::new(
            vec![
                RegionSet::new("north", 'N', &["USA", "CAN"]),
                RegionSet::new("south", 'S', &["BRA"]),
            ],
            'A',
        )
        .unwrap()
    }

    #[test]
    fn test_classify_known_codes() {
        let table = small_table();
        assert_eq!(table.classify("USA"), 'N');
        assert_eq!(table.classify("CAN"), 'N');
        assert_eq!(table.classify("BRA"), 'S');
        assert_eq!(table.region_name("BRA"), Some("south"));
    }

    #[test]
    fn test_classify_is_total() {
        let table = small_table();
        for code in ["", "usa", "XYZ", "-99", "🌍", "USA "] {
            assert_eq!(table.classify(code), 'A');
        }
        assert_eq!(table.classify_id(None), 'A');
        assert_eq!(table.classify_id(Some("USA")), 'N');
    }

    #[test]
    fn test_overlap_rejected() {
        let err = RegionTable::new(
            vec![
                RegionSet::new("europe", 'E', &["FRA", "BLR"]),
                RegionSet::new("eurasia", 'R', &["RUS", "BLR"]),
            ],
            'A',
        )
        .unwrap_err();

        match err {
            Error::OverlappingRegion {
                code,
                first,
                second,
            } => {
                assert_eq!(code, "BLR");
                assert_eq!(first, "europe");
                assert_eq!(second, "eurasia");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_within_set_allowed() {
        let table =
            RegionTable::new(vec![RegionSet::new("north", 'N', &["USA", "USA"])], 'A').unwrap();
        assert_eq!(table.classify("USA"), 'N');
    }

    #[test]
    fn test_labels_include_default() {
        let labels: Vec<char> = small_table().labels().collect();
        assert_eq!(labels, vec!['N', 'S', 'A']);
    }
}
