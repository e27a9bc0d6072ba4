//! Built-in region sets used when no `[regions]` table is configured.

use super::{RegionSet, RegionTable};

/// Label for everything not listed: Middle East, South Asia, unknown codes
pub const DEFAULT_LABEL: char = 'A';

const NORTH_AMERICA: &[&str] = &[
    "USA", "CAN", "MEX", "GRL", "CUB", "DOM", "HTI", "JAM", "PRI", "BHS",
];

const SOUTH_AMERICA: &[&str] = &[
    "BRA", "ARG", "PER", "COL", "BOL", "VEN", "CHL", "PRY", "ECU", "GUY", "URY", "SUR",
];

const EUROPE: &[&str] = &[
    "FRA", "DEU", "GBR", "ITA", "ESP", "UKR", "POL", "ROU", "NLD", "BEL", "CZE", "GRC", "PRT",
    "SWE", "HUN", "BLR", "AUT", "CHE", "BGR", "SRB", "DNK", "FIN", "SVK", "NOR", "IRL", "HRV",
    "BIH", "MDA", "LTU", "ALB", "MKD", "SVN", "LVA", "EST", "MNE", "LUX", "MLT", "ISL", "AND",
    "MCO", "LIE", "SMR", "VAT",
];

const AFRICA: &[&str] = &[
    "NGA", "ETH", "EGY", "COD", "ZAF", "TZA", "KEN", "UGA", "DZA", "SDN", "MAR", "AGO", "GHA",
    "MOZ", "MDG", "CIV", "CMR", "NER", "BFA", "MLI", "MWI", "ZMB", "SEN", "TCD", "SOM", "ZWE",
    "GIN", "RWA", "BEN", "BDI", "TUN", "SSD", "TGO", "SLE", "LBY", "COG", "LBR", "CAF", "MRT",
    "ERI", "NAM", "GMB", "BWA", "GAB", "LSO", "GNB", "GNQ", "MUS", "SWZ", "DJI", "COM", "CPV",
    "STP", "SYC",
];

// BLR is classified as Europe, which is checked first
const EURASIA: &[&str] = &["RUS", "KAZ", "KGZ", "TJK"];

const EAST_ASIA: &[&str] = &["CHN", "MNG", "PRK", "VNM", "LAO", "KHM", "MMR", "THA"];

const OCEANIA: &[&str] = &[
    "AUS", "NZL", "PNG", "FJI", "SLB", "VUT", "NCL", "PYF", "WSM", "GUM", "KIR", "TON", "FSM",
];

/// The built-in region sets, in lookup order
pub fn builtin_sets() -> Vec<RegionSet> {
    vec![
        RegionSet::new("north_america", 'N', NORTH_AMERICA),
        RegionSet::new("south_america", 'S', SOUTH_AMERICA),
        RegionSet::new("europe", 'E', EUROPE),
        RegionSet::new("africa", 'F', AFRICA),
        RegionSet::new("eurasian_pact", 'R', EURASIA),
        RegionSet::new("dragon_alliance", 'C', EAST_ASIA),
        RegionSet::new("oceania", 'O', OCEANIA),
    ]
}

impl RegionTable {
    /// The built-in table. Its sets are disjoint, so construction cannot fail.
    pub fn builtin() -> Self {
        let sets = builtin_sets();
        let mut lookup = hashbrown::HashMap::new();
        for (idx, set) in sets.iter().enumerate() {
            for code in &set.codes {
                lookup.entry(code.clone()).or_insert(idx);
            }
        }
        Self::from_parts(sets, lookup, DEFAULT_LABEL)
    }
}
