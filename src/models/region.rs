// src/models/region.rs
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    US,
    EU,
    ALL,
}

impl Region {
    pub fn name(&self) -> &'static str {
        match self {
            Self::US => "US",
            Self::EU => "EU",
            Self::ALL => "ALL",
        }
    }

    // Decode failsafe: unrecognized or missing region names fall back to ALL.
    // This is distinct from the US default applied when constructing a new
    // group; the two are kept apart on purpose.
    pub fn from_name(name: &str) -> Region {
        match name {
            "US" => Self::US,
            "EU" => Self::EU,
            _ => Self::ALL,
        }
    }

    // ALL is a query alias for every concrete region, not a key namespace of
    // its own; heartbeats only ever live under US or EU.
    pub fn scan_regions(&self) -> &'static [Region] {
        match self {
            Self::ALL => &[Self::US, Self::EU],
            Self::US => &[Self::US],
            Self::EU => &[Self::EU],
        }
    }

    pub fn matches(&self, other: Region) -> bool {
        *self == Self::ALL || *self == other
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::US
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_falls_back_to_all() {
        assert_eq!(Region::from_name("US"), Region::US);
        assert_eq!(Region::from_name("EU"), Region::EU);
        assert_eq!(Region::from_name(""), Region::ALL);
        assert_eq!(Region::from_name("APAC"), Region::ALL);
    }

    #[test]
    fn all_expands_to_concrete_regions() {
        assert_eq!(Region::ALL.scan_regions(), &[Region::US, Region::EU]);
        assert_eq!(Region::EU.scan_regions(), &[Region::EU]);
    }
}
