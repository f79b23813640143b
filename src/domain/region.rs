use std::fmt;

// Fixed set of regions a player can queue in. Players only match within one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Eu,
    Na,
    Oce,
    Me,
}

impl Region {
    // Every region, in the order the sweeper visits them.
    pub const ALL: [Region; 4] = [Region::Eu, Region::Na, Region::Oce, Region::Me];

    // Region used when a request omits the region or names an unknown one.
    pub const FALLBACK: Region = Region::Eu;

    pub fn as_str(self) -> &'static str {
        match self {
            Region::Eu => "EU",
            Region::Na => "NA",
            Region::Oce => "OCE",
            Region::Me => "ME",
        }
    }

    // Exact, case-sensitive lookup of a region code.
    pub fn parse(code: &str) -> Option<Region> {
        Region::ALL.into_iter().find(|region| region.as_str() == code)
    }

    // Resolve an optional region code, silently falling back for anything unknown.
    pub fn resolve(code: Option<&str>) -> Region {
        code.and_then(Region::parse).unwrap_or(Region::FALLBACK)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
