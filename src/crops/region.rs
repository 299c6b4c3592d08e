//! Regional yield adjustment
//!
//! Coarse state-level multiplier reflecting irrigation coverage and soil
//! fertility. Matching is exact on the lowercased region name; anything not
//! listed is neutral.

/// Regional productivity band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionBand {
    /// Andhra Pradesh, Telangana, Karnataka
    Southern,

    /// Punjab, Haryana, Uttar Pradesh (Indo-Gangetic plain)
    Northern,

    /// Gujarat, Maharashtra
    Western,

    /// Any other region
    Other,
}

impl RegionBand {
    pub fn from_region(region: &str) -> Self {
        match region.to_lowercase().as_str() {
            "andhra pradesh" | "telangana" | "karnataka" => RegionBand::Southern,
            "punjab" | "haryana" | "uttar pradesh" => RegionBand::Northern,
            "gujarat" | "maharashtra" => RegionBand::Western,
            _ => RegionBand::Other,
        }
    }

    pub fn factor(&self) -> f64 {
        match self {
            RegionBand::Southern => 1.05,
            RegionBand::Northern => 1.10,
            RegionBand::Western => 0.95,
            RegionBand::Other => 1.0,
        }
    }
}

/// Region multiplier for a free-text region name
pub fn region_factor(region: &str) -> f64 {
    RegionBand::from_region(region).factor()
}
