//! Crop Reference Table
//!
//! The five supported crops, built once per process and shared read-only.
//! Lookups are case-insensitive through an FxHashMap index over the fixed
//! table order (wheat, rice, corn, cotton, sugarcane).

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

use super::profile::{CropProfile, CropSummary, Range};

static CROP_PROFILES: [CropProfile; 5] = [
    CropProfile {
        id: "wheat",
        name: "Wheat",
        optimal_temp: Range::new(15.0, 25.0),
        optimal_rainfall: Range::new(450.0, 650.0),
        growth_period_days: 120,
        yield_range: Range::new(2.5, 4.0),
        diseases: &["Rust", "Powdery mildew", "Septoria leaf blotch"],
        pests: &["Aphids", "Armyworm", "Hessian fly"],
    },
    CropProfile {
        id: "rice",
        name: "Rice",
        optimal_temp: Range::new(20.0, 35.0),
        optimal_rainfall: Range::new(1000.0, 2000.0),
        growth_period_days: 120,
        yield_range: Range::new(2.0, 3.5),
        diseases: &["Blast", "Bacterial leaf blight", "Sheath blight"],
        pests: &["Stem borer", "Brown planthopper", "Leaf folder"],
    },
    CropProfile {
        id: "corn",
        name: "Corn",
        optimal_temp: Range::new(18.0, 32.0),
        optimal_rainfall: Range::new(500.0, 800.0),
        growth_period_days: 100,
        yield_range: Range::new(2.5, 4.5),
        diseases: &["Northern leaf blight", "Gray leaf spot", "Common rust"],
        pests: &["Fall armyworm", "Corn borer", "Rootworm"],
    },
    CropProfile {
        id: "cotton",
        name: "Cotton",
        optimal_temp: Range::new(21.0, 30.0),
        optimal_rainfall: Range::new(500.0, 1000.0),
        growth_period_days: 180,
        yield_range: Range::new(0.8, 1.5),
        diseases: &["Fusarium wilt", "Boll rot", "Leaf curl virus"],
        pests: &["Bollworm", "Whitefly", "Jassids"],
    },
    CropProfile {
        id: "sugarcane",
        name: "Sugarcane",
        optimal_temp: Range::new(20.0, 35.0),
        optimal_rainfall: Range::new(1500.0, 2500.0),
        growth_period_days: 365,
        yield_range: Range::new(30.0, 40.0),
        diseases: &["Red rot", "Smut", "Wilt"],
        pests: &["Early shoot borer", "Top borer", "Termites"],
    },
];

static CROP_TABLE: OnceLock<CropTable> = OnceLock::new();

/// Immutable crop lookup table
#[derive(Debug)]
pub struct CropTable {
    profiles: &'static [CropProfile],
    index: FxHashMap<&'static str, usize>,
}

impl CropTable {
    /// Process-wide table, initialized on first use
    pub fn global() -> &'static CropTable {
        CROP_TABLE.get_or_init(|| CropTable::new(&CROP_PROFILES))
    }

    fn new(profiles: &'static [CropProfile]) -> Self {
        let index = profiles
            .iter()
            .enumerate()
            .map(|(idx, profile)| (profile.id, idx))
            .collect();

        Self { profiles, index }
    }

    /// Case-insensitive lookup. `None` means the crop is not supported.
    pub fn get(&self, crop_name: &str) -> Option<&'static CropProfile> {
        let key = crop_name.to_lowercase();
        self.index
            .get(key.as_str())
            .and_then(|&idx| self.profiles.get(idx))
    }

    /// Profiles in fixed table order
    pub fn iter(&self) -> impl Iterator<Item = &'static CropProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.profiles.iter().map(|p| p.id).collect()
    }

    pub fn summaries(&self) -> Vec<CropSummary> {
        self.profiles.iter().map(CropProfile::summary).collect()
    }
}
