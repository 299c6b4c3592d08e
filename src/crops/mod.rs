//! Crop reference data
//!
//! - `profile`: CropProfile, Range and the listing views
//! - `table`: the fixed five-crop lookup table
//! - `region`: regional yield multipliers

pub mod profile;
pub mod region;
pub mod table;

pub use profile::{CropDetail, CropProfile, CropSummary, Range};
pub use region::{region_factor, RegionBand};
pub use table::CropTable;
