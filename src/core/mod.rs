pub mod display;
pub mod normalizer;
pub mod search;

pub use display::{derive_display, VehicleDisplayModel};
pub use normalizer::{normalize_profile, normalize_summary};
pub use search::SearchIndex;
