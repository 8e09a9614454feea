pub mod engine;
pub mod summary;

pub use engine::StatsEngine;
pub use summary::AssetSummary;
