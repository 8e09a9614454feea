pub mod combinations;
pub mod policy;
pub mod selector;

pub use combinations::{combination_count, max_combination_by, BestCombination, Candidate, Combinations};
pub use policy::{Criterion, SelectionPolicy};
pub use selector::{PortfolioSelection, PortfolioSelector};
