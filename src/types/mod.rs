mod error;
mod feature;
mod feature_table;
mod location;
mod match_result;
mod statement;

pub use error::StatementError;
pub use feature::Feature;
pub use feature_table::FeatureTable;
pub use location::Location;
pub use match_result::MatchResult;
pub use statement::{MAX_DEPTH, Statement, StatementKind};
