//! Condition-tree evaluation for capability rules.
//!
//! A [`Statement`] tree is checked against a [`FeatureTable`] of observed
//! program features, producing a [`MatchResult`] tree that records the verdict
//! and the evidence visited at every node.

mod evaluate;
mod types;

pub use types::{
    Feature, FeatureTable, Location, MatchResult, MAX_DEPTH, Statement, StatementError,
    StatementKind,
};
