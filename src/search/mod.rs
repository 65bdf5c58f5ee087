//! Search layer facade.
//!
//! - **[`normalize`]**: accent- and case-insensitive text canonicalization.
//! - **[`filter`]**: category pre-filter, nature facet and free-text predicates.
//! - **[`rank`]**: letter-first, pt-BR collated ordering of results.
//! - **[`query`]**: [`query::FilterState`] transitions and the `evaluate` pipeline.

pub mod filter;
pub mod normalize;
pub mod query;
pub mod rank;

pub use normalize::normalize;
pub use query::{FilterState, QueryOutcome, evaluate};
