//! Coarse ranking: per-feature orders, weighted Copeland consensus, prefix selection.
//!
//! ```text
//! FeatureScore[] --build_ranking--> Ranking (x F) --aggregate--> Consensus --select--> prefix
//! ```
//!
//! The ranking types are generic over the item key so they can be exercised without papers;
//! the pipeline keys everything by [`PaperKey`](crate::paper::PaperKey).

pub mod builder;
pub mod copeland;
pub mod error;
pub mod selector;
pub mod weights;


pub use builder::{Ranking, build_ranking};
pub use copeland::{Consensus, aggregate};
pub use error::RankingError;
pub use selector::select;
pub use weights::WeightTable;
