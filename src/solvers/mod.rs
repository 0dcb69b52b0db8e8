//! The three self-contained ranking solvers: Cat (C2), Dbs (C3) and Ser
//! (C4). Each takes an AF plus its own tuning parameters and produces an
//! [`EquivalenceRanking`](crate::ranking::EquivalenceRanking) independent of
//! the probabilistic machinery in [`crate::probabilistic`].

mod cat;
mod dbs;
mod ser;

pub use cat::{cat_ranking, cat_scores, CatOptions};
pub use dbs::{dbs_ranking, dbs_vectors, DbsOptions};
pub use ser::{ser_indices, ser_ranking, SerOptions};
