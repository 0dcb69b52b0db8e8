//! argrank computes ranking-based semantics over abstract argumentation
//! frameworks: total preorders over arguments induced by the categoriser
//! (Cat), discussion-based (Dbs) and serialisation-based (Ser) semantics,
//! plus a family of probabilistic semantics (p-Admissible, p-Stable,
//! p-Grounded, p-Complete, p-Preferred, p-Ideal) built on top of classical
//! extension-based reasoning.

#![warn(missing_docs)]

mod error;
pub use error::{CoreError, CoreResult};

mod af;
pub use af::{
    read_aspartix, read_iccma_af, write_aspartix, AAFramework, Argument, ArgumentSet, Attack,
    SparseMatrixView,
};

mod ranking;
pub use ranking::{
    group_by_equality, group_by_tolerance, normalise_classes, normalise_scores,
    validate_partition, EquivalenceRanking,
};

mod sat;
pub use sat::{default_solver, CadicalSolver, Literal, SatSolver, SolvingResult, Variable};

mod extensions;
pub use extensions::{
    complete_extensions, find_one_complete_extension, grounded_extension, ideal_extension,
    preferred_extensions, stable_extensions, ExtensionEnumerator,
};

mod solvers;
pub use solvers::{
    cat_ranking, cat_scores, dbs_ranking, dbs_vectors, ser_indices, ser_ranking, CatOptions,
    DbsOptions, SerOptions,
};

mod probabilistic;
pub use probabilistic::{
    p_admissible_ranking, p_complete_ranking, p_grounded_ranking, p_ideal_ranking,
    p_preferred_ranking, p_stable_ranking, ProbabilisticOptions,
};

mod timeout;
pub use timeout::{run_with_timeout, TimeoutOutcome};

pub mod cli;
