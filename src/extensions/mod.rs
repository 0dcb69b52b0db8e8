//! Classical extension-based semantics (C7): grounded, complete, preferred,
//! stable and ideal extensions. These underpin the probabilistic semantics
//! of C5/C6 and are also exposed directly for anyone wanting the classical
//! extensions themselves.

mod encoding;
mod grounded;

pub use grounded::grounded_extension;

use crate::af::AAFramework;
use crate::error::{CoreError, CoreResult};
use crate::sat::{default_solver, Literal, SatSolver, SolvingResult};
use encoding::{encode_complete_semantics, in_literal};
use std::collections::HashSet;

fn ids_to_labels(af: &AAFramework, mut ids: Vec<usize>) -> Vec<usize> {
    ids.sort_unstable();
    ids.into_iter()
        .map(|id| af.argument_set().get_argument_by_id(id).label())
        .collect()
}

/// Iterates over every complete extension of an AF, one SAT model at a time,
/// blocking each discovered model so the next call yields a distinct
/// extension. Extensions are given as internal argument ids, not labels.
pub struct ExtensionEnumerator {
    n: usize,
    solver: Box<dyn SatSolver>,
    exhausted: bool,
}

impl ExtensionEnumerator {
    /// Builds an enumerator over the complete extensions of `af`.
    pub fn new(af: &AAFramework) -> Self {
        let mut solver = default_solver();
        encode_complete_semantics(af, solver.as_mut());
        Self {
            n: af.n_arguments(),
            solver,
            exhausted: false,
        }
    }

    /// Returns the next distinct complete extension, or `None` once every
    /// extension has been enumerated.
    pub fn next_extension(&mut self) -> Option<Vec<usize>> {
        if self.exhausted {
            return None;
        }
        match self.solver.solve() {
            SolvingResult::Unsatisfiable => {
                self.exhausted = true;
                None
            }
            SolvingResult::Satisfiable(model) => {
                let ids: Vec<usize> = (0..self.n)
                    .filter(|&id| model.satisfies(in_literal(id)))
                    .collect();
                let in_ext: HashSet<usize> = ids.iter().copied().collect();
                let blocking: Vec<Literal> = (0..self.n)
                    .map(|id| {
                        let lit = in_literal(id);
                        if in_ext.contains(&id) {
                            lit.negated()
                        } else {
                            lit
                        }
                    })
                    .collect();
                self.solver.add_clause(blocking);
                Some(ids)
            }
        }
    }
}

impl Iterator for ExtensionEnumerator {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_extension()
    }
}

/// Enumerates every complete extension of `af`, as argument labels.
///
/// Since the empty set or the grounded extension is always complete, this
/// never returns an empty list for a well-formed AF.
pub fn complete_extensions(af: &AAFramework) -> CoreResult<Vec<Vec<usize>>> {
    let exts: Vec<Vec<usize>> = ExtensionEnumerator::new(af)
        .map(|ids| ids_to_labels(af, ids))
        .collect();
    if exts.is_empty() {
        return Err(CoreError::SolverError(
            "SAT encoding of complete semantics produced no models".to_string(),
        ));
    }
    Ok(exts)
}

/// Finds a single complete extension of `af` without enumerating the rest.
pub fn find_one_complete_extension(af: &AAFramework) -> CoreResult<Vec<usize>> {
    let mut enumerator = ExtensionEnumerator::new(af);
    enumerator.next_extension().map(|ids| ids_to_labels(af, ids)).ok_or_else(|| {
        CoreError::SolverError("SAT encoding of complete semantics is unsatisfiable".to_string())
    })
}

fn complete_extensions_as_ids(af: &AAFramework) -> Vec<HashSet<usize>> {
    ExtensionEnumerator::new(af)
        .map(|ids| ids.into_iter().collect())
        .collect()
}

/// Enumerates every preferred extension (the subset-maximal complete
/// extensions) of `af`.
pub fn preferred_extensions(af: &AAFramework) -> CoreResult<Vec<Vec<usize>>> {
    let all = complete_extensions_as_ids(af);
    let maximal: Vec<&HashSet<usize>> = all
        .iter()
        .filter(|candidate| {
            !all.iter()
                .any(|other| other.len() > candidate.len() && candidate.is_subset(other))
        })
        .collect();
    Ok(maximal
        .into_iter()
        .map(|ids| ids_to_labels(af, ids.iter().copied().collect()))
        .collect())
}

/// Enumerates every stable extension (complete extensions whose range
/// covers the whole argument set) of `af`. May be empty.
pub fn stable_extensions(af: &AAFramework) -> CoreResult<Vec<Vec<usize>>> {
    let all = complete_extensions_as_ids(af);
    let stable: Vec<&HashSet<usize>> = all
        .iter()
        .filter(|ext| {
            (0..af.n_arguments())
                .filter(|id| !ext.contains(id))
                .all(|id| af.attackers_of_id(id).iter().any(|a| ext.contains(a)))
        })
        .collect();
    Ok(stable
        .into_iter()
        .map(|ids| ids_to_labels(af, ids.iter().copied().collect()))
        .collect())
}

/// Computes the ideal extension of `af`: the unique maximal admissible set
/// contained in every preferred extension.
///
/// Implemented as a two-phase procedure: first the candidate core is taken
/// as the intersection of every preferred extension (always conflict-free,
/// since each preferred extension is), and then that candidate is
/// iteratively trimmed by removing any argument that is not defended by
/// what remains, until a fixpoint — the largest self-defending (hence
/// admissible) subset of the core.
pub fn ideal_extension(af: &AAFramework) -> CoreResult<Vec<usize>> {
    let preferred = complete_extensions_as_ids(af)
        .into_iter()
        .collect::<Vec<_>>();
    let preferred: Vec<HashSet<usize>> = {
        let maximal: Vec<HashSet<usize>> = preferred
            .iter()
            .filter(|candidate| {
                !preferred
                    .iter()
                    .any(|other| other.len() > candidate.len() && candidate.is_subset(other))
            })
            .cloned()
            .collect();
        maximal
    };

    let mut core: HashSet<usize> = (0..af.n_arguments()).collect();
    for ext in &preferred {
        core = core.intersection(ext).copied().collect();
    }

    loop {
        let defended: HashSet<usize> = core
            .iter()
            .copied()
            .filter(|&id| is_defended_by(af, &core, id))
            .collect();
        if defended == core {
            break;
        }
        core = defended;
    }

    Ok(ids_to_labels(af, core.into_iter().collect()))
}

fn is_defended_by(af: &AAFramework, candidate: &HashSet<usize>, id: usize) -> bool {
    af.attackers_of_id(id)
        .iter()
        .all(|&attacker| af.attackers_of_id(attacker).iter().any(|c| candidate.contains(c)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::af::ArgumentSet;

    fn af_two_cycle() -> AAFramework {
        let args = ArgumentSet::new_with_labels(&[1, 2]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        af.new_attack(2, 1).unwrap();
        af
    }

    #[test]
    fn test_complete_extensions_two_cycle() {
        let af = af_two_cycle();
        let mut exts = complete_extensions(&af).unwrap();
        for e in &mut exts {
            e.sort_unstable();
        }
        exts.sort();
        assert_eq!(exts, vec![vec![], vec![1], vec![2]]);
    }

    #[test]
    fn test_preferred_extensions_two_cycle() {
        let af = af_two_cycle();
        let mut exts = preferred_extensions(&af).unwrap();
        for e in &mut exts {
            e.sort_unstable();
        }
        exts.sort();
        assert_eq!(exts, vec![vec![1], vec![2]]);
    }

    #[test]
    fn test_stable_extensions_two_cycle() {
        let af = af_two_cycle();
        let mut exts = stable_extensions(&af).unwrap();
        for e in &mut exts {
            e.sort_unstable();
        }
        exts.sort();
        assert_eq!(exts, vec![vec![1], vec![2]]);
    }

    #[test]
    fn test_stable_extensions_odd_cycle_is_empty() {
        let args = ArgumentSet::new_with_labels(&[1, 2, 3]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        af.new_attack(2, 3).unwrap();
        af.new_attack(3, 1).unwrap();
        assert!(stable_extensions(&af).unwrap().is_empty());
    }

    #[test]
    fn test_ideal_extension_two_cycle_is_empty() {
        let af = af_two_cycle();
        assert!(ideal_extension(&af).unwrap().is_empty());
    }

    #[test]
    fn test_ideal_extension_chain_matches_grounded() {
        let args = ArgumentSet::new_with_labels(&[1, 2, 3]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        af.new_attack(2, 3).unwrap();
        assert_eq!(ideal_extension(&af).unwrap(), grounded_extension(&af));
    }

    #[test]
    fn test_find_one_complete_extension_nonempty_af() {
        let af = af_two_cycle();
        let ext = find_one_complete_extension(&af).unwrap();
        assert!(ext == vec![] || ext == vec![1] || ext == vec![2]);
    }
}
