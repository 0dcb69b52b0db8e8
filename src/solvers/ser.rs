//! Ser — the serialisation-based semantics (C4): ranks arguments by the
//! earliest recursion depth at which they first belong to an initial
//! (⊂-minimal non-empty admissible) set of some reduct.

use crate::af::AAFramework;
use crate::clause;
use crate::error::CoreResult;
use crate::ranking::EquivalenceRanking;
use crate::sat::{default_solver, Literal, SatSolver, SolvingResult};
use std::collections::HashMap;

/// Tuning parameters for [`ser_indices`]/[`ser_ranking`].
#[derive(Debug, Clone, Copy)]
pub struct SerOptions {
    /// Maximum recursion depth `D`. Arguments not reached by depth `D`
    /// retain an index of `+∞` (represented as `None`).
    pub max_depth: usize,
}

impl Default for SerOptions {
    fn default() -> Self {
        Self { max_depth: 15 }
    }
}

/// Computes the serialisation index of every argument, by label. `None`
/// means `+∞` (never reached within `max_depth`).
pub fn ser_indices(af: &AAFramework, options: SerOptions) -> CoreResult<HashMap<usize, usize>> {
    let mut idx: HashMap<usize, usize> = HashMap::new();
    let initial = compute_initial_sets(af)?;
    for set in &initial {
        for &label in set {
            idx.entry(label).or_insert(1);
        }
    }
    for set in initial {
        recurse(af, &set, 2, options.max_depth, &mut idx)?;
    }
    Ok(idx)
}

fn recurse(
    af: &AAFramework,
    accepted_labels: &[usize],
    depth: usize,
    max_depth: usize,
    idx: &mut HashMap<usize, usize>,
) -> CoreResult<()> {
    if depth > max_depth {
        return Ok(());
    }
    let accepted: std::collections::HashSet<usize> = accepted_labels
        .iter()
        .filter_map(|&label| af.argument_set().get_argument(label))
        .map(|a| a.id())
        .collect();
    let mut removed: std::collections::HashSet<usize> = accepted.clone();
    for &id in &accepted {
        for &attacked in af.attackees_of_id(id) {
            removed.insert(attacked);
        }
    }
    let reduct_ids: Vec<usize> = (0..af.n_arguments())
        .filter(|id| !removed.contains(id))
        .collect();
    if reduct_ids.is_empty() {
        return Ok(());
    }
    let reduct_labels: Vec<usize> = reduct_ids
        .iter()
        .map(|&id| af.argument_set().get_argument_by_id(id).label())
        .collect();
    let already_improved = reduct_labels
        .iter()
        .all(|label| idx.get(label).map(|&v| v <= depth).unwrap_or(false));
    if already_improved {
        return Ok(());
    }

    let reduct = af.induced_subgraph(&reduct_ids);
    let initial = compute_initial_sets(&reduct)?;
    for set in &initial {
        for &label in set {
            let entry = idx.entry(label).or_insert(depth);
            if *entry > depth {
                *entry = depth;
            }
        }
    }
    for set in initial {
        let mut next_accepted = accepted_labels.to_vec();
        next_accepted.extend(set);
        recurse(af, &next_accepted, depth + 1, max_depth, idx)?;
    }
    Ok(())
}

/// Enumerates every initial set (⊂-minimal non-empty admissible set) of
/// `af`, as lists of argument labels.
fn compute_initial_sets(af: &AAFramework) -> CoreResult<Vec<Vec<usize>>> {
    let n = af.n_arguments();
    if n == 0 {
        return Ok(Vec::new());
    }
    let mut solver = default_solver();
    encode_admissibility(af, solver.as_mut());

    let mut initial_sets = Vec::new();
    loop {
        match solver.solve() {
            SolvingResult::Unsatisfiable => break,
            SolvingResult::Satisfiable(model) => {
                let members: Vec<usize> = (0..n)
                    .filter(|&id| model.value_of(var(id)).unwrap_or(false))
                    .collect();
                if is_minimal(af, &members)? {
                    initial_sets.push(
                        members
                            .iter()
                            .map(|&id| af.argument_set().get_argument_by_id(id).label())
                            .collect(),
                    );
                }
                let blocking: Vec<Literal> = members.iter().map(|&id| lit(id, false)).collect();
                solver.add_clause(blocking);
            }
        }
    }
    Ok(initial_sets)
}

fn is_minimal(af: &AAFramework, members: &[usize]) -> CoreResult<bool> {
    let mut solver = default_solver();
    encode_admissibility(af, solver.as_mut());
    let member_set: std::collections::HashSet<usize> = members.iter().copied().collect();
    for id in 0..af.n_arguments() {
        if !member_set.contains(&id) {
            solver.add_clause(vec![lit(id, false)]);
        }
    }
    let exclude_one: Vec<Literal> = members.iter().map(|&id| lit(id, false)).collect();
    solver.add_clause(exclude_one);
    Ok(!solver.solve().is_sat())
}

fn var(id: usize) -> usize {
    id + 1
}

fn lit(id: usize, positive: bool) -> Literal {
    let v = var(id) as isize;
    Literal::from(if positive { v } else { -v })
}

fn encode_admissibility(af: &AAFramework, solver: &mut dyn SatSolver) {
    for att in af.iter_attacks() {
        solver.add_clause(clause![
            -(var(att.attacker_id()) as isize),
            -(var(att.attacked_id()) as isize)
        ]);
    }
    for arg in af.argument_set().iter() {
        let a = arg.id();
        for &b in af.attackers_of_id(a) {
            let mut cl = clause![-(var(a) as isize)];
            for &c in af.attackers_of_id(b) {
                cl.push(Literal::from(var(c) as isize));
            }
            solver.add_clause(cl);
        }
    }
    let non_empty: Vec<Literal> = (0..af.n_arguments()).map(|id| lit(id, true)).collect();
    solver.add_clause(non_empty);
}

/// Computes the Ser ranking: arguments sorted ascending by serialisation
/// index (`+∞` last), ties broken by ascending label, equal-index
/// arguments grouped into the same class.
pub fn ser_ranking(af: &AAFramework, options: SerOptions) -> CoreResult<EquivalenceRanking> {
    let idx = ser_indices(af, options)?;
    let mut by_label: Vec<(usize, Option<usize>)> = af
        .argument_set()
        .iter()
        .map(|arg| (arg.label(), idx.get(&arg.label()).copied()))
        .collect();
    by_label.sort_by(|a, b| match (a.1, b.1) {
        (Some(x), Some(y)) => x.cmp(&y).then(a.0.cmp(&b.0)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    });

    let mut classes: Vec<Vec<usize>> = Vec::new();
    let mut prev: Option<Option<usize>> = None;
    for (label, value) in by_label {
        let same = prev == Some(value);
        if same {
            classes.last_mut().unwrap().push(label);
        } else {
            classes.push(vec![label]);
        }
        prev = Some(value);
    }
    Ok(EquivalenceRanking::new(classes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::af::ArgumentSet;

    #[test]
    fn test_unattacked_argument_has_index_one() {
        let args = ArgumentSet::new_with_labels(&[1, 2]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        let idx = ser_indices(&af, SerOptions::default()).unwrap();
        assert_eq!(idx.get(&1), Some(&1));
    }

    #[test]
    fn test_self_attacker_never_indexed() {
        let args = ArgumentSet::new_with_labels(&[1]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 1).unwrap();
        let idx = ser_indices(&af, SerOptions::default()).unwrap();
        assert_eq!(idx.get(&1), None);
    }

    #[test]
    fn test_chain_indices_increase_along_defence_depth() {
        let args = ArgumentSet::new_with_labels(&[1, 2, 3]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        af.new_attack(2, 3).unwrap();
        let idx = ser_indices(&af, SerOptions::default()).unwrap();
        assert_eq!(idx.get(&1), Some(&1));
        assert_eq!(idx.get(&3), Some(&2));
    }
}
