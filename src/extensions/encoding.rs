//! CNF encoding of the complete semantics (C7), adapted from the teacher's
//! bit-packed variable scheme: each argument gets an "in" variable and a
//! "disjunction" variable meaning "attacked by some in argument", and
//! completeness is encoded as `in(x) <-> AND_{y attacks x} disjunction(y)`
//! together with `disjunction(x) <-> OR_{y attacks x} in(y)`.

use crate::af::AAFramework;
use crate::clause;
use crate::sat::{Literal, SatSolver};

/// Maps an argument's internal id to its "in" SAT variable index.
pub(crate) fn arg_id_to_solver_var(id: usize) -> usize {
    (id + 1) << 1
}

/// Maps an "in" SAT variable index back to the argument id it encodes.
pub(crate) fn arg_id_from_solver_var(v: usize) -> Option<usize> {
    if v & 1 == 1 {
        None
    } else {
        Some((v >> 1) - 1)
    }
}

fn arg_id_to_disjunction_var(id: usize) -> usize {
    arg_id_to_solver_var(id) - 1
}

/// The literal for argument `id` being "in" the extension.
pub(crate) fn in_literal(id: usize) -> Literal {
    Literal::from(arg_id_to_solver_var(id) as isize)
}

/// Encodes the complete-semantics constraints of `af` into `solver`.
pub(crate) fn encode_complete_semantics(af: &AAFramework, solver: &mut dyn SatSolver) {
    for arg in af.argument_set().iter() {
        let attacked_id = arg.id();
        let in_var = arg_id_to_solver_var(attacked_id) as isize;
        let disj_var = arg_id_to_disjunction_var(attacked_id) as isize;

        solver.add_clause(clause![-in_var, -disj_var]);
        let mut full_cl = clause![-disj_var];
        for &attacker_id in af.attackers_of_id(attacked_id) {
            let attacker_var = arg_id_to_solver_var(attacker_id) as isize;
            solver.add_clause(clause![disj_var, -attacker_var]);
            full_cl.push(Literal::from(attacker_var));
        }
        solver.add_clause(full_cl);
    }

    for arg in af.argument_set().iter() {
        let attacked_id = arg.id();
        let in_var = arg_id_to_solver_var(attacked_id) as isize;
        let mut full_cl = clause![in_var];
        for &attacker_id in af.attackers_of_id(attacked_id) {
            let attacker_disj_var = arg_id_to_disjunction_var(attacker_id) as isize;
            solver.add_clause(clause![-in_var, attacker_disj_var]);
            full_cl.push(Literal::from(-attacker_disj_var));
        }
        solver.add_clause(full_cl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_id_roundtrip() {
        assert_eq!(arg_id_from_solver_var(arg_id_to_solver_var(0)), Some(0));
        assert_eq!(arg_id_from_solver_var(arg_id_to_solver_var(7)), Some(7));
        assert_eq!(arg_id_from_solver_var(3), None);
    }
}
