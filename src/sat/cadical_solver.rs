use super::{Assignment, Literal, SatSolver, SolvingResult};

/// A [`SatSolver`] backed by the bundled `cadical` solver.
pub struct CadicalSolver {
    solver: cadical::Solver,
    n_vars: usize,
}

impl Default for CadicalSolver {
    fn default() -> Self {
        Self {
            solver: cadical::Solver::new(),
            n_vars: 0,
        }
    }
}

impl CadicalSolver {
    fn track_vars(&mut self, lits: impl Iterator<Item = i32>) {
        for l in lits {
            self.n_vars = self.n_vars.max(l.unsigned_abs() as usize);
        }
    }
}

impl SatSolver for CadicalSolver {
    fn add_clause(&mut self, cl: Vec<Literal>) {
        let as_ints: Vec<i32> = cl.iter().map(|&l| isize::from(l) as i32).collect();
        self.track_vars(as_ints.iter().copied());
        self.solver.add_clause(as_ints);
    }

    fn solve(&mut self) -> SolvingResult {
        match self.solver.solve() {
            Some(true) => SolvingResult::Satisfiable(self.extract_model()),
            Some(false) | None => SolvingResult::Unsatisfiable,
        }
    }

    fn solve_under_assumptions(&mut self, assumptions: &[Literal]) -> SolvingResult {
        let as_ints: Vec<i32> = assumptions.iter().map(|&l| isize::from(l) as i32).collect();
        match self.solver.solve_with(as_ints.into_iter()) {
            Some(true) => SolvingResult::Satisfiable(self.extract_model()),
            Some(false) | None => SolvingResult::Unsatisfiable,
        }
    }

    fn n_vars(&self) -> usize {
        self.n_vars
    }
}

impl CadicalSolver {
    fn extract_model(&self) -> Assignment {
        let values = (1..=self.n_vars as i32)
            .map(|v| self.solver.value(v))
            .collect();
        Assignment::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause;

    #[test]
    fn test_solve_sat() {
        let mut solver = CadicalSolver::default();
        solver.add_clause(clause![1, 2]);
        solver.add_clause(clause![-1, 2]);
        let result = solver.solve();
        assert!(result.is_sat());
    }

    #[test]
    fn test_solve_unsat() {
        let mut solver = CadicalSolver::default();
        solver.add_clause(clause![1]);
        solver.add_clause(clause![-1]);
        let result = solver.solve();
        assert!(!result.is_sat());
    }

    #[test]
    fn test_solve_under_assumptions() {
        let mut solver = CadicalSolver::default();
        solver.add_clause(clause![1, 2]);
        let sat = solver.solve_under_assumptions(&[Literal::from(-1), Literal::from(-2)]);
        assert!(!sat.is_sat());
        let sat2 = solver.solve();
        assert!(sat2.is_sat());
    }
}
