//! The grounded extension: a direct O(n+m) fixpoint, no SAT solver
//! involved, since it is the unique minimal complete extension and has a
//! closed-form iterative characterisation.

use crate::af::AAFramework;

/// Computes the grounded extension, returning argument ids in the order
/// they were added to the extension (unsorted).
pub fn grounded_extension_ids(af: &AAFramework) -> Vec<usize> {
    let n = af.n_arguments();
    let mut ext = Vec::new();
    let mut n_processed = 0;
    let mut defeated = vec![false; n];
    let mut remaining_attackers = vec![0usize; n];

    for arg in af.argument_set().iter() {
        let id = arg.id();
        let n_attackers = af.attackers_of_id(id).len();
        remaining_attackers[id] = n_attackers;
        if n_attackers == 0 {
            ext.push(id);
        }
    }

    while n_processed < ext.len() {
        let accepted = ext[n_processed];
        for &defeated_id in af.attackees_of_id(accepted) {
            if defeated[defeated_id] {
                continue;
            }
            defeated[defeated_id] = true;
            for &freed_id in af.attackees_of_id(defeated_id) {
                remaining_attackers[freed_id] -= 1;
                if remaining_attackers[freed_id] == 0 {
                    ext.push(freed_id);
                }
            }
        }
        n_processed += 1;
    }
    ext
}

/// Computes the grounded extension, returning argument labels sorted
/// ascending.
pub fn grounded_extension(af: &AAFramework) -> Vec<usize> {
    let mut labels: Vec<usize> = grounded_extension_ids(af)
        .into_iter()
        .map(|id| af.argument_set().get_argument_by_id(id).label())
        .collect();
    labels.sort_unstable();
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::af::ArgumentSet;

    #[test]
    fn test_grounded_extension_chain() {
        let args = ArgumentSet::new_with_labels(&[1, 2, 3, 4, 5, 6]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        af.new_attack(2, 3).unwrap();
        af.new_attack(2, 4).unwrap();
        af.new_attack(3, 5).unwrap();
        af.new_attack(4, 5).unwrap();
        af.new_attack(5, 6).unwrap();
        assert_eq!(grounded_extension(&af), vec![1, 3, 4, 6]);
    }

    #[test]
    fn test_grounded_extension_with_undefended_prefix() {
        let args = ArgumentSet::new_with_labels(&[0, 1, 2, 3, 4, 5, 6]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(0, 1).unwrap();
        af.new_attack(1, 2).unwrap();
        af.new_attack(2, 3).unwrap();
        af.new_attack(2, 4).unwrap();
        af.new_attack(3, 5).unwrap();
        af.new_attack(4, 5).unwrap();
        af.new_attack(5, 6).unwrap();
        assert_eq!(grounded_extension(&af), vec![0, 2, 5]);
    }

    #[test]
    fn test_grounded_extension_self_attack_excluded() {
        let args = ArgumentSet::new_with_labels(&[1]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 1).unwrap();
        assert!(grounded_extension(&af).is_empty());
    }
}
