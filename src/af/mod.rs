//! The argumentation framework data model (C1).
//!
//! An [`AAFramework`] is a finite directed graph over integer-labelled
//! arguments. It is read-only after construction except for the incremental
//! builder methods used while parsing, and exposes attacker/attackee
//! adjacency in O(1) amortised time plus a sparse matrix view for the
//! matrix-power solvers.

mod parser;
mod sparse;

pub use parser::{read_aspartix, read_iccma_af, write_aspartix};
pub use sparse::SparseMatrixView;

use crate::error::{CoreError, CoreResult};
use std::collections::HashMap;

/// A single argument: a dense, 0-indexed internal id plus its 1-indexed
/// external label.
///
/// Identity is structural: two arguments are equal iff their labels are
/// equal. The internal id only exists to let every solver work against
/// plain, cache-friendly `Vec` indices instead of hashing labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Argument {
    id: usize,
    label: usize,
}

impl Argument {
    /// The dense internal id, `0..n_arguments()`.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The external, 1-indexed argument identifier.
    pub fn label(&self) -> usize {
        self.label
    }
}

impl std::fmt::Display for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// An ordered, deduplicated set of arguments with a label -> id index.
#[derive(Debug, Clone, Default)]
pub struct ArgumentSet {
    arguments: Vec<Argument>,
    label_to_id: HashMap<usize, usize>,
}

impl ArgumentSet {
    /// Builds an argument set from a list of labels, assigning dense ids in
    /// the order given. Duplicate labels are collapsed.
    pub fn new_with_labels(labels: &[usize]) -> Self {
        let mut set = ArgumentSet::default();
        for &label in labels {
            set.new_argument(label);
        }
        set
    }

    /// Adds a new argument, returning its freshly allocated id. A label that
    /// already exists is a no-op and returns the existing id.
    pub fn new_argument(&mut self, label: usize) -> usize {
        if let Some(&id) = self.label_to_id.get(&label) {
            return id;
        }
        let id = self.arguments.len();
        self.arguments.push(Argument { id, label });
        self.label_to_id.insert(label, id);
        id
    }

    /// Number of arguments in the set.
    pub fn n_arguments(&self) -> usize {
        self.arguments.len()
    }

    /// Looks up an argument by its external label.
    pub fn get_argument(&self, label: usize) -> Option<&Argument> {
        self.label_to_id.get(&label).map(|&id| &self.arguments[id])
    }

    /// Looks up an argument by its internal id.
    ///
    /// # Panics
    /// Panics if `id >= n_arguments()`.
    pub fn get_argument_by_id(&self, id: usize) -> &Argument {
        &self.arguments[id]
    }

    /// Iterates over all arguments in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.iter()
    }
}

/// A single attack: `attacker` attacks `attacked`. Self-attacks are
/// permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attack {
    attacker_id: usize,
    attacked_id: usize,
}

impl Attack {
    /// Internal id of the attacking argument.
    pub fn attacker_id(&self) -> usize {
        self.attacker_id
    }

    /// Internal id of the attacked argument.
    pub fn attacked_id(&self) -> usize {
        self.attacked_id
    }
}

/// An immutable (after construction) directed graph over integer-indexed
/// arguments, per §3 of the specification: `(A, R)` with `R ⊆ A×A`,
/// self-loops permitted.
#[derive(Debug, Clone)]
pub struct AAFramework {
    argument_set: ArgumentSet,
    attackees_of: Vec<Vec<usize>>,
    attackers_of: Vec<Vec<usize>>,
    n_attacks: usize,
}

impl AAFramework {
    /// Builds an empty framework over the given argument set.
    pub fn new_with_argument_set(argument_set: ArgumentSet) -> Self {
        let n = argument_set.n_arguments();
        Self {
            argument_set,
            attackees_of: vec![Vec::new(); n],
            attackers_of: vec![Vec::new(); n],
            n_attacks: 0,
        }
    }

    /// Adds a new attack. Both labels must already be registered in the
    /// argument set, else an [`CoreError::InputError`] is returned.
    pub fn new_attack(&mut self, attacker_label: usize, attacked_label: usize) -> CoreResult<()> {
        let attacker_id = self
            .argument_set
            .get_argument(attacker_label)
            .ok_or_else(|| CoreError::InputError(format!("unknown argument {attacker_label}")))?
            .id();
        let attacked_id = self
            .argument_set
            .get_argument(attacked_label)
            .ok_or_else(|| CoreError::InputError(format!("unknown argument {attacked_label}")))?
            .id();
        self.attackees_of[attacker_id].push(attacked_id);
        self.attackers_of[attacked_id].push(attacker_id);
        self.n_attacks += 1;
        Ok(())
    }

    /// The argument set backing this framework.
    pub fn argument_set(&self) -> &ArgumentSet {
        &self.argument_set
    }

    /// Number of arguments, `|A|`.
    pub fn n_arguments(&self) -> usize {
        self.argument_set.n_arguments()
    }

    /// Number of attacks, `|R|`.
    pub fn n_attacks(&self) -> usize {
        self.n_attacks
    }

    /// Internal ids of the attackers of `id`.
    pub fn attackers_of_id(&self, id: usize) -> &[usize] {
        &self.attackers_of[id]
    }

    /// Internal ids of the arguments attacked by `id`.
    pub fn attackees_of_id(&self, id: usize) -> &[usize] {
        &self.attackees_of[id]
    }

    /// `true` iff `attacker_id` attacks `attacked_id`.
    pub fn has_edge_by_id(&self, attacker_id: usize, attacked_id: usize) -> bool {
        self.attackees_of[attacker_id].contains(&attacked_id)
    }

    /// Iterates over every attack in the framework.
    pub fn iter_attacks(&self) -> impl Iterator<Item = Attack> + '_ {
        self.attackees_of.iter().enumerate().flat_map(|(from, tos)| {
            tos.iter()
                .map(move |&to| Attack { attacker_id: from, attacked_id: to })
        })
    }

    /// Builds the induced subgraph over the given subset of internal ids,
    /// per §3's `Subgraph` definition: the parent's attack relation
    /// restricted to `S × S`. Returned argument ids are renumbered densely
    /// in increasing order of the original ids, preserving labels.
    pub fn induced_subgraph(&self, ids: &[usize]) -> AAFramework {
        let mut sorted: Vec<usize> = ids.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        let labels: Vec<usize> = sorted
            .iter()
            .map(|&id| self.argument_set.get_argument_by_id(id).label())
            .collect();
        let sub_set = ArgumentSet::new_with_labels(&labels);
        let mut sub = AAFramework::new_with_argument_set(sub_set);
        let member: std::collections::HashSet<usize> = sorted.iter().copied().collect();
        for &id in &sorted {
            let label = self.argument_set.get_argument_by_id(id).label();
            for &to in &self.attackees_of[id] {
                if member.contains(&to) {
                    let to_label = self.argument_set.get_argument_by_id(to).label();
                    sub.new_attack(label, to_label)
                        .expect("labels were just registered in the subgraph's argument set");
                }
            }
        }
        sub
    }

    /// A sparse, matrix-oriented view of the attack relation for the
    /// matrix-power solvers (Cat, Dbs).
    pub fn sparse_view(&self) -> SparseMatrixView<'_> {
        SparseMatrixView::new(self)
    }
}
