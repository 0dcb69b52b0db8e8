//! The extension-finding capability (§9 "Polymorphism across semantics"):
//! each probabilistic semantics differs from the others only in *which*
//! extensions it looks for inside a sampled or enumerated subgraph. This
//! module gives that difference a name so [`super::base::dispatch`] can stay
//! generic over it.

use crate::af::AAFramework;
use crate::error::CoreResult;
use crate::extensions::{complete_extensions, grounded_extension, ideal_extension, preferred_extensions};

/// "Given a subgraph, return its set of extensions as a finite list of
/// argument sets" (labels, not internal ids — subgraphs built via
/// [`AAFramework::induced_subgraph`] keep the parent's labels, so labels are
/// stable across the whole recursion and safe to accumulate scores by).
pub trait ExtensionFamily: Sync {
    /// The extensions of `af` under this family's semantics.
    fn extensions(&self, af: &AAFramework) -> CoreResult<Vec<Vec<usize>>>;

    /// Whether the large-graph fixed-size sampling heuristic (§4.4/§9)
    /// applies to this family. The reference implementation excludes
    /// grounded: its single extension is cheap enough per sample that the
    /// full Bernoulli draw stays tractable even on large graphs.
    fn allows_large_graph_heuristic(&self) -> bool {
        true
    }

    /// A short, stable name used in log messages and CLI output.
    fn name(&self) -> &'static str;
}

/// The grounded extension, as a single-member extension family.
pub struct GroundedFamily;

impl ExtensionFamily for GroundedFamily {
    fn extensions(&self, af: &AAFramework) -> CoreResult<Vec<Vec<usize>>> {
        Ok(vec![grounded_extension(af)])
    }

    fn allows_large_graph_heuristic(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "grounded"
    }
}

/// All complete extensions.
pub struct CompleteFamily;

impl ExtensionFamily for CompleteFamily {
    fn extensions(&self, af: &AAFramework) -> CoreResult<Vec<Vec<usize>>> {
        complete_extensions(af)
    }

    fn name(&self) -> &'static str {
        "complete"
    }
}

/// The preferred (⊂-maximal complete) extensions.
pub struct PreferredFamily;

impl ExtensionFamily for PreferredFamily {
    fn extensions(&self, af: &AAFramework) -> CoreResult<Vec<Vec<usize>>> {
        preferred_extensions(af)
    }

    fn name(&self) -> &'static str {
        "preferred"
    }
}

/// The unique ideal extension, as a single-member extension family.
pub struct IdealFamily;

impl ExtensionFamily for IdealFamily {
    fn extensions(&self, af: &AAFramework) -> CoreResult<Vec<Vec<usize>>> {
        Ok(vec![ideal_extension(af)?])
    }

    fn name(&self) -> &'static str {
        "ideal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::af::ArgumentSet;

    fn simple_attack() -> AAFramework {
        let args = ArgumentSet::new_with_labels(&[1, 2]);
        let mut af = AAFramework::new_with_argument_set(args);
        af.new_attack(1, 2).unwrap();
        af
    }

    #[test]
    fn test_grounded_family_single_extension() {
        let af = simple_attack();
        let exts = GroundedFamily.extensions(&af).unwrap();
        assert_eq!(exts, vec![vec![1]]);
        assert!(!GroundedFamily.allows_large_graph_heuristic());
    }

    #[test]
    fn test_complete_family_matches_core_complete() {
        let af = simple_attack();
        let exts = CompleteFamily.extensions(&af).unwrap();
        assert_eq!(exts, complete_extensions(&af).unwrap());
    }

    #[test]
    fn test_ideal_family_single_extension() {
        let af = simple_attack();
        let exts = IdealFamily.extensions(&af).unwrap();
        assert_eq!(exts.len(), 1);
    }
}
