//! Which penalties need a boosting fit
//!
//! The plan is computed before any boosting starts, so the fits can run in any order. Active
//! sets with the same cardinality as the previous non-empty one reuse its solutions; an empty
//! active set clears that memory.

use crate::active_set::ActiveSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// No active feature, zero coefficients and stopping number zero
    Empty,
    /// Copy the solutions of the fitted penalty with the given index
    Reuse(usize),
    /// Boost on the active set
    Fit,
}

/// Last non-empty active set seen: the fitted penalty it maps to and its cardinality
#[derive(Debug, Clone, Copy)]
struct Previous {
    source: usize,
    len: usize,
}

pub fn plan(active_sets: &[ActiveSet]) -> Vec<Plan> {
    active_sets
        .iter()
        .enumerate()
        .scan(None, |previous: &mut Option<Previous>, (index, set)| {
            let step = match *previous {
                _ if set.is_empty() => Plan::Empty,
                Some(prev) if prev.len == set.len() => Plan::Reuse(prev.source),
                _ => Plan::Fit,
            };

            *previous = match step {
                Plan::Empty => None,
                Plan::Reuse(source) => Some(Previous {
                    source,
                    len: set.len(),
                }),
                Plan::Fit => Some(Previous {
                    source: index,
                    len: set.len(),
                }),
            };

            Some(step)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets(features: &[&[usize]]) -> Vec<ActiveSet> {
        features.iter().map(|f| ActiveSet::new(f.to_vec())).collect()
    }

    #[test]
    fn growing_path_fits_new_cardinalities() {
        let plan = plan(&sets(&[&[], &[0], &[0, 2], &[0, 2, 4], &[0, 2, 4]]));
        assert_eq!(
            plan,
            vec![Plan::Empty, Plan::Fit, Plan::Fit, Plan::Fit, Plan::Reuse(3)]
        );
    }

    #[test]
    fn reuse_only_compares_cardinality() {
        let plan = plan(&sets(&[&[1, 2], &[3, 4], &[5, 6]]));
        assert_eq!(plan, vec![Plan::Fit, Plan::Reuse(0), Plan::Reuse(0)]);
    }

    #[test]
    fn empty_set_resets_the_memory() {
        let plan = plan(&sets(&[&[1], &[], &[1], &[2], &[1, 2], &[]]));
        assert_eq!(
            plan,
            vec![
                Plan::Fit,
                Plan::Empty,
                Plan::Fit,
                Plan::Reuse(2),
                Plan::Fit,
                Plan::Empty
            ]
        );
    }
}
