mod common;

use common::{r, HelixBuilder};
use proptest::prelude::*;
use scepttr::params::ParameterTable;
use scepttr::scorer::pairwise::{best_stabilizing_sum, InteractionKind, InteractionThread, THREADS};
use strum::IntoEnumIterator;

/// Exhaustive search over every kind sequence with no equal neighbours.
fn brute_force(axial: &[f64], lateral: &[f64]) -> f64 {
    fn walk(
        axial: &[f64],
        lateral: &[f64],
        i: usize,
        prev: Option<InteractionKind>,
        sum: f64,
        best: &mut f64,
    ) {
        if i == axial.len() {
            if sum > *best {
                *best = sum;
            }
            return;
        }
        for kind in InteractionKind::iter() {
            if Some(kind) == prev {
                continue;
            }
            let next = sum + kind.gain(axial[i], lateral[i]);
            walk(axial, lateral, i + 1, Some(kind), next, best);
        }
    }

    let mut best = 0.0;
    walk(axial, lateral, 0, None, 0.0, &mut best);
    best
}

prop_compose! {
    fn arb_thread()(m in 0usize..=12)(
        axial in proptest::collection::vec(-3.0..3.0f64, m),
        lateral in proptest::collection::vec(-3.0..3.0f64, m),
    ) -> (Vec<f64>, Vec<f64>) {
        (axial, lateral)
    }
}

proptest! {
    #[test]
    fn dp_matches_brute_force((axial, lateral) in arb_thread()) {
        let dp = best_stabilizing_sum(&axial, &lateral);
        let bf = brute_force(&axial, &lateral);
        prop_assert_eq!(dp, bf);
    }

    #[test]
    fn dp_is_non_negative_and_finite((axial, lateral) in arb_thread()) {
        let dp = best_stabilizing_sum(&axial, &lateral);
        prop_assert!(dp.is_finite());
        prop_assert!(dp >= 0.0);
    }

    #[test]
    fn dp_bounded_by_unconstrained_sum((axial, lateral) in arb_thread()) {
        let dp = best_stabilizing_sum(&axial, &lateral);
        let loose: f64 = axial
            .iter()
            .zip(&lateral)
            .map(|(a, l)| a.max(*l).max(0.0))
            .sum();
        prop_assert!(dp <= loose + 1e-9);
    }
}

#[test]
fn test_single_position_takes_larger() {
    assert_eq!(best_stabilizing_sum(&[1.0], &[2.5]), 2.5);
    assert_eq!(best_stabilizing_sum(&[-1.0], &[-2.5]), 0.0);
}

#[test]
fn test_thread_candidates_follow_geometry() {
    // Gly at 0 mod 3: Yaa positions are 2, 5, 8, ...
    let helix = HelixBuilder::new()
        .peptide("GPKGPOGPOGPOGPOGPOGPOGPO")
        .peptide("GPOGEOGPOGPOGPOGPOGPOGPO")
        .build();
    let mut params = ParameterTable::default();
    params.axial[(r('K'), r('E'))] = 1.0;
    params.lateral[(r('K'), r('P'))] = 0.5;

    let lead = &helix.peptides[0];
    let mid = &helix.peptides[1];
    let thread = InteractionThread::build(&params, helix.phase, lead, mid, THREADS[0]);

    assert_eq!(thread.axial.len(), 8);
    assert_eq!(thread.lateral.len(), 8);
    // K at 2 meets E at 4 (axial +2) and P at 1 (lateral -1).
    assert_eq!(thread.axial[0], 1.0);
    assert_eq!(thread.lateral[0], 0.5);
    // Last Yaa (23) has no axial partner.
    assert_eq!(thread.axial[7], 0.0);
    assert_eq!(thread.stabilizing(), 1.0);
}

#[test]
fn test_closing_thread_reaches_further() {
    assert_eq!(THREADS[2].axial, 5);
    assert_eq!(THREADS[2].lateral, 2);
    assert_eq!(THREADS[0].lateral, -1);
}
