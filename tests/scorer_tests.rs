mod common;

use common::{flat_params, r, toy_params, HelixBuilder};
use proptest::prelude::*;
use rstest::rstest;
use scepttr::helix::ExperimentalTm;
use scepttr::params::ParameterTable;
use scepttr::residue::Residue;
use scepttr::scorer::register::{Assignment, Offset, Register};
use scepttr::scorer::{score_helix, score_register};

/// Xaa-first host: no terminal hydrogen-bond penalties.
const POG: &str = "POGPOGPOGPOGPOGPOGPOGPOG";

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_zero_model_homotrimer() {
    let mut helix = HelixBuilder::new().peptide(POG).exp_tm(30.0).build();
    score_helix(&ParameterTable::default(), &mut helix);

    let s = &helix.score;
    assert_eq!(s.tensor.canonical(Assignment::new(0, 0, 0)).tm, 0.0);
    assert_eq!(s.best.tm, 0.0);
    assert_eq!(s.correct.tm, 0.0);
    assert_eq!(s.best.register, Register::canonical(Assignment::new(0, 0, 0)));
    assert!(s.second_best.is_none());
    assert!(s.specificity.is_none());
    assert_eq!(s.deviation, -30.0);
}

#[rstest]
#[case(5.0, 0.0)]
#[case(10.0, 0.0)]
#[case(10.5, 0.5)]
#[case(20.0, 10.0)]
fn test_no_transition_clamp(#[case] predicted: f64, #[case] expected: f64) {
    let mut helix = HelixBuilder::new().peptide(POG).exp_tm(-10.0).build();
    assert_eq!(helix.exp_tm, ExperimentalTm::NoTransition);
    score_helix(&flat_params(predicted), &mut helix);
    assert_eq!(helix.score.best.tm, predicted);
    assert_eq!(helix.score.deviation, expected);
}

#[rstest]
#[case("Ac", "NH2", 0.0)]
#[case("n", "NH2", -1.8)]
#[case("Ac", "c", -1.8)]
#[case("n", "c", -3.6)]
#[case("N", "C", 0.0)]
fn test_termination(#[case] n: &str, #[case] c: &str, #[case] expected: f64) {
    let mut helix = HelixBuilder::new().peptide(POG).termini(n, c).build();
    score_helix(&ParameterTable::default(), &mut helix);
    assert_close(helix.score.best.tm, expected);
}

#[rstest]
// Gly-first host loses the Xaa start and the Gly end.
#[case("GPOGPOGPOGPOGPOGPOGPOGPO", -3.6)]
#[case("YOGPOGPOGPOGPOGPOGPOGPOG", 3.0)]
#[case("WOGPOGPOGPOGPOGPOGPOGPOG", 3.0)]
// Trailing Trp bonus, but the chain now ends off-Gly.
#[case("POGPOGPOGPOGPOGPOGPOGPOGW", 1.2)]
fn test_caps_and_hbonds(#[case] seq: &str, #[case] expected: f64) {
    let mut helix = HelixBuilder::new().peptide(seq).build();
    assert!(helix.phase_consistent);
    score_helix(&ParameterTable::default(), &mut helix);
    assert_close(helix.score.best.tm, expected);
}

#[test]
fn test_cap_bonus_needs_all_strands() {
    let mut helix = HelixBuilder::new()
        .peptide("YOGPOGPOGPOGPOGPOGPOGPOG")
        .peptide(POG)
        .build();
    score_helix(&ParameterTable::default(), &mut helix);
    let t = &helix.score.tensor;
    assert_eq!(t.canonical(Assignment::new(0, 0, 0)).tm, 3.0);
    assert_eq!(t.canonical(Assignment::new(0, 0, 1)).tm, 0.0);
    assert_eq!(t.canonical(Assignment::new(1, 1, 1)).tm, 0.0);
}

#[test]
fn test_propensity_tips_weighted() {
    let mut params = ParameterTable::default();
    params.propensity_x[Residue::PRO] = 3.0;
    params.propensity_y[Residue::HYP] = 3.0;
    let mut helix = HelixBuilder::new().peptide(POG).build();
    score_helix(&params, &mut helix);
    // Per strand: tips at 0, 1, 22 give 1 each; 13 interior Pro/Hyp give 3.
    assert_eq!(helix.score.best.tm, 3.0 * (3.0 + 39.0));
    assert_eq!(helix.score.best_propensity, 126.0);
    assert_eq!(helix.score.best_pairwise, 0.0);
}

#[rstest]
#[case(2, 0.0)]
#[case(3, -1.0)]
#[case(4, -2.0)]
#[case(8, -6.0)]
fn test_charge_penalty(#[case] lysines: usize, #[case] expected: f64) {
    let seq = format!("{}{}", "PKG".repeat(lysines), "POG".repeat(8 - lysines));
    let mut helix = HelixBuilder::new().peptide(&seq).build();
    score_helix(&ParameterTable::default(), &mut helix);
    let terms = helix.score.tensor.canonical(Assignment::new(0, 0, 0));
    assert_eq!(terms.net_charge, 3 * lysines as i32);
    assert_eq!(terms.total_charge, 3 * lysines as i32);
    assert_eq!(terms.tm, expected);
}

#[test]
fn test_destabilizing_cells_forced() {
    let mut params = ParameterTable::default();
    params.axial[(Residue::HYP, Residue::PRO)] = -0.5;
    let mut helix = HelixBuilder::new().peptide(POG).build();
    score_helix(&params, &mut helix);
    // 7 + 7 Hyp->Pro contacts at +2, 6 at +5.
    assert_eq!(helix.score.best_pairwise, -10.0);
    assert_eq!(helix.score.best.tm, -10.0);
}

#[test]
fn test_stabilizing_cells_alternate() {
    let mut params = ParameterTable::default();
    params.axial[(Residue::HYP, Residue::PRO)] = 1.0;
    params.lateral[(Residue::HYP, Residue::PRO)] = 1.0;
    let mut helix = HelixBuilder::new().peptide(POG).build();
    score_helix(&params, &mut helix);
    // Alternating kinds take every Yaa on the two near threads (8 + 8); the
    // closing thread runs out of axial partners after six and gets 7.
    assert_eq!(helix.score.best_pairwise, 23.0);
}

#[test]
fn test_register_mismatch_widens_deviation() {
    let mut params = toy_params();
    params.propensity_x[r('A')] = -2.0;
    let mut helix = HelixBuilder::new()
        .peptide("GPOGPOGPOGPOGPOGPOGPOGPO")
        .peptide("GAOGAOGAOGAOGAOGAOGAOGAO")
        .exp_tm(30.0)
        .build();
    score_helix(&params, &mut helix);

    let s = &helix.score;
    assert_eq!(s.best.register.assignment, Assignment::new(0, 0, 0));
    assert_ne!(s.correct.register.assignment, s.best.register.assignment);

    let base = s.correct.tm - 30.0;
    let gap = 0.5 * (s.correct.tm - s.best.tm).abs();
    let expected = if base < 0.0 { base - gap } else { base + gap };
    assert_eq!(s.deviation, expected);
}

#[test]
fn test_non_canonical_register_scoring() {
    let mut p = ParameterTable::default();
    p.length.b = 1.0;
    let helix = HelixBuilder::new().peptide(POG).build();
    let a = Assignment::new(0, 0, 0);

    assert_eq!(score_register(&p, &helix, a, Offset::Canonical).tm, 24.0);
    // One-triplet shift: 21 shared residues, credited 22.
    assert_eq!(score_register(&p, &helix, a, Offset::TrailingOne).tm, 22.0);
    // Two-triplet shift: 18 shared residues.
    assert_eq!(score_register(&p, &helix, a, Offset::MiddleTwo).tm, 18.0);
}

// --- SELECTION PROPERTIES ---

prop_compose! {
    fn arb_peptide()(
        triplets in proptest::collection::vec(
            (prop::sample::select(b"PAEKDRQOY".to_vec()), prop::sample::select(b"OAEKDRQPW".to_vec())),
            7..=12,
        )
    ) -> String {
        triplets
            .into_iter()
            .map(|(x, y)| format!("G{}{}", x as char, y as char))
            .collect()
    }
}

prop_compose! {
    fn arb_heteromer()(num_pep in 1usize..=3)(
        peps in proptest::collection::vec(arb_peptide(), num_pep),
    ) -> Vec<String> {
        peps
    }
}

fn equal_length(peps: &[String]) -> Vec<String> {
    let n = peps.iter().map(|p| p.len()).min().unwrap_or(0);
    peps.iter().map(|p| p[..n].to_string()).collect()
}

proptest! {
    #[test]
    fn selection_invariants(peps in arb_heteromer(), exp in 0.0..60.0f64) {
        let peps = equal_length(&peps);
        let mut builder = HelixBuilder::new().exp_tm(exp);
        for p in &peps {
            builder = builder.peptide(p);
        }
        let mut helix = builder.build();
        score_helix(&toy_params(), &mut helix);
        let s = &helix.score;

        if let Some(second) = s.second_best {
            prop_assert!(s.best.tm >= second.tm);
            prop_assert!(s.specificity.unwrap() >= 0.0);
            prop_assert_eq!(s.specificity.unwrap(), s.best.tm - second.tm);
        } else {
            prop_assert_eq!(peps.len(), 1);
        }

        let [a, b, c] = s.correct.register.assignment.ids();
        match peps.len() {
            2 => prop_assert!(!(a == b && b == c)),
            3 => prop_assert!(a != b && a != c && b != c),
            _ => {}
        }

        // Every canonical Tm is bounded by the best.
        for asg in Assignment::all(peps.len()) {
            prop_assert!(s.tensor.canonical(asg).tm <= s.best.tm);
        }
        prop_assert!(s.correct.tm <= s.best.tm);
    }
}
