pub mod engine;
pub mod pairwise;
pub mod register;
pub mod selection;
pub mod types;

use self::engine::{score_terms, StrandView};
use self::register::{Assignment, Offset, Register};
use self::selection::Selection;
pub use self::types::{HelixScore, RankedTm, RegisterTensor, RegisterTerms};
use crate::helix::TripleHelix;
use crate::params::ParameterTable;

/// Scores one composition in one register without touching the helix.
pub fn score_register(
    params: &ParameterTable,
    helix: &TripleHelix,
    assignment: Assignment,
    offset: Offset,
) -> RegisterTerms {
    let view = StrandView::new(helix, assignment, offset);
    score_terms(params, &view)
}

/// Rescores every canonical composition of `helix` and writes the tensor and
/// summary back. Non-canonical registers are left at zero.
pub fn score_helix(params: &ParameterTable, helix: &mut TripleHelix) {
    let mut tensor = std::mem::take(&mut helix.score.tensor);
    tensor.clear();

    let num_pep = helix.num_pep();
    let mut selection = Selection::new(num_pep);

    for assignment in Assignment::all(num_pep) {
        let register = Register::canonical(assignment);
        let terms = score_register(params, helix, assignment, Offset::Canonical);
        tensor.set(register, terms);
        selection.observe(RankedTm {
            tm: terms.tm,
            register,
        });
    }

    let mut score = HelixScore {
        tensor,
        ..Default::default()
    };
    if let Some(selected) = selection.finish() {
        let best_terms = score.tensor.get(selected.best.register);
        score.best = selected.best;
        score.best_propensity = best_terms.propensity;
        score.best_pairwise = best_terms.pairwise;
        score.second_best = selected.second_best;
        score.specificity = selected.specificity();
        score.correct = selected.correct;
        score.deviation = selected.deviation(helix.exp_tm);
    }
    helix.score = score;
}
