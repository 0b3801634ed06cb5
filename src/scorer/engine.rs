use super::pairwise::{InteractionThread, THREADS};
use super::register::{Assignment, Offset};
use super::types::RegisterTerms;
use crate::helix::{GlyPhase, Phase, TripleHelix};
use crate::params::ParameterTable;
use crate::residue::Residue;

/// Per uncapped terminus (`n` / `c` tags).
pub const TERMINUS_PENALTY: f64 = 1.8;
/// Lost terminal hydrogen bond when the chain starts off-Xaa or ends off-Gly.
pub const HBOND_PENALTY: f64 = 1.8;
/// All three strands end in the same Tyr or Trp.
pub const AROMATIC_CAP_BONUS: f64 = 3.0;
/// Net charge tolerated before the charge penalty starts.
pub const FREE_NET_CHARGE: i32 = 6;

/// The three strands of one composition, trimmed to a register's shared
/// window.
#[derive(Debug, Clone, Copy)]
pub struct StrandView<'a> {
    pub strands: [&'a [Residue]; 3],
    pub len: usize,
    /// Residue count fed to the length model.
    pub length_basis: usize,
    pub phase: GlyPhase,
    pub n_term: &'a str,
    pub c_term: &'a str,
}

impl<'a> StrandView<'a> {
    pub fn new(helix: &'a TripleHelix, assignment: Assignment, offset: Offset) -> Self {
        let n = helix.num_aa;
        let ids = assignment.ids();
        let strands: [&'a [Residue]; 3] =
            std::array::from_fn(|s| &helix.peptides[ids[s]][offset.window(s, n)]);
        Self {
            strands,
            len: offset.trimmed_len(n),
            length_basis: offset.length_basis(n),
            phase: helix.phase,
            n_term: &helix.n_term,
            c_term: &helix.c_term,
        }
    }

    fn all_equal_to(&self, pos: usize, residue: Residue) -> bool {
        self.strands.iter().all(|s| s[pos] == residue)
    }
}

/// Scores one composition in one register.
pub fn score_terms(params: &ParameterTable, view: &StrandView) -> RegisterTerms {
    let mut terms = RegisterTerms::default();
    let phase = view.phase;

    // 1. Length
    let mut propensity = params.length.contribution(view.length_basis);

    // 2. Termination
    if view.n_term == "n" {
        propensity -= TERMINUS_PENALTY;
    }
    if view.c_term == "c" {
        propensity -= TERMINUS_PENALTY;
    }

    let Some(last) = view.len.checked_sub(1) else {
        terms.propensity = propensity;
        terms.tm = propensity;
        return terms;
    };

    for cap in [Residue::TYR, Residue::TRP] {
        if view.all_equal_to(0, cap) {
            propensity += AROMATIC_CAP_BONUS;
        }
        if view.all_equal_to(last, cap) {
            propensity += AROMATIC_CAP_BONUS;
        }
    }

    if !phase.is_xaa(0) {
        propensity -= HBOND_PENALTY;
    }
    if !phase.is_gly(last) {
        propensity -= HBOND_PENALTY;
    }

    // 3. Single residues and charge
    for x in 0..view.len {
        let tip = x <= 2 || x + 2 >= view.len;
        for strand in view.strands {
            let r = strand[x];
            let charge = r.charge();
            if charge != 0 {
                terms.net_charge += charge;
                terms.total_charge += 1;
            }

            let value = match phase.of(x) {
                Phase::Xaa => params.propensity_x[r],
                Phase::Yaa => params.propensity_y[r],
                Phase::Gly => continue,
            };
            propensity += if tip { value / 3.0 } else { value };
        }
    }

    // 4. Charge penalty (integer steps of three)
    let excess = terms.net_charge.abs() - FREE_NET_CHARGE;
    if excess > 0 {
        propensity -= (excess / 3) as f64;
    }

    // 5. Pairwise threads
    let [leading, middle, trailing] = view.strands;
    let pairs = [(leading, middle), (middle, trailing), (trailing, leading)];
    let mut pairwise = 0.0;
    for ((first, second), geometry) in pairs.into_iter().zip(THREADS) {
        let thread = InteractionThread::build(params, phase, first, second, geometry);
        pairwise += thread.total();
    }

    terms.propensity = propensity;
    terms.pairwise = pairwise;
    terms.tm = propensity + pairwise;
    terms
}
