//! How often the training library exercises each parameter.
//!
//! Counts decide which parameters are worth fitting and which interactions
//! in a user helix are poorly supported by data.

use crate::helix::{Phase, TripleHelix};
use crate::params::{OptimizationFlags, ParameterId};
use crate::residue::{LetterTable, PairTable};
use crate::scorer::register::Assignment;
use std::collections::BTreeMap;
use tracing::debug;

pub const DEFAULT_THRESHOLD: usize = 25;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionCensus {
    pub propensity_x: LetterTable<usize>,
    pub propensity_y: LetterTable<usize>,
    pub axial: PairTable<usize>,
    pub lateral: PairTable<usize>,
}

/// Pair contacts of one composition, visited at every Yaa position.
pub fn contacts(helix: &TripleHelix, assignment: Assignment) -> Vec<ParameterId> {
    let n = helix.num_aa;
    let [a, b, c] = assignment.ids().map(|i| &helix.peptides[i]);
    let mut out = Vec::new();
    for x in (0..n).filter(|&x| helix.phase.is_yaa(x)) {
        if x + 2 < n {
            out.push(ParameterId::Axial(a[x], b[x + 2]));
            out.push(ParameterId::Axial(b[x], c[x + 2]));
        }
        if x + 5 < n {
            out.push(ParameterId::Axial(c[x], a[x + 5]));
        }
        if x > 1 {
            out.push(ParameterId::Lateral(a[x], b[x - 1]));
            out.push(ParameterId::Lateral(b[x], c[x - 1]));
        }
        if x + 2 < n {
            out.push(ParameterId::Lateral(c[x], a[x + 2]));
        }
    }
    out
}

impl InteractionCensus {
    pub fn from_library(helices: &[TripleHelix]) -> Self {
        let mut census = InteractionCensus::default();
        for helix in helices {
            census.add_helix(helix);
        }
        census
    }

    pub fn add_helix(&mut self, helix: &TripleHelix) {
        for peptide in &helix.peptides {
            for (x, r) in peptide.iter().enumerate() {
                match helix.phase.of(x) {
                    Phase::Xaa => self.propensity_x[*r] += 1,
                    Phase::Yaa => self.propensity_y[*r] += 1,
                    Phase::Gly => {}
                }
            }
        }
        for assignment in Assignment::all(helix.num_pep()) {
            for id in contacts(helix, assignment) {
                self.bump(id);
            }
        }
    }

    fn bump(&mut self, id: ParameterId) {
        match id {
            ParameterId::PropensityX(r) => self.propensity_x[r] += 1,
            ParameterId::PropensityY(r) => self.propensity_y[r] += 1,
            ParameterId::Axial(p, q) => self.axial[(p, q)] += 1,
            ParameterId::Lateral(p, q) => self.lateral[(p, q)] += 1,
        }
    }

    pub fn count(&self, id: ParameterId) -> usize {
        match id {
            ParameterId::PropensityX(r) => self.propensity_x[r],
            ParameterId::PropensityY(r) => self.propensity_y[r],
            ParameterId::Axial(p, q) => self.axial[(p, q)],
            ParameterId::Lateral(p, q) => self.lateral[(p, q)],
        }
    }

    /// Flags every parameter seen more than `threshold` times, then clears
    /// the chemically locked cells. Returns the number of tunable parameters.
    pub fn flag_tunable(&self, flags: &mut OptimizationFlags, threshold: usize) -> usize {
        for id in ParameterId::search_order() {
            if self.count(id) > threshold {
                flags.set(id, true);
            }
        }
        flags.apply_locks();
        let tunable = flags.tunable().len();
        debug!("   Census flagged {} tunable parameters", tunable);
        tunable
    }

    /// Contacts of `helix` (over every composition) seen fewer than
    /// `threshold` times in the training library.
    pub fn low_confidence(&self, helix: &TripleHelix, threshold: usize) -> LowConfidenceReport {
        let mut report = LowConfidenceReport::default();
        for assignment in Assignment::all(helix.num_pep()) {
            for id in contacts(helix, assignment) {
                if self.count(id) < threshold {
                    report.total += 1;
                    *report.interactions.entry(id).or_insert(0) += 1;
                }
            }
        }
        report
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LowConfidenceReport {
    pub total: usize,
    pub interactions: BTreeMap<ParameterId, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helix::ExperimentalTm;
    use crate::residue::{parse_sequence, Residue};

    fn host_guest() -> TripleHelix {
        TripleHelix::new(
            vec![parse_sequence("GPOGPOGPOGPOGPOGPOGPOGPO")],
            "Ac",
            "NH2",
            ExperimentalTm::Measured(47.0),
        )
        .unwrap()
    }

    #[test]
    fn test_census_counts_and_flags() {
        let lib = vec![host_guest(); 3];
        let census = InteractionCensus::from_library(&lib);
        // 8 Pro in Xaa per peptide, three copies.
        assert_eq!(census.propensity_x[Residue::PRO], 24);
        assert_eq!(census.propensity_y[Residue::HYP], 24);
        assert!(census.axial[(Residue::HYP, Residue::PRO)] > 0);

        let mut flags = OptimizationFlags::default();
        census.flag_tunable(&mut flags, 0);
        // Every observed cell touches Pro or Hyp, so all are locked.
        assert!(flags.tunable().is_empty());
    }

    #[test]
    fn test_low_confidence_with_empty_census() {
        let census = InteractionCensus::default();
        let h = host_guest();
        let report = census.low_confidence(&h, DEFAULT_THRESHOLD);
        assert_eq!(report.total, contacts(&h, Assignment::new(0, 0, 0)).len());
        assert!(report.total > 0);
    }
}
