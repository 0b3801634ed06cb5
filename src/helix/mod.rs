//! The triple-helix record: up to three peptides, their termini, the
//! experimental Tm and the glycine phase, plus the scores the scorer writes
//! back.

pub mod loader;

use crate::error::{ScResult, ScepttrError};
use crate::residue::{sequence_to_string, Residue};
use crate::scorer::types::HelixScore;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tracing::warn;

/// Longest sequence a record can hold.
pub const MAX_SEQUENCE: usize = 100;

/// Tm written for "no transition observed".
pub const NO_TRANSITION_SENTINEL: f64 = -10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ExperimentalTm {
    Measured(f64),
    NoTransition,
}

impl ExperimentalTm {
    /// The literal sentinel maps to `NoTransition`; everything else is measured.
    pub fn from_value(value: f64) -> Self {
        if value == NO_TRANSITION_SENTINEL {
            ExperimentalTm::NoTransition
        } else {
            ExperimentalTm::Measured(value)
        }
    }

    pub fn value(self) -> f64 {
        match self {
            ExperimentalTm::Measured(v) => v,
            ExperimentalTm::NoTransition => NO_TRANSITION_SENTINEL,
        }
    }
}

impl Default for ExperimentalTm {
    fn default() -> Self {
        ExperimentalTm::Measured(0.0)
    }
}

/// Position class inside a Gly-Xaa-Yaa repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Xaa,
    Yaa,
    Gly,
}

/// Where the first Xaa falls, as a residue index modulo 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlyPhase {
    xaa_pos: usize,
}

impl GlyPhase {
    pub fn new(xaa_pos: usize) -> Self {
        Self {
            xaa_pos: xaa_pos % 3,
        }
    }

    pub fn xaa_pos(&self) -> usize {
        self.xaa_pos
    }

    #[inline]
    pub fn of(&self, pos: usize) -> Phase {
        match (pos + 3 - self.xaa_pos) % 3 {
            0 => Phase::Xaa,
            1 => Phase::Yaa,
            _ => Phase::Gly,
        }
    }

    pub fn is_xaa(&self, pos: usize) -> bool {
        self.of(pos) == Phase::Xaa
    }

    pub fn is_yaa(&self, pos: usize) -> bool {
        self.of(pos) == Phase::Yaa
    }

    pub fn is_gly(&self, pos: usize) -> bool {
        self.of(pos) == Phase::Gly
    }
}

#[derive(Debug, Clone, Default)]
pub struct TripleHelix {
    /// One sequence per distinct peptide; all share `num_aa`.
    pub peptides: Vec<Vec<Residue>>,
    pub num_aa: usize,
    pub n_term: String,
    pub c_term: String,
    pub exp_tm: ExperimentalTm,
    pub phase: GlyPhase,
    /// False when no residue class reached the one-third glycine threshold.
    pub phase_consistent: bool,
    pub score: HelixScore,
}

impl TripleHelix {
    /// Builds and phase-classifies a record.
    pub fn new(
        peptides: Vec<Vec<Residue>>,
        n_term: impl Into<String>,
        c_term: impl Into<String>,
        exp_tm: ExperimentalTm,
    ) -> ScResult<Self> {
        if peptides.is_empty() || peptides.len() > 3 {
            return Err(ScepttrError::Validation(format!(
                "a helix needs 1-3 distinct peptides, got {}",
                peptides.len()
            )));
        }
        let num_aa = peptides[0].len();
        if num_aa == 0 || num_aa > MAX_SEQUENCE {
            return Err(ScepttrError::Validation(format!(
                "peptide length must be 1-{}, got {}",
                MAX_SEQUENCE, num_aa
            )));
        }
        if let Some(bad) = peptides.iter().position(|p| p.len() != num_aa) {
            return Err(ScepttrError::Validation(format!(
                "peptide {} has {} residues, expected {}",
                bad,
                peptides[bad].len(),
                num_aa
            )));
        }

        let mut helix = TripleHelix {
            peptides,
            num_aa,
            n_term: n_term.into(),
            c_term: c_term.into(),
            exp_tm,
            ..Default::default()
        };
        helix.classify_phase();
        Ok(helix)
    }

    pub fn num_pep(&self) -> usize {
        self.peptides.len()
    }

    /// Holds a hand-built helix to the length range a library record may take.
    pub fn check_record_bounds(&self) -> ScResult<()> {
        let num_aa = self.num_aa as i64;
        if !loader::RESIDUE_RANGE.contains(&num_aa) {
            return Err(ScepttrError::Validation(format!(
                "number of amino acids must be {}-{}, got {}",
                loader::RESIDUE_RANGE.start(),
                loader::RESIDUE_RANGE.end(),
                num_aa
            )));
        }
        Ok(())
    }

    /// Finds the glycine phase from the first peptide. A class qualifies when
    /// it holds at least `num_aa / 3` glycines; later classes win ties.
    pub fn classify_phase(&mut self) {
        let mut counts = [0usize; 3];
        if let Some(first) = self.peptides.first() {
            for (x, r) in first.iter().enumerate().take(self.num_aa) {
                if *r == Residue::GLY {
                    counts[x % 3] += 1;
                }
            }
        }

        let threshold = self.num_aa / 3;
        let mut found = None;
        for (class, count) in counts.iter().enumerate() {
            if *count >= threshold {
                // Gly in class k puts the first Xaa at k + 1.
                found = Some((class + 1) % 3);
            }
        }

        match found {
            Some(xaa_pos) => {
                self.phase = GlyPhase::new(xaa_pos);
                self.phase_consistent = true;
            }
            None => {
                let richest = counts
                    .iter()
                    .enumerate()
                    .max_by_key(|(i, c)| (**c, std::cmp::Reverse(*i)))
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                self.phase = GlyPhase::new(richest + 1);
                self.phase_consistent = false;
                warn!(
                    "⚠️  Peptide does not have a Gly every third residue; guessing Xaa at {}.\n{}",
                    self.phase.xaa_pos(),
                    self.dissect()
                );
            }
        }
    }

    /// Replaces one residue and reclassifies the phase. Scores are stale until
    /// the helix is rescored.
    pub fn mutate(&mut self, peptide: usize, position: usize, residue: Residue) -> ScResult<Residue> {
        let num_pep = self.num_pep();
        let seq = self.peptides.get_mut(peptide).ok_or_else(|| {
            ScepttrError::Validation(format!(
                "peptide {} does not exist (helix has {})",
                peptide, num_pep
            ))
        })?;
        let slot = seq.get_mut(position).ok_or_else(|| {
            ScepttrError::Validation(format!("position {} is past the end of the peptide", position))
        })?;
        if !residue.is_defined() {
            return Err(ScepttrError::Validation(
                "replacement residue must be a letter A-Z".into(),
            ));
        }
        let old = std::mem::replace(slot, residue);
        self.classify_phase();
        Ok(old)
    }

    /// Human-readable dump of the record and its current scores.
    pub fn dissect(&self) -> String {
        let mut out = String::new();
        let s = &self.score;
        let _ = writeln!(out, "numPep = {}", self.num_pep());
        let _ = writeln!(out, "numAA =  {}", self.num_aa);
        for p in &self.peptides {
            let _ = writeln!(out, "{}", sequence_to_string(p));
        }
        let _ = writeln!(out, "termination: {} {}", self.n_term, self.c_term);
        let _ = writeln!(out, "XaaPos = {}", self.phase.xaa_pos());
        let _ = writeln!(
            out,
            "expTm = {}. CCTm = {}. Deviation = {}",
            self.exp_tm.value(),
            s.correct.tm,
            s.deviation
        );
        let _ = writeln!(out, "CC register = {}", s.correct.register);
        let _ = writeln!(
            out,
            "High Tm = {} = {} + {}",
            s.best.tm, s.best_propensity, s.best_pairwise
        );
        let _ = writeln!(out, "Best register = {}", s.best.register);
        if let Some(second) = &s.second_best {
            let _ = writeln!(out, "Second highest Tm = {}", second.tm);
            let _ = writeln!(out, "Second best register = {}", second.register);
        }
        if let Some(spec) = s.specificity {
            let _ = writeln!(out, "Specificity = {}.", spec);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::residue::parse_sequence;

    fn helix(seq: &str) -> TripleHelix {
        TripleHelix::new(vec![parse_sequence(seq)], "Ac", "NH2", ExperimentalTm::Measured(30.0))
            .unwrap()
    }

    #[test]
    fn test_phase_gly_first() {
        let h = helix("GPOGPOGPOGPOGPOGPOGPOGPO");
        assert!(h.phase_consistent);
        assert_eq!(h.phase.xaa_pos(), 1);
        assert!(h.phase.is_gly(0));
        assert!(h.phase.is_xaa(1));
        assert!(h.phase.is_yaa(2));
    }

    #[test]
    fn test_phase_gly_last() {
        let h = helix("POGPOGPOGPOGPOGPOGPOGPOG");
        assert_eq!(h.phase.xaa_pos(), 0);
        assert!(h.phase.is_xaa(0));
        assert!(h.phase.is_gly(23));
    }

    #[test]
    fn test_phase_inconsistent_guesses() {
        let h = helix("PPPPPPPPPPPPPPPPPPPPPGPP");
        assert!(!h.phase_consistent);
        // Single Gly at index 21 (class 0) wins the guess.
        assert_eq!(h.phase.xaa_pos(), 1);
    }

    #[test]
    fn test_sentinel() {
        assert_eq!(ExperimentalTm::from_value(-10.0), ExperimentalTm::NoTransition);
        assert_eq!(ExperimentalTm::NoTransition.value(), -10.0);
        assert_eq!(ExperimentalTm::from_value(-9.5), ExperimentalTm::Measured(-9.5));
    }

    #[test]
    fn test_mutate() {
        let mut h = helix("GPOGPOGPOGPOGPOGPOGPOGPO");
        let old = h.mutate(0, 2, Residue::from_char('k')).unwrap();
        assert_eq!(old, Residue::HYP);
        assert_eq!(h.peptides[0][2], Residue::LYS);
        assert!(h.mutate(1, 0, Residue::LYS).is_err());
        assert!(h.mutate(0, 24, Residue::LYS).is_err());
    }

    #[test]
    fn test_record_bounds() {
        assert!(helix("GPOGPOGPOGPOGPOGPOGPOGPO").check_record_bounds().is_ok());
        assert!(helix(&"GPO".repeat(7)).check_record_bounds().is_ok());
        assert!(helix(&"GPO".repeat(16)).check_record_bounds().is_ok());
        assert!(helix("GPOGPOGPOGPOGPOGPOGP").check_record_bounds().is_err());
        assert!(helix(&"GPO".repeat(30)).check_record_bounds().is_err());
    }

    #[test]
    fn test_rejects_ragged() {
        let r = TripleHelix::new(
            vec![parse_sequence("GPOGPO"), parse_sequence("GPO")],
            "",
            "",
            ExperimentalTm::default(),
        );
        assert!(r.is_err());
    }
}
