use super::types::RankedTm;
use crate::helix::ExperimentalTm;

/// Tm at or below which a "no transition" record is not penalised.
pub const NO_TRANSITION_CEILING: f64 = 10.0;

/// Share of the best/correct gap added when the registers disagree.
pub const MISMATCH_WEIGHT: f64 = 0.5;

/// Running best, second-best and correct-composition trackers for one helix.
#[derive(Debug, Clone)]
pub struct Selection {
    num_pep: usize,
    best: Option<RankedTm>,
    second_best: Option<RankedTm>,
    correct: Option<RankedTm>,
}

/// Final picks once every assignment has been observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selected {
    pub best: RankedTm,
    pub second_best: Option<RankedTm>,
    pub correct: RankedTm,
}

impl Selection {
    pub fn new(num_pep: usize) -> Self {
        Self {
            num_pep,
            best: None,
            second_best: None,
            correct: None,
        }
    }

    /// Feeds one result. Ties go to the later result.
    pub fn observe(&mut self, candidate: RankedTm) {
        match self.best {
            Some(best) if candidate.tm < best.tm => {
                if self.second_best.map_or(true, |s| candidate.tm >= s.tm) {
                    self.second_best = Some(candidate);
                }
            }
            previous => {
                self.second_best = previous;
                self.best = Some(candidate);
            }
        }

        if candidate
            .register
            .assignment
            .is_correct_composition(self.num_pep)
            && self.correct.map_or(true, |c| candidate.tm >= c.tm)
        {
            self.correct = Some(candidate);
        }
    }

    /// `None` only if nothing was observed.
    pub fn finish(self) -> Option<Selected> {
        let best = self.best?;
        Some(Selected {
            best,
            second_best: self.second_best,
            correct: self.correct.unwrap_or(best),
        })
    }
}

impl Selected {
    pub fn specificity(&self) -> Option<f64> {
        self.second_best.map(|s| self.best.tm - s.tm)
    }

    /// Signed error against experiment. A correct composition that is not
    /// the overall favourite widens the error by half the Tm gap.
    pub fn deviation(&self, exp: ExperimentalTm) -> f64 {
        let best_tm = self.best.tm;
        let exp_tm = match exp {
            ExperimentalTm::NoTransition => {
                return if best_tm <= NO_TRANSITION_CEILING {
                    0.0
                } else {
                    best_tm - NO_TRANSITION_CEILING
                };
            }
            ExperimentalTm::Measured(v) => v,
        };

        if self.best.register.assignment == self.correct.register.assignment {
            return best_tm - exp_tm;
        }

        let base = self.correct.tm - exp_tm;
        let gap = MISMATCH_WEIGHT * (self.correct.tm - best_tm).abs();
        if base < 0.0 {
            base - gap
        } else {
            base + gap
        }
    }
}
