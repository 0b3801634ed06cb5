use crate::config::FitParams;
use crate::helix::TripleHelix;
use crate::library::{score_library, LibraryStats};
use crate::params::{ModelParameters, ParameterId};
use tracing::debug;

pub struct FitOptions {
    pub delta: f64,
    pub max_dev: f64,
    pub max_rounds: usize,
    pub workers: usize,
}

impl From<&FitParams> for FitOptions {
    fn from(p: &FitParams) -> Self {
        Self {
            delta: p.delta,
            max_dev: p.max_dev,
            max_rounds: p.max_rounds,
            workers: p.workers,
        }
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self::from(&FitParams::default())
    }
}

/// One accepted parameter move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptedChange {
    pub round: usize,
    pub id: ParameterId,
    pub old: f64,
    pub new: f64,
    /// Library sum of squared deviation after the move.
    pub ssd: f64,
}

pub struct FitResult {
    pub params: ModelParameters,
    pub initial_ssd: f64,
    pub final_ssd: f64,
    pub rounds: usize,
    pub accepted: Vec<AcceptedChange>,
    /// Library stats from the final rescoring pass.
    pub stats: LibraryStats,
    pub aborted: bool,
}

/// Receives fitting events. Returning `false` stops the fit; the library is
/// still rescored with whatever was accepted so far.
pub trait ProgressCallback: Send + Sync {
    fn on_accept(&self, _change: &AcceptedChange) -> bool {
        true
    }
    fn on_round(&self, round: usize, ssd: f64, accepted_this_round: usize) -> bool;
}

/// Callback that never interrupts.
pub struct Silent;

impl ProgressCallback for Silent {
    fn on_round(&self, _round: usize, _ssd: f64, _accepted: usize) -> bool {
        true
    }
}

pub struct Optimizer {
    options: FitOptions,
}

impl Optimizer {
    pub fn new(options: FitOptions) -> Self {
        Self { options }
    }

    /// Coordinate descent over every flagged, unlocked parameter.
    pub fn run<CB: ProgressCallback>(
        &self,
        mut params: ModelParameters,
        helices: &mut [TripleHelix],
        callback: &CB,
    ) -> FitResult {
        let opts = &self.options;
        let tunable: Vec<ParameterId> = params
            .flags
            .tunable()
            .into_iter()
            .filter(|id| !id.is_locked())
            .collect();
        debug!("   {} tunable parameters", tunable.len());

        // 1. Baseline
        let initial_ssd = score_library(&params.current, helices, opts.workers).sum_squared_deviation;
        let mut current_ssd = initial_ssd;
        let mut accepted = Vec::new();
        let mut rounds = 0;
        let mut aborted = false;

        // 2. Rounds
        while rounds < opts.max_rounds && !aborted {
            rounds += 1;
            let accepted_before = accepted.len();

            for &id in &tunable {
                let orig = params.current.get(id);
                let mut kept = false;

                // A. Decrement, then increment from the original value
                for trial in [orig - opts.delta, orig + opts.delta] {
                    if !params.within_bounds(id, trial, opts.max_dev) {
                        continue;
                    }
                    params.current.set(id, trial);
                    let ssd = score_library(&params.current, helices, opts.workers)
                        .sum_squared_deviation;
                    if ssd < current_ssd {
                        let change = AcceptedChange {
                            round: rounds,
                            id,
                            old: orig,
                            new: trial,
                            ssd,
                        };
                        debug!("   {} {} -> {} (SSD {:.4})", id, orig, trial, ssd);
                        current_ssd = ssd;
                        accepted.push(change);
                        kept = true;
                        if !callback.on_accept(&change) {
                            aborted = true;
                        }
                        break;
                    }
                }

                // B. Restore
                if !kept {
                    params.current.set(id, orig);
                }
                if aborted {
                    break;
                }
            }

            let accepted_this_round = accepted.len() - accepted_before;
            if !callback.on_round(rounds, current_ssd, accepted_this_round) {
                aborted = true;
            }
            if accepted_this_round == 0 {
                break;
            }
        }

        // 3. Leave the library scored with the returned parameters
        let stats = score_library(&params.current, helices, opts.workers);

        FitResult {
            params,
            initial_ssd,
            final_ssd: stats.sum_squared_deviation,
            rounds,
            accepted,
            stats,
            aborted,
        }
    }
}
