use crate::reports;
use clap::Args;
use scepttr::config::{FitParams, InputFiles};
use scepttr::error::{ScResult, ScepttrError};
use scepttr::helix::loader::load_library;
use scepttr::library::score_library;
use scepttr::optimizer::{AcceptedChange, FitOptions, InteractionCensus, Optimizer, ProgressCallback};
use scepttr::output::{write_fitted_parameters, write_result_tables};
use scepttr::params::loader::load_model_parameters;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Deviation beyond which a helix is dumped in debug output.
const OUTLIER_DEVIATION: f64 = 9.0;

#[derive(Args, Debug, Clone)]
pub struct FitArgs {
    #[command(flatten)]
    pub fit: FitParams,

    /// Directory for the fitted parameters and result tables.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

struct LogProgress;

impl ProgressCallback for LogProgress {
    fn on_accept(&self, change: &AcceptedChange) -> bool {
        debug!(
            "   ✔ {} {:.2} -> {:.2} (SSD {:.4})",
            change.id, change.old, change.new, change.ssd
        );
        true
    }

    fn on_round(&self, round: usize, ssd: f64, accepted: usize) -> bool {
        info!("🔄 Round {}: SSD {:.4} ({} accepted)", round, ssd, accepted);
        true
    }
}

pub fn run(args: FitArgs, inputs: &InputFiles) -> ScResult<()> {
    args.fit.validate()?;
    let mut params = load_model_parameters(&inputs.params, &inputs.reference, inputs.flags.as_ref());

    let mut library = load_library(&inputs.library)?;
    if library.is_empty() {
        return Err(ScepttrError::Validation(
            "training library contains no helices".into(),
        ));
    }

    // 1. Census and flags
    let census = InteractionCensus::from_library(&library);
    let tunable = census.flag_tunable(&mut params.flags, args.fit.auto_flag_threshold);
    info!("🎯 {} tunable parameters", tunable);

    // 2. Baseline report
    let options = FitOptions::from(&args.fit);
    let baseline = score_library(&params.current, &mut library, options.workers);
    info!(
        "📊 Initial scoring: SSD {:.4}, mean deviation {:.3}",
        baseline.sum_squared_deviation,
        baseline.mean_deviation()
    );
    if let Some((i, d)) = baseline.worst {
        info!("   Worst helix #{} (deviation {:.2})", i, d);
    }
    for (i, h) in library.iter().enumerate() {
        if h.score.deviation.abs() > OUTLIER_DEVIATION {
            debug!("Helix Number: {}\n{}", i, h.dissect());
        }
    }

    // 3. Optimize
    info!(
        "⚙️  Fitting (delta {}, max dev {}, up to {} rounds)",
        options.delta, options.max_dev, options.max_rounds
    );
    let result = Optimizer::new(options).run(params, &mut library, &LogProgress);
    if result.aborted {
        info!("⏹️  Fit stopped early.");
    }

    // 4. Write outputs
    fs::create_dir_all(&args.output_dir)?;
    write_fitted_parameters(&args.output_dir, &result.params.current)?;
    write_result_tables(&args.output_dir, &library)?;

    reports::print_fit_summary(result.initial_ssd, &result.stats, result.rounds, &result.accepted);
    Ok(())
}
