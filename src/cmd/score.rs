use crate::reports;
use clap::Args;
use scepttr::config::InputFiles;
use scepttr::error::ScResult;
use scepttr::helix::loader::load_library;
use scepttr::library::score_library;
use scepttr::output::write_summaries_json;
use scepttr::params::loader::load_model_parameters;
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Library to score instead of the training library.
    #[arg(long)]
    pub user_library: Option<PathBuf>,

    /// Emit JSON summaries on stdout instead of tables.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = 0)]
    pub workers: usize,
}

pub fn run(args: ScoreArgs, inputs: &InputFiles) -> ScResult<()> {
    let params = load_model_parameters(&inputs.params, &inputs.reference, inputs.flags.as_ref());

    let path = args.user_library.as_ref().unwrap_or(&inputs.library);
    let mut helices = load_library(path)?;
    let stats = score_library(&params.current, &mut helices, args.workers);
    info!(
        "📊 Scored {} helices: SSD {:.4}, RMS deviation {:.3}",
        stats.count,
        stats.sum_squared_deviation,
        stats.rms_deviation()
    );

    if args.json {
        write_summaries_json(io::stdout().lock(), &helices)?;
        println!();
        return Ok(());
    }

    for (n, helix) in helices.iter().enumerate() {
        reports::print_register_report(&format!("Helix #{}", n + 1), helix);
    }
    Ok(())
}
