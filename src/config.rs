use crate::error::{ScResult, ScepttrError};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Input files shared by every subcommand.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct InputFiles {
    #[arg(global = true, long, default_value = "parameters.txt")]
    pub params: PathBuf,
    #[arg(global = true, long, default_value = "parameters_exp.txt")]
    pub reference: PathBuf,
    /// Tunable-parameter grid; auto-flagging still applies without it.
    #[arg(global = true, long)]
    pub flags: Option<PathBuf>,
    /// Training library (also drives the interaction census).
    #[arg(global = true, long, default_value = "seq_input.txt")]
    pub library: PathBuf,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            params: PathBuf::from("parameters.txt"),
            reference: PathBuf::from("parameters_exp.txt"),
            flags: None,
            library: PathBuf::from("seq_input.txt"),
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitParams {
    /// Step applied to a parameter per trial.
    #[arg(long, default_value_t = 0.1)]
    pub delta: f64,
    /// Largest allowed distance from the reference value.
    #[arg(long, default_value_t = 2.0)]
    pub max_dev: f64,
    #[arg(long, default_value_t = 25)]
    pub max_rounds: usize,
    /// Census count above which a parameter becomes tunable.
    #[arg(long, default_value_t = 25)]
    pub auto_flag_threshold: usize,
    /// Library partitions per rescoring pass (0 = available cores).
    #[arg(long, default_value_t = 0)]
    pub workers: usize,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            delta: 0.1,
            max_dev: 2.0,
            max_rounds: 25,
            auto_flag_threshold: 25,
            workers: 0,
        }
    }
}

impl FitParams {
    /// Rejects step and cage sizes the optimizer cannot work with.
    pub fn validate(&self) -> ScResult<()> {
        if self.delta.is_nan() || self.delta <= 0.0 {
            return Err(ScepttrError::Config(format!(
                "delta must be positive, got {}",
                self.delta
            )));
        }
        if self.max_dev.is_nan() || self.max_dev < self.delta {
            return Err(ScepttrError::Config(format!(
                "max-dev ({}) must be at least delta ({})",
                self.max_dev, self.delta
            )));
        }
        Ok(())
    }
}
