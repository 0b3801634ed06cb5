pub mod census;
pub mod runner;

pub use self::census::{InteractionCensus, LowConfidenceReport};
pub use self::runner::{AcceptedChange, FitOptions, FitResult, Optimizer, ProgressCallback, Silent};
