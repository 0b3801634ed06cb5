pub mod config;
pub mod error;
pub mod helix;
pub mod library;
pub mod optimizer;
pub mod output;
pub mod params;
pub mod residue;
pub mod scorer;
pub mod util;
// cmd and reports are modules of the binary crate (main).
