use crate::error::ScResult;
use crate::helix::{ExperimentalTm, TripleHelix};
use crate::residue::sequence_to_string;
use crate::params::writer::save_parameter_table;
use crate::params::ParameterTable;
use crate::scorer::HelixScore;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::info;

pub const FITTED_PARAMETERS_FILE: &str = "newParameters.txt";

/// Result tables are split by how many distinct peptides a helix has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Display)]
pub enum CompositionClass {
    A3,
    A2B,
    ABC,
}

impl CompositionClass {
    pub fn num_pep(self) -> usize {
        match self {
            CompositionClass::A3 => 1,
            CompositionClass::A2B => 2,
            CompositionClass::ABC => 3,
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.txt", self)
    }
}

/// Writes one class table: `n ExpTm <class> HighTm Dev`, one row per helix
/// of that class, keyed by library index.
pub fn write_class_table<W: Write>(
    out: W,
    class: CompositionClass,
    helices: &[TripleHelix],
) -> ScResult<()> {
    let mut wtr = csv::WriterBuilder::new().delimiter(b' ').from_writer(out);
    let label = class.to_string();
    wtr.write_record(["n", "ExpTm", label.as_str(), "HighTm", "Dev"])?;

    for (n, h) in helices
        .iter()
        .enumerate()
        .filter(|(_, h)| h.num_pep() == class.num_pep())
    {
        wtr.write_record([
            n.to_string(),
            h.exp_tm.value().to_string(),
            h.score.correct.tm.to_string(),
            h.score.best.tm.to_string(),
            h.score.deviation.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the three class tables into `dir`. Returns the paths written.
pub fn write_result_tables<P: AsRef<Path>>(dir: P, helices: &[TripleHelix]) -> ScResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut written = Vec::new();
    for class in CompositionClass::iter() {
        let path = dir.join(class.file_name());
        write_class_table(File::create(&path)?, class, helices)?;
        info!("💾 Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

pub fn write_fitted_parameters<P: AsRef<Path>>(dir: P, table: &ParameterTable) -> ScResult<PathBuf> {
    let path = dir.as_ref().join(FITTED_PARAMETERS_FILE);
    save_parameter_table(&path, "SCEPTTr fitted parameters", table)?;
    info!("💾 Wrote {}", path.display());
    Ok(path)
}

/// Serialisable view of one scored helix.
#[derive(Debug, Serialize)]
pub struct HelixSummary<'a> {
    pub index: usize,
    pub num_aa: usize,
    pub n_term: &'a str,
    pub c_term: &'a str,
    pub peptides: Vec<String>,
    pub exp_tm: ExperimentalTm,
    pub phase_consistent: bool,
    #[serde(flatten)]
    pub score: &'a HelixScore,
}

impl<'a> HelixSummary<'a> {
    pub fn new(index: usize, helix: &'a TripleHelix) -> Self {
        Self {
            index,
            num_aa: helix.num_aa,
            n_term: &helix.n_term,
            c_term: &helix.c_term,
            peptides: helix.peptides.iter().map(|p| sequence_to_string(p)).collect(),
            exp_tm: helix.exp_tm,
            phase_consistent: helix.phase_consistent,
            score: &helix.score,
        }
    }
}

pub fn write_summaries_json<W: Write>(out: W, helices: &[TripleHelix]) -> ScResult<()> {
    let summaries: Vec<HelixSummary> = helices
        .iter()
        .enumerate()
        .map(|(i, h)| HelixSummary::new(i, h))
        .collect();
    serde_json::to_writer_pretty(out, &summaries)?;
    Ok(())
}
