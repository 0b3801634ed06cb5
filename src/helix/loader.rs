use super::{ExperimentalTm, TripleHelix};
use crate::error::{ScResult, ScepttrError};
use crate::residue::{sequence_to_string, Residue};
use crate::util::TokenStream;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{debug, info};

pub const PEPTIDE_RANGE: RangeInclusive<i64> = 1..=3;
pub const RESIDUE_RANGE: RangeInclusive<i64> = 21..=48;

/// Consecutive comment lines tolerated before a record.
const MAX_SKIPPED_LINES: usize = 50;

pub fn load_library<P: AsRef<Path>>(path: P) -> ScResult<Vec<TripleHelix>> {
    let path = path.as_ref();
    info!("📂 Loading Library: {}", path.display());
    let text = fs::read_to_string(path)?;
    parse_library(&text)
}

/// Parses a sequence library. Any out-of-range record aborts the whole load.
pub fn parse_library(text: &str) -> ScResult<Vec<TripleHelix>> {
    let mut ts = TokenStream::new(text);
    let title = ts.rest_of_line().unwrap_or_default().trim().to_string();
    info!("   Sequence Library: {}", title);

    let declared: usize = ts.next_parsed().ok_or_else(|| ScepttrError::Library {
        record: 0,
        message: "missing record count after the title line".into(),
    })?;

    // The declared count is untrusted; grow as records actually arrive.
    let mut helices: Vec<TripleHelix> = Vec::new();
    for n in 0..declared {
        let record = n + 1;
        let num_pep = read_record_start(&mut ts, record, declared)?;

        if !PEPTIDE_RANGE.contains(&num_pep) {
            return Err(range_error(
                record,
                helices.last(),
                format!("number of unique peptides must be 1-3, read {}", num_pep),
            ));
        }

        let num_aa = ts
            .next_parsed::<i64>()
            .ok_or_else(|| truncated(record, "residue count"))?;
        if !RESIDUE_RANGE.contains(&num_aa) {
            return Err(range_error(
                record,
                helices.last(),
                format!(
                    "number of amino acids must be 21-48, read {} (numPep = {})",
                    num_aa, num_pep
                ),
            ));
        }

        let n_term = ts.next_token().ok_or_else(|| truncated(record, "N-terminus"))?;
        let c_term = ts.next_token().ok_or_else(|| truncated(record, "C-terminus"))?;
        let exp_tm = ts
            .next_parsed::<f64>()
            .ok_or_else(|| truncated(record, "experimental Tm"))?;

        let mut peptides = Vec::with_capacity(num_pep as usize);
        for _ in 0..num_pep {
            let mut seq = Vec::with_capacity(num_aa as usize);
            for _ in 0..num_aa {
                let c = ts.next_char().ok_or_else(|| truncated(record, "sequence"))?;
                seq.push(Residue::from_char(c));
            }
            peptides.push(seq);
        }

        let helix = TripleHelix::new(
            peptides,
            n_term,
            c_term,
            ExperimentalTm::from_value(exp_tm),
        )
        .map_err(|e| ScepttrError::Library {
            record,
            message: e.to_string(),
        })?;
        debug!(
            "   Record {}: {} peptide(s) x {} aa, Tm {}",
            record,
            helix.num_pep(),
            helix.num_aa,
            exp_tm
        );
        helices.push(helix);
    }

    info!("✅ Loaded {} helices.", helices.len());
    Ok(helices)
}

/// Reads the peptide count that opens a record, skipping comment lines. A
/// leading `0` counts as a comment line too.
fn read_record_start(ts: &mut TokenStream, record: usize, declared: usize) -> ScResult<i64> {
    let mut skipped = 0;
    loop {
        let Some(token) = ts.next_token() else {
            return Err(ScepttrError::Library {
                record,
                message: format!(
                    "input ended before record {} of {}; the declared count may exceed the records present",
                    record, declared
                ),
            });
        };
        match token.parse::<i64>() {
            Ok(0) | Err(_) => {}
            Ok(num_pep) => return Ok(num_pep),
        }
        ts.rest_of_line();
        skipped += 1;
        if skipped > MAX_SKIPPED_LINES {
            return Err(ScepttrError::Library {
                record,
                message: format!(
                    "more than {} comment lines before record {}; check the declared count and commenting",
                    MAX_SKIPPED_LINES, record
                ),
            });
        }
    }
}

fn truncated(record: usize, what: &str) -> ScepttrError {
    ScepttrError::Library {
        record,
        message: format!("input ended while reading the {}", what),
    }
}

fn range_error(record: usize, previous: Option<&TripleHelix>, message: String) -> ScepttrError {
    let context = match previous {
        Some(prev) => format!(
            "\nprevious record:\n{}",
            prev.peptides
                .iter()
                .map(|p| sequence_to_string(p))
                .collect::<Vec<_>>()
                .join("\n")
        ),
        None => String::new(),
    };
    ScepttrError::Library {
        record,
        message: format!("{}{}", message, context),
    }
}
