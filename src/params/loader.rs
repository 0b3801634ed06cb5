use super::{ModelParameters, OptimizationFlags, ParameterTable};
use crate::error::ScResult;
use crate::residue::{Residue, LETTER_COUNT};
use crate::util::TokenStream;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// One addressable value inside a parameter-shaped file.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Length(usize),
    Xaa(Residue),
    Yaa(Residue),
    Lateral(Residue, Residue),
    Axial(Residue, Residue),
}

/// Receives values as the section walker finds them. Returning `false`
/// rejects the token and abandons the rest of the section.
trait SectionSink {
    fn accept(&mut self, slot: Slot, token: &str) -> bool;
}

impl SectionSink for ParameterTable {
    fn accept(&mut self, slot: Slot, token: &str) -> bool {
        let Ok(v) = token.parse::<f64>() else {
            return false;
        };
        match slot {
            Slot::Length(0) => self.length.a = v,
            Slot::Length(1) => self.length.b = v,
            Slot::Length(_) => self.length.c = v,
            Slot::Xaa(r) => self.propensity_x[r] = v,
            Slot::Yaa(r) => self.propensity_y[r] = v,
            Slot::Lateral(a, b) => self.lateral[(a, b)] = v,
            Slot::Axial(a, b) => self.axial[(a, b)] = v,
        }
        true
    }
}

impl SectionSink for OptimizationFlags {
    fn accept(&mut self, slot: Slot, token: &str) -> bool {
        let Ok(v) = token.parse::<i32>() else {
            return false;
        };
        let on = v == 1;
        match slot {
            // Only the last of the three length entries counts.
            Slot::Length(2) => self.length = on,
            Slot::Length(_) => {}
            Slot::Xaa(r) => self.propensity_x[r] = on,
            Slot::Yaa(r) => self.propensity_y[r] = on,
            Slot::Lateral(a, b) => self.lateral[(a, b)] = on,
            Slot::Axial(a, b) => self.axial[(a, b)] = on,
        }
        true
    }
}

/// Walks `Length`/`XaaPropensity`/`YaaPropensity`/`PairwiseLateral`/
/// `PairwiseAxial` sections until `EOF`. A section starts on a line holding
/// only its keyword. Returns the title line.
fn walk_sections<S: SectionSink>(text: &str, sink: &mut S, source: &str) -> String {
    let mut ts = TokenStream::new(text);
    let title = ts.rest_of_line().unwrap_or_default().trim().to_string();

    while let Some(line) = ts.rest_of_line() {
        let keyword = line.trim();
        let complete = match keyword {
            "Length" => walk_length(&mut ts, sink),
            "XaaPropensity" => walk_propensity(&mut ts, sink, Slot::Xaa),
            "YaaPropensity" => walk_propensity(&mut ts, sink, Slot::Yaa),
            "PairwiseLateral" => walk_matrix(&mut ts, sink, Slot::Lateral),
            "PairwiseAxial" => walk_matrix(&mut ts, sink, Slot::Axial),
            "EOF" => break,
            _ => true,
        };
        if !complete {
            warn!(
                "⚠️  Malformed '{}' section in {} near line {}; remaining values left at zero.",
                keyword,
                source,
                ts.line_number()
            );
        }
    }
    title
}

fn walk_length<S: SectionSink>(ts: &mut TokenStream, sink: &mut S) -> bool {
    for i in 0..3 {
        match ts.next_token() {
            Some(tok) if sink.accept(Slot::Length(i), tok) => {}
            _ => return false,
        }
    }
    true
}

fn walk_propensity<S, F>(ts: &mut TokenStream, sink: &mut S, slot: F) -> bool
where
    S: SectionSink,
    F: Fn(Residue) -> Slot,
{
    for _ in 0..LETTER_COUNT {
        let Some(letter) = ts.next_char() else {
            return false;
        };
        let residue = Residue::from_char(letter);
        match ts.next_token() {
            Some(tok) if residue.is_defined() && sink.accept(slot(residue), tok) => {}
            _ => return false,
        }
    }
    true
}

fn walk_matrix<S, F>(ts: &mut TokenStream, sink: &mut S, slot: F) -> bool
where
    S: SectionSink,
    F: Fn(Residue, Residue) -> Slot,
{
    // Column header line, however it is spaced.
    loop {
        match ts.rest_of_line() {
            Some(header) if header.trim().is_empty() => continue,
            Some(_) => break,
            None => return false,
        }
    }
    // Rows are positional; the row label is not consulted.
    for lead in Residue::letters() {
        if ts.next_token().is_none() {
            return false;
        }
        for trail in Residue::letters() {
            match ts.next_token() {
                Some(tok) if sink.accept(slot(lead, trail), tok) => {}
                _ => return false,
            }
        }
    }
    true
}

pub fn parse_parameter_table(text: &str, source: &str) -> ParameterTable {
    let mut table = ParameterTable::default();
    let title = walk_sections(text, &mut table, source);
    debug!("   Parameter source '{}': {}", source, title);
    table
}

pub fn parse_flags(text: &str, source: &str) -> OptimizationFlags {
    let mut flags = OptimizationFlags::default();
    let title = walk_sections(text, &mut flags, source);
    debug!("   Flag source '{}': {}", source, title);
    flags
}

pub fn load_parameter_table<P: AsRef<Path>>(path: P) -> ScResult<ParameterTable> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    Ok(parse_parameter_table(&text, &path.display().to_string()))
}

pub fn load_flags<P: AsRef<Path>>(path: P) -> ScResult<OptimizationFlags> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    Ok(parse_flags(&text, &path.display().to_string()))
}

/// Loads live values, reference values and (optionally) flags. A source that
/// cannot be opened is reported and its fields stay at zero / false.
pub fn load_model_parameters<P: AsRef<Path>>(
    current: P,
    reference: P,
    flags: Option<P>,
) -> ModelParameters {
    let current = current.as_ref();
    let reference = reference.as_ref();

    info!("📂 Loading Parameters: {}", current.display());
    let current_table = load_parameter_table(current).unwrap_or_else(|e| {
        warn!("⚠️  Could not open parameters '{}': {}", current.display(), e);
        ParameterTable::default()
    });

    info!("📂 Loading Reference Parameters: {}", reference.display());
    let reference_table = load_parameter_table(reference).unwrap_or_else(|e| {
        warn!(
            "⚠️  Could not open reference parameters '{}': {}",
            reference.display(),
            e
        );
        ParameterTable::default()
    });

    let flags = match flags {
        Some(path) => {
            let path = path.as_ref();
            info!("📂 Loading Optimization Flags: {}", path.display());
            load_flags(path).unwrap_or_else(|e| {
                warn!("⚠️  Could not open flags '{}': {}", path.display(), e);
                OptimizationFlags::default()
            })
        }
        None => OptimizationFlags::default(),
    };

    ModelParameters {
        current: current_table,
        reference: reference_table,
        flags,
    }
}
