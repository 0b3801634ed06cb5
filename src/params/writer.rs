use super::ParameterTable;
use crate::error::ScResult;
use crate::residue::{LetterTable, PairTable, Residue};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `table` in the layout the loader reads back.
pub fn write_parameter_table<W: Write>(
    out: &mut W,
    title: &str,
    table: &ParameterTable,
) -> ScResult<()> {
    writeln!(out, "{}", title)?;

    writeln!(out, "Length")?;
    writeln!(
        out,
        "{} {} {}",
        table.length.a, table.length.b, table.length.c
    )?;

    write_propensity(out, "XaaPropensity", &table.propensity_x)?;
    write_propensity(out, "YaaPropensity", &table.propensity_y)?;
    write_matrix(out, "PairwiseLateral", &table.lateral)?;
    write_matrix(out, "PairwiseAxial", &table.axial)?;

    writeln!(out, "EOF")?;
    Ok(())
}

pub fn save_parameter_table<P: AsRef<Path>>(
    path: P,
    title: &str,
    table: &ParameterTable,
) -> ScResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_parameter_table(&mut out, title, table)?;
    out.flush()?;
    Ok(())
}

fn write_propensity<W: Write>(out: &mut W, name: &str, values: &LetterTable<f64>) -> ScResult<()> {
    writeln!(out, "{}", name)?;
    for r in Residue::letters() {
        writeln!(out, "{} {}", r, values[r])?;
    }
    Ok(())
}

fn write_matrix<W: Write>(out: &mut W, name: &str, values: &PairTable<f64>) -> ScResult<()> {
    writeln!(out, "{}", name)?;
    let header: Vec<String> = Residue::letters().map(|r| r.to_string()).collect();
    writeln!(out, "  {}", header.join(" "))?;
    for lead in Residue::letters() {
        let row: Vec<String> = Residue::letters()
            .map(|trail| values[(lead, trail)].to_string())
            .collect();
        writeln!(out, "{} {}", lead, row.join(" "))?;
    }
    Ok(())
}
