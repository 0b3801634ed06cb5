use crate::reports;
use clap::Args;
use scepttr::config::InputFiles;
use scepttr::error::{ScResult, ScepttrError};
use scepttr::helix::{ExperimentalTm, TripleHelix};
use scepttr::optimizer::census::DEFAULT_THRESHOLD;
use scepttr::params::loader::load_model_parameters;
use scepttr::residue::{parse_sequence, Residue};
use scepttr::scorer::score_helix;
use std::str::FromStr;
use tracing::info;

/// A single-residue edit: `PEPTIDE:POSITION:RESIDUE`, 0-based.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mutation {
    pub peptide: usize,
    pub position: usize,
    pub residue: Residue,
}

impl FromStr for Mutation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let [pep, pos, aa] = parts.as_slice() else {
            return Err(format!("expected PEP:POS:AA, got '{}'", s));
        };
        let peptide = pep
            .trim()
            .parse()
            .map_err(|_| format!("bad peptide index '{}'", pep))?;
        let position = pos
            .trim()
            .parse()
            .map_err(|_| format!("bad position '{}'", pos))?;
        let mut chars = aa.trim().chars();
        let residue = match (chars.next(), chars.next()) {
            (Some(c), None) => Residue::from_char(c),
            _ => return Err(format!("expected a single residue letter, got '{}'", aa)),
        };
        if !residue.is_defined() {
            return Err(format!("'{}' is not a residue letter", aa));
        }
        Ok(Mutation {
            peptide,
            position,
            residue,
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    /// Peptide sequence; give one to three distinct peptides.
    #[arg(long = "peptide", required = true)]
    pub peptides: Vec<String>,

    #[arg(long, default_value = "Ac")]
    pub n_term: String,

    #[arg(long, default_value = "NH2")]
    pub c_term: String,

    /// Experimental Tm, -10 for no transition.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub exp_tm: f64,

    /// Apply after the first report and rescore, in order.
    #[arg(long = "mutate")]
    pub mutations: Vec<Mutation>,

    /// Census count below which an interaction is low confidence.
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub low_confidence_threshold: usize,
}

pub fn run(args: EvaluateArgs, inputs: &InputFiles) -> ScResult<()> {
    let params = load_model_parameters(&inputs.params, &inputs.reference, inputs.flags.as_ref());
    let census = super::census_or_empty(inputs);

    if args.peptides.len() > 3 {
        return Err(ScepttrError::Validation(format!(
            "at most 3 peptides, got {}",
            args.peptides.len()
        )));
    }
    let peptides = args.peptides.iter().map(|p| parse_sequence(p)).collect();
    let mut helix = TripleHelix::new(
        peptides,
        args.n_term.clone(),
        args.c_term.clone(),
        ExperimentalTm::from_value(args.exp_tm),
    )?;
    helix.check_record_bounds()?;

    score_helix(&params.current, &mut helix);
    reports::print_register_report("User Helix", &helix);
    reports::print_low_confidence(&census.low_confidence(&helix, args.low_confidence_threshold));

    for m in &args.mutations {
        let old = helix.mutate(m.peptide, m.position, m.residue)?;
        info!(
            "✏️  Peptide {} position {}: {} -> {}",
            m.peptide, m.position, old, m.residue
        );
        score_helix(&params.current, &mut helix);
        reports::print_register_report(
            &format!("After {}{}{} on peptide {}", old, m.position, m.residue, m.peptide),
            &helix,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mutation() {
        let m: Mutation = "1:14:k".parse().unwrap();
        assert_eq!(m.peptide, 1);
        assert_eq!(m.position, 14);
        assert_eq!(m.residue, Residue::LYS);
        assert!("1:14".parse::<Mutation>().is_err());
        assert!("1:x:K".parse::<Mutation>().is_err());
        assert!("0:3:KR".parse::<Mutation>().is_err());
        assert!("0:3:7".parse::<Mutation>().is_err());
    }
}
