#![allow(dead_code)]

use scepttr::helix::{ExperimentalTm, TripleHelix};
use scepttr::params::ParameterTable;
use scepttr::residue::{parse_sequence, Residue};
use std::fmt::Write as _;

pub const HOST: &str = "GPOGPOGPOGPOGPOGPOGPOGPO";

/// Builder for TripleHelix to keep tests short.
pub struct HelixBuilder {
    peptides: Vec<String>,
    n_term: String,
    c_term: String,
    exp_tm: ExperimentalTm,
}

impl HelixBuilder {
    pub fn new() -> Self {
        Self {
            peptides: Vec::new(),
            n_term: "Ac".to_string(),
            c_term: "NH2".to_string(),
            exp_tm: ExperimentalTm::Measured(0.0),
        }
    }

    pub fn peptide(mut self, seq: &str) -> Self {
        self.peptides.push(seq.to_string());
        self
    }

    pub fn termini(mut self, n: &str, c: &str) -> Self {
        self.n_term = n.to_string();
        self.c_term = c.to_string();
        self
    }

    pub fn exp_tm(mut self, tm: f64) -> Self {
        self.exp_tm = ExperimentalTm::from_value(tm);
        self
    }

    pub fn build(self) -> TripleHelix {
        let peptides = if self.peptides.is_empty() {
            vec![parse_sequence(HOST)]
        } else {
            self.peptides.iter().map(|p| parse_sequence(p)).collect()
        };
        TripleHelix::new(peptides, self.n_term, self.c_term, self.exp_tm).unwrap()
    }
}

pub fn r(c: char) -> Residue {
    Residue::from_char(c)
}

/// Length model that returns `tm` for any helix, nothing else set.
pub fn flat_params(tm: f64) -> ParameterTable {
    let mut p = ParameterTable::default();
    p.length.a = tm;
    p
}

/// A small but non-trivial parameter set touching the usual host-guest
/// residues.
pub fn toy_params() -> ParameterTable {
    let mut p = ParameterTable::default();
    p.length.a = -20.0;
    p.length.b = 2.0;
    p.propensity_x[Residue::PRO] = 1.5;
    p.propensity_y[Residue::HYP] = 1.5;
    p.propensity_x[r('E')] = 0.6;
    p.propensity_y[r('K')] = 0.4;
    p.propensity_y[r('R')] = 0.8;
    p.propensity_x[r('A')] = -0.5;
    p.propensity_y[r('A')] = -0.3;
    p.axial[(r('K'), r('E'))] = 1.2;
    p.axial[(r('E'), r('K'))] = -0.4;
    p.lateral[(r('K'), r('D'))] = 0.9;
    p.lateral[(r('R'), r('E'))] = 0.7;
    p.axial[(r('A'), r('A'))] = -0.2;
    p
}

/// One record in the on-disk library format, preceded by a comment line.
pub fn record(peps: &[&str], n_term: &str, c_term: &str, tm: f64) -> String {
    let num_aa = peps.first().map_or(0, |p| p.len());
    let mut out = String::from("// record\n");
    let _ = writeln!(out, "{} {} {} {} {}", peps.len(), num_aa, n_term, c_term, tm);
    for p in peps {
        let _ = writeln!(out, "{}", p);
    }
    out
}

/// Title, declared count, then the records.
pub fn library_text(declared: usize, records: &[String]) -> String {
    let mut out = String::from("test library\n");
    let _ = writeln!(out, "{}", declared);
    for rec in records {
        out.push_str(rec);
    }
    out
}

/// Small mixed host-guest library used for fitting tests.
pub fn fitting_library() -> Vec<TripleHelix> {
    vec![
        HelixBuilder::new().exp_tm(47.0).build(),
        HelixBuilder::new()
            .peptide("GPOGPOGPOGKOGPOGPOGPOGPO")
            .exp_tm(40.0)
            .build(),
        HelixBuilder::new()
            .peptide("GPOGPOGEOGPOGPOGPOGPOGPO")
            .exp_tm(42.5)
            .build(),
        HelixBuilder::new()
            .peptide("GPKGEOGPKGEOGPKGEOGPKGEO")
            .peptide("GEOGPKGEOGPKGEOGPKGEOGPK")
            .exp_tm(35.0)
            .build(),
        HelixBuilder::new()
            .peptide("GPAGPAGPAGPAGPAGPAGPAGPA")
            .exp_tm(-10.0)
            .build(),
    ]
}
