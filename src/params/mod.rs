pub mod loader;
pub mod writer;

use crate::residue::{LetterTable, PairTable, Residue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quadratic length model: `a + b*n + c*n^2`, with `n` capped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LengthModel {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl LengthModel {
    pub const CAP: usize = 50;

    pub fn contribution(&self, residues: usize) -> f64 {
        let n = residues.min(Self::CAP) as f64;
        self.a + self.b * n + self.c * n * n
    }
}

/// Every coefficient the scorer reads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterTable {
    pub length: LengthModel,
    pub propensity_x: LetterTable<f64>,
    pub propensity_y: LetterTable<f64>,
    /// Indexed (leading residue, trailing residue).
    pub axial: PairTable<f64>,
    pub lateral: PairTable<f64>,

    // Reserved charge knobs; the scorer uses its own fixed charge rule.
    pub charge: f64,
    pub n_term: f64,
    pub c_term: f64,
}

impl ParameterTable {
    pub fn get(&self, id: ParameterId) -> f64 {
        match id {
            ParameterId::PropensityX(r) => self.propensity_x[r],
            ParameterId::PropensityY(r) => self.propensity_y[r],
            ParameterId::Axial(a, b) => self.axial[(a, b)],
            ParameterId::Lateral(a, b) => self.lateral[(a, b)],
        }
    }

    pub fn set(&mut self, id: ParameterId, value: f64) {
        match id {
            ParameterId::PropensityX(r) => self.propensity_x[r] = value,
            ParameterId::PropensityY(r) => self.propensity_y[r] = value,
            ParameterId::Axial(a, b) => self.axial[(a, b)] = value,
            ParameterId::Lateral(a, b) => self.lateral[(a, b)] = value,
        }
    }
}

/// Names one scalar the optimizer may tune.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterId {
    PropensityX(Residue),
    PropensityY(Residue),
    Axial(Residue, Residue),
    Lateral(Residue, Residue),
}

impl ParameterId {
    /// The fixed visiting order of a fitting round: for each letter its Xaa and
    /// Yaa propensity, then the axial and lateral cells it leads.
    pub fn search_order() -> Vec<ParameterId> {
        let mut order = Vec::new();
        for lead in Residue::letters() {
            order.push(ParameterId::PropensityX(lead));
            order.push(ParameterId::PropensityY(lead));
            for trail in Residue::letters() {
                order.push(ParameterId::Axial(lead, trail));
                order.push(ParameterId::Lateral(lead, trail));
            }
        }
        order
    }

    /// Cells whose value is fixed by known chemistry, whatever the flags say.
    pub fn is_locked(&self) -> bool {
        match *self {
            ParameterId::PropensityX(r) => r == Residue::PRO,
            ParameterId::PropensityY(r) => r == Residue::HYP,
            ParameterId::Axial(a, b) => {
                a == Residue::HYP || b == Residue::HYP || a == Residue::PRO || b == Residue::PRO
            }
            ParameterId::Lateral(a, b) => {
                a == Residue::HYP || b == Residue::HYP || b == Residue::PRO
            }
        }
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterId::PropensityX(r) => write!(f, "Xaa{}", r),
            ParameterId::PropensityY(r) => write!(f, "Yaa{}", r),
            ParameterId::Axial(a, b) => write!(f, "axial{},{}", a, b),
            ParameterId::Lateral(a, b) => write!(f, "lateral{},{}", a, b),
        }
    }
}

/// Which parameters the optimizer is allowed to move.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptimizationFlags {
    /// Read from the flag file but never acted on: length is not fitted.
    pub length: bool,
    pub propensity_x: LetterTable<bool>,
    pub propensity_y: LetterTable<bool>,
    pub axial: PairTable<bool>,
    pub lateral: PairTable<bool>,
}

impl OptimizationFlags {
    pub fn get(&self, id: ParameterId) -> bool {
        match id {
            ParameterId::PropensityX(r) => self.propensity_x[r],
            ParameterId::PropensityY(r) => self.propensity_y[r],
            ParameterId::Axial(a, b) => self.axial[(a, b)],
            ParameterId::Lateral(a, b) => self.lateral[(a, b)],
        }
    }

    pub fn set(&mut self, id: ParameterId, on: bool) {
        match id {
            ParameterId::PropensityX(r) => self.propensity_x[r] = on,
            ParameterId::PropensityY(r) => self.propensity_y[r] = on,
            ParameterId::Axial(a, b) => self.axial[(a, b)] = on,
            ParameterId::Lateral(a, b) => self.lateral[(a, b)] = on,
        }
    }

    /// Clears every flag on a chemically locked cell.
    pub fn apply_locks(&mut self) {
        for id in ParameterId::search_order() {
            if id.is_locked() {
                self.set(id, false);
            }
        }
    }

    pub fn tunable(&self) -> Vec<ParameterId> {
        ParameterId::search_order()
            .into_iter()
            .filter(|id| self.get(*id))
            .collect()
    }
}

/// Live values, the experimental reference they are caged to, and the flags.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelParameters {
    pub current: ParameterTable,
    pub reference: ParameterTable,
    pub flags: OptimizationFlags,
}

impl ModelParameters {
    /// Whether `value` for `id` stays within `max_dev` of its reference.
    pub fn within_bounds(&self, id: ParameterId, value: f64, max_dev: f64) -> bool {
        let reference = self.reference.get(id);
        value >= reference - max_dev && value <= reference + max_dev
    }
}
