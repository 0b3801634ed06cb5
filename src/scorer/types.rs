use super::register::{Assignment, Offset, Register, OFFSET_COUNT};
use serde::{Deserialize, Serialize};

/// Term breakdown for one register of one helix.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegisterTerms {
    // Length, termination, propensity and charge
    pub propensity: f64,
    // Stabilising optimum plus forced destabilising cells, all three threads
    pub pairwise: f64,
    pub tm: f64,

    // Charge counts over all three strands
    pub net_charge: i32,
    pub total_charge: i32,
}

const TENSOR_CELLS: usize = 3 * 3 * 3 * OFFSET_COUNT;

/// Terms for every (leading, middle, trailing, offset) register.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterTensor {
    cells: Vec<RegisterTerms>,
}

impl Default for RegisterTensor {
    fn default() -> Self {
        Self {
            cells: vec![RegisterTerms::default(); TENSOR_CELLS],
        }
    }
}

impl RegisterTensor {
    #[inline(always)]
    fn slot(reg: Register) -> usize {
        let a = reg.assignment;
        ((a.leading * 3 + a.middle) * 3 + a.trailing) * OFFSET_COUNT + reg.offset.index()
    }

    pub fn get(&self, reg: Register) -> RegisterTerms {
        self.cells[Self::slot(reg)]
    }

    pub fn set(&mut self, reg: Register, terms: RegisterTerms) {
        self.cells[Self::slot(reg)] = terms;
    }

    pub fn canonical(&self, assignment: Assignment) -> RegisterTerms {
        self.get(Register {
            assignment,
            offset: Offset::Canonical,
        })
    }

    pub fn clear(&mut self) {
        self.cells.fill(RegisterTerms::default());
    }
}

/// A Tm and the register that produced it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedTm {
    pub tm: f64,
    pub register: Register,
}

/// Everything the scorer writes back into a helix.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelixScore {
    #[serde(skip)]
    pub tensor: RegisterTensor,

    pub best: RankedTm,
    pub best_propensity: f64,
    pub best_pairwise: f64,
    /// Absent when only one assignment exists.
    pub second_best: Option<RankedTm>,
    pub specificity: Option<f64>,

    /// Best register among compositions with the declared diversity.
    pub correct: RankedTm,
    pub deviation: f64,
}
