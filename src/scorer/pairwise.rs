//! Interaction search along one helix thread.
//!
//! Each Yaa position of a strand pair offers an axial and a lateral candidate.
//! A thread takes at most one interaction per position and never the same
//! kind twice in a row; the stabilising optimum is a 3-state dynamic program.
//! Negative candidates are not optional and are summed separately.

use crate::helix::GlyPhase;
use crate::params::ParameterTable;
use crate::residue::{PairTable, Residue};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Display)]
pub enum InteractionKind {
    None,
    Lateral,
    Axial,
}

impl InteractionKind {
    #[inline(always)]
    fn state(self) -> usize {
        self as usize
    }

    /// Stabilising part of this kind's candidate.
    #[inline(always)]
    pub fn gain(self, axial: f64, lateral: f64) -> f64 {
        match self {
            InteractionKind::None => 0.0,
            InteractionKind::Lateral => lateral.max(0.0),
            InteractionKind::Axial => axial.max(0.0),
        }
    }
}

/// Largest stabilising sum over kind sequences with no two equal neighbours.
pub fn best_stabilizing_sum(axial: &[f64], lateral: &[f64]) -> f64 {
    let m = axial.len().min(lateral.len());
    if m == 0 {
        return 0.0;
    }

    // best[k]: optimum over 0..=i with kind k chosen at i.
    let mut best = [0.0f64; 3];
    for kind in InteractionKind::iter() {
        best[kind.state()] = kind.gain(axial[0], lateral[0]);
    }

    for i in 1..m {
        let mut next = [f64::NEG_INFINITY; 3];
        for kind in InteractionKind::iter() {
            let k = kind.state();
            let reach = (0..3)
                .filter(|&p| p != k)
                .map(|p| best[p])
                .fold(f64::NEG_INFINITY, f64::max);
            next[k] = reach + kind.gain(axial[i], lateral[i]);
        }
        best = next;
    }

    best.into_iter().fold(0.0, f64::max)
}

/// Geometry of one adjacent-strand thread: residue `x` of the first strand
/// meets `x + axial` (axial) and `x + lateral` (lateral) of the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadGeometry {
    pub axial: isize,
    pub lateral: isize,
}

/// Leading→middle, middle→trailing, trailing→leading.
pub const THREADS: [ThreadGeometry; 3] = [
    ThreadGeometry {
        axial: 2,
        lateral: -1,
    },
    ThreadGeometry {
        axial: 2,
        lateral: -1,
    },
    ThreadGeometry {
        axial: 5,
        lateral: 2,
    },
];

/// Candidate values of one thread, one entry per Yaa position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionThread {
    pub axial: Vec<f64>,
    pub lateral: Vec<f64>,
}

#[inline(always)]
fn partner(x: usize, delta: isize, len: usize) -> Option<usize> {
    let p = x.checked_add_signed(delta)?;
    (p < len).then_some(p)
}

fn lookup(table: &PairTable<f64>, first: Residue, second: &[Residue], at: Option<usize>) -> f64 {
    match at {
        Some(p) => table[(first, second[p])],
        None => 0.0,
    }
}

impl InteractionThread {
    pub fn build(
        params: &ParameterTable,
        phase: GlyPhase,
        first: &[Residue],
        second: &[Residue],
        geometry: ThreadGeometry,
    ) -> Self {
        let len = first.len().min(second.len());
        let mut thread = InteractionThread::default();
        for x in (0..len).filter(|&x| phase.is_yaa(x)) {
            let r = first[x];
            thread.axial.push(lookup(
                &params.axial,
                r,
                second,
                partner(x, geometry.axial, len),
            ));
            thread.lateral.push(lookup(
                &params.lateral,
                r,
                second,
                partner(x, geometry.lateral, len),
            ));
        }
        thread
    }

    pub fn stabilizing(&self) -> f64 {
        best_stabilizing_sum(&self.axial, &self.lateral)
    }

    /// Every negative candidate, whichever kind the optimum picked.
    pub fn destabilizing(&self) -> f64 {
        self.axial
            .iter()
            .chain(self.lateral.iter())
            .filter(|v| **v < 0.0)
            .sum()
    }

    pub fn total(&self) -> f64 {
        self.stabilizing() + self.destabilizing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_thread() {
        assert_eq!(best_stabilizing_sum(&[], &[]), 0.0);
    }

    #[test]
    fn test_alternation_forced() {
        // Axial everywhere would be 3.0, but neighbours must differ.
        let axial = [1.0, 1.0, 1.0];
        let lateral = [0.0, 0.0, 0.0];
        assert_eq!(best_stabilizing_sum(&axial, &lateral), 2.0);
    }

    #[test]
    fn test_negatives_never_gained() {
        let axial = [-3.0, 2.0];
        let lateral = [-1.0, -1.0];
        assert_eq!(best_stabilizing_sum(&axial, &lateral), 2.0);
        let t = InteractionThread {
            axial: axial.to_vec(),
            lateral: lateral.to_vec(),
        };
        assert_eq!(t.destabilizing(), -5.0);
        assert_eq!(t.total(), -3.0);
    }

    #[test]
    fn test_kinds_interleave() {
        let axial = [2.0, 0.0, 2.0];
        let lateral = [0.0, 1.5, 0.0];
        assert_eq!(best_stabilizing_sum(&axial, &lateral), 5.5);
    }
}
