use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use strum_macros::{Display, EnumIter};

/// Which peptide sits on the leading, middle and trailing strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Assignment {
    pub leading: usize,
    pub middle: usize,
    pub trailing: usize,
}

impl Assignment {
    pub fn new(leading: usize, middle: usize, trailing: usize) -> Self {
        Self {
            leading,
            middle,
            trailing,
        }
    }

    /// Every assignment over `num_pep` peptides, trailing id varying fastest.
    pub fn all(num_pep: usize) -> impl Iterator<Item = Assignment> {
        (0..num_pep).flat_map(move |a| {
            (0..num_pep).flat_map(move |b| (0..num_pep).map(move |c| Assignment::new(a, b, c)))
        })
    }

    pub fn ids(&self) -> [usize; 3] {
        [self.leading, self.middle, self.trailing]
    }

    /// Whether this assignment has the strand diversity `num_pep` demands.
    pub fn is_correct_composition(&self, num_pep: usize) -> bool {
        let [a, b, c] = self.ids();
        match num_pep {
            2 => !(a == b && b == c),
            3 => a != b && a != c && b != c,
            _ => true,
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.leading, self.middle, self.trailing)
    }
}

/// Triplet registers between the three strands. The display name lists the
/// residue index each strand starts at in the canonical frame.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, Display, Serialize, Deserialize,
)]
pub enum Offset {
    #[default]
    #[strum(to_string = "012")]
    Canonical,
    #[strum(to_string = "015")]
    TrailingOne,
    #[strum(to_string = "042")]
    MiddleOne,
    #[strum(to_string = "045")]
    MiddleOneTrailingOne,
    #[strum(to_string = "018")]
    TrailingTwo,
    #[strum(to_string = "048")]
    MiddleOneTrailingTwo,
    #[strum(to_string = "072")]
    MiddleTwo,
    #[strum(to_string = "075")]
    MiddleTwoTrailingOne,
    #[strum(to_string = "078")]
    MiddleTwoTrailingTwo,
}

pub const OFFSET_COUNT: usize = 9;

impl Offset {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Triplet shift of the (leading, middle, trailing) strand.
    pub fn shifts(self) -> [usize; 3] {
        match self {
            Offset::Canonical => [0, 0, 0],
            Offset::TrailingOne => [0, 0, 1],
            Offset::MiddleOne => [0, 1, 0],
            Offset::MiddleOneTrailingOne => [0, 1, 1],
            Offset::TrailingTwo => [0, 0, 2],
            Offset::MiddleOneTrailingTwo => [0, 1, 2],
            Offset::MiddleTwo => [0, 2, 0],
            Offset::MiddleTwoTrailingOne => [0, 2, 1],
            Offset::MiddleTwoTrailingTwo => [0, 2, 2],
        }
    }

    pub fn max_shift(self) -> usize {
        self.shifts().into_iter().max().unwrap_or(0)
    }

    /// Residues shared by all three strands once shifted.
    pub fn trimmed_len(self, num_aa: usize) -> usize {
        num_aa.saturating_sub(3 * self.max_shift())
    }

    /// Slice of an untrimmed strand that survives at `strand` (0..3).
    ///
    /// Every strand follows the same rule, so the three slices always have
    /// equal length. For `MiddleTwo` the unshifted trailing strand keeps
    /// `6..n`, the same slice as the leading strand.
    pub fn window(self, strand: usize, num_aa: usize) -> Range<usize> {
        let max = self.max_shift();
        let s = self.shifts()[strand];
        let start = 3 * (max - s);
        let end = num_aa.saturating_sub(3 * s).max(start);
        start..end
    }

    /// Residue count fed to the length model. One-triplet registers are
    /// credited one extra residue.
    pub fn length_basis(self, num_aa: usize) -> usize {
        let trimmed = self.trimmed_len(num_aa);
        if self.max_shift() == 1 {
            trimmed + 1
        } else {
            trimmed
        }
    }
}

/// A composition plus its register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Register {
    pub assignment: Assignment,
    pub offset: Offset,
}

impl Register {
    pub fn canonical(assignment: Assignment) -> Self {
        Self {
            assignment,
            offset: Offset::Canonical,
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.assignment, self.offset.index())
    }
}
