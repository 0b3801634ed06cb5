//! Amino-acid alphabet and letter-indexed tables.
//!
//! Every table in the model is addressed by a [`Residue`], a bounded index over
//! `A..=Z` with slot 0 reserved for letters we do not recognise. Entries in the
//! undefined slot are never written by the loaders, so they score as zero.

use std::fmt;
use std::ops::{Index, IndexMut};

/// Number of slots in a letter table: the undefined sentinel plus `A..=Z`.
pub const ALPHABET_SLOTS: usize = 27;

/// Number of real letters (`A..=Z`).
pub const LETTER_COUNT: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Residue(u8);

impl Residue {
    pub const UNDEFINED: Residue = Residue(0);

    pub const ASP: Residue = Residue::letter(b'D');
    pub const GLU: Residue = Residue::letter(b'E');
    pub const PHE: Residue = Residue::letter(b'F');
    pub const GLY: Residue = Residue::letter(b'G');
    pub const LYS: Residue = Residue::letter(b'K');
    /// Hydroxyproline, written `O` in the one-letter code.
    pub const HYP: Residue = Residue::letter(b'O');
    pub const PRO: Residue = Residue::letter(b'P');
    pub const GLN: Residue = Residue::letter(b'Q');
    pub const ARG: Residue = Residue::letter(b'R');
    pub const TRP: Residue = Residue::letter(b'W');
    pub const TYR: Residue = Residue::letter(b'Y');

    const fn letter(upper: u8) -> Residue {
        Residue(upper - b'A' + 1)
    }

    /// Maps a one-letter code (either case) to its slot. Anything outside
    /// `A..=Z` becomes [`Residue::UNDEFINED`].
    pub fn from_char(c: char) -> Residue {
        let upper = c.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Residue::letter(upper as u8)
        } else {
            Residue::UNDEFINED
        }
    }

    /// `A..=Z` in alphabet order; the undefined slot is skipped.
    pub fn letters() -> impl Iterator<Item = Residue> {
        (1..ALPHABET_SLOTS as u8).map(Residue)
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_defined(self) -> bool {
        self.0 != 0
    }

    pub fn to_char(self) -> char {
        if self.is_defined() {
            (b'A' + self.0 - 1) as char
        } else {
            '.'
        }
    }

    /// Side-chain charge at neutral pH: Lys/Arg +1, Glu/Asp -1.
    pub fn charge(self) -> i32 {
        match self {
            Residue::LYS | Residue::ARG => 1,
            Residue::GLU | Residue::ASP => -1,
            _ => 0,
        }
    }

    pub fn is_aromatic(self) -> bool {
        matches!(self, Residue::PHE | Residue::TYR | Residue::TRP)
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Parses a sequence string, normalising case. Whitespace is skipped.
pub fn parse_sequence(s: &str) -> Vec<Residue> {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(Residue::from_char)
        .collect()
}

pub fn sequence_to_string(seq: &[Residue]) -> String {
    seq.iter().map(|r| r.to_char()).collect()
}

/// A value per alphabet slot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LetterTable<T>([T; ALPHABET_SLOTS]);

impl<T> Index<Residue> for LetterTable<T> {
    type Output = T;
    fn index(&self, r: Residue) -> &T {
        &self.0[r.index()]
    }
}

impl<T> IndexMut<Residue> for LetterTable<T> {
    fn index_mut(&mut self, r: Residue) -> &mut T {
        &mut self.0[r.index()]
    }
}

/// A value per ordered (leading, trailing) pair of alphabet slots.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PairTable<T>([[T; ALPHABET_SLOTS]; ALPHABET_SLOTS]);

impl<T> Index<(Residue, Residue)> for PairTable<T> {
    type Output = T;
    fn index(&self, (a, b): (Residue, Residue)) -> &T {
        &self.0[a.index()][b.index()]
    }
}

impl<T> IndexMut<(Residue, Residue)> for PairTable<T> {
    fn index_mut(&mut self, (a, b): (Residue, Residue)) -> &mut T {
        &mut self.0[a.index()][b.index()]
    }
}
