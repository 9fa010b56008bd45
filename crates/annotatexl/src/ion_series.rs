use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::mass::{C, H, N, O};

/// Backbone bond scission classes. a/b/c fragments retain the N-terminus,
/// x/y/z fragments retain the C-terminus.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    A,
    B,
    C,
    X,
    Y,
    Z,
}

impl Kind {
    /// Mass added to the summed residue masses of a fragment: accounts for
    /// the atoms gained or lost at the cleaved bond and the mobile proton
    pub fn adjustment(&self) -> f64 {
        match self {
            Kind::A => H - (C + O),
            Kind::B => H,
            Kind::C => 4.0 * H + N,
            Kind::X => H + 2.0 * O + C,
            Kind::Y => 3.0 * H + O,
            Kind::Z => H + O - N,
        }
    }

    pub fn terminus(&self) -> Terminus {
        match self {
            Kind::A | Kind::B | Kind::C => Terminus::N,
            Kind::X | Kind::Y | Kind::Z => Terminus::C,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Kind::A => 'a',
            Kind::B => 'b',
            Kind::C => 'c',
            Kind::X => 'x',
            Kind::Y => 'y',
            Kind::Z => 'z',
        }
    }
}

impl TryFrom<char> for Kind {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'a' => Ok(Kind::A),
            'b' => Ok(Kind::B),
            'c' => Ok(Kind::C),
            'x' => Ok(Kind::X),
            'y' => Ok(Kind::Y),
            'z' => Ok(Kind::Z),
            _ => Err(value),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write;
        f.write_char(self.as_char())
    }
}

/// Which end of a peptide a fragment retains
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Terminus {
    N,
    C,
}

impl Terminus {
    pub fn kinds(&self) -> [Kind; 3] {
        match self {
            Terminus::N => [Kind::A, Kind::B, Kind::C],
            Terminus::C => [Kind::X, Kind::Y, Kind::Z],
        }
    }
}

/// Substrings of a peptide that retain one terminus, in increasing length.
///
/// The full-length peptide is never produced: depending on the constructor,
/// the series either stops before the linked residue or starts at it.
#[derive(Clone, Debug)]
pub struct IonSeries<'p> {
    pub terminus: Terminus,
    sequence: &'p str,
    lengths: Range<usize>,
}

impl<'p> IonSeries<'p> {
    /// Fragments lying entirely on one side of the linked residue at
    /// zero-indexed position `link`
    pub fn unlinked(sequence: &'p str, link: usize, terminus: Terminus) -> Self {
        let len = sequence.len();
        let lengths = match terminus {
            Terminus::N => 1..link + 1,
            Terminus::C => 1..len - link,
        };
        Self {
            terminus,
            sequence,
            lengths,
        }
    }

    /// Fragments that contain the linked residue at zero-indexed position
    /// `link`, short of the full peptide
    pub fn linked(sequence: &'p str, link: usize, terminus: Terminus) -> Self {
        let len = sequence.len();
        let lengths = match terminus {
            Terminus::N => link + 1..len,
            Terminus::C => len - link..len,
        };
        Self {
            terminus,
            sequence,
            lengths,
        }
    }
}

impl<'p> Iterator for IonSeries<'p> {
    type Item = &'p str;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.lengths.next()?;
        match self.terminus {
            Terminus::N => self.sequence.get(..len),
            Terminus::C => self.sequence.get(self.sequence.len() - len..),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lengths.size_hint()
    }
}

impl<'p> ExactSizeIterator for IonSeries<'p> {}
