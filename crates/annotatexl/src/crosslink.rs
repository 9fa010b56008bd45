use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::peptide::Peptide;
use crate::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Alpha,
    Beta,
}

impl Side {
    /// Prefix used in Roepstorff labels
    pub fn label(&self) -> char {
        match self {
            Side::Alpha => 'A',
            Side::Beta => 'B',
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Alpha => f.write_str("alpha"),
            Side::Beta => f.write_str("beta"),
        }
    }
}

/// Two peptides joined by a linker at one residue of each.
///
/// ```text
/// PEPTID
///    |
///  HIKE
/// ```
/// is `PEPTID-HIKE-a4-b3`: link positions are one-indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct Crosslink {
    alpha: Peptide,
    beta: Peptide,
    alpha_position: usize,
    beta_position: usize,
}

impl Crosslink {
    pub fn new(
        alpha: &str,
        beta: &str,
        alpha_position: usize,
        beta_position: usize,
    ) -> Result<Self, Error> {
        let alpha = Peptide::try_from(alpha)?;
        let beta = Peptide::try_from(beta)?;
        for (side, peptide, position) in [
            (Side::Alpha, &alpha, alpha_position),
            (Side::Beta, &beta, beta_position),
        ] {
            if position == 0 || position > peptide.len() {
                return Err(Error::LinkPosition {
                    side,
                    position,
                    length: peptide.len(),
                });
            }
        }
        Ok(Crosslink {
            alpha,
            beta,
            alpha_position,
            beta_position,
        })
    }

    pub fn alpha(&self) -> &Peptide {
        &self.alpha
    }

    pub fn beta(&self) -> &Peptide {
        &self.beta
    }

    pub fn peptide(&self, side: Side) -> &Peptide {
        match side {
            Side::Alpha => &self.alpha,
            Side::Beta => &self.beta,
        }
    }

    /// One-indexed link position
    pub fn position(&self, side: Side) -> usize {
        match side {
            Side::Alpha => self.alpha_position,
            Side::Beta => self.beta_position,
        }
    }

    /// One-indexed (alpha, beta) link positions
    pub fn positions(&self) -> (usize, usize) {
        (self.alpha_position, self.beta_position)
    }

    /// Zero-indexed link position
    pub fn link_index(&self, side: Side) -> usize {
        self.position(side) - 1
    }

    pub fn linked_residue(&self, side: Side) -> char {
        self.peptide(side).as_str().as_bytes()[self.link_index(side)] as char
    }

    /// Residue codes present in either peptide once the two linked positions
    /// are removed. Other occurrences of a linked residue are kept.
    pub fn unique_residues(&self) -> BTreeSet<u8> {
        [Side::Alpha, Side::Beta]
            .into_iter()
            .flat_map(|side| {
                let link = self.link_index(side);
                self.peptide(side)
                    .as_str()
                    .bytes()
                    .enumerate()
                    .filter(move |(idx, _)| *idx != link)
                    .map(|(_, aa)| aa)
            })
            .collect()
    }
}

fn parse_position(field: &str, prefix: char) -> Option<usize> {
    let digits = field.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl FromStr for Crosslink {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || Error::MalformedIdentifier(s.into());
        let fields = s.split('-').collect::<Vec<_>>();
        match fields.as_slice() {
            [alpha, beta, a, b] if !alpha.is_empty() && !beta.is_empty() => {
                let a = parse_position(a, 'a').ok_or_else(malformed)?;
                let b = parse_position(b, 'b').ok_or_else(malformed)?;
                Crosslink::new(alpha, beta, a, b)
            }
            _ => Err(malformed()),
        }
    }
}

impl std::fmt::Display for Crosslink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-a{}-b{}",
            self.alpha, self.beta, self.alpha_position, self.beta_position
        )
    }
}
