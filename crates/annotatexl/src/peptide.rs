use crate::mass::{residue, Mass};
use crate::Error;

/// Sum of backbone residue masses, without terminal groups
pub fn backbone(sequence: &str) -> Result<f64, Error> {
    sequence.bytes().map(residue).sum()
}

#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub struct Peptide {
    pub sequence: String,
    /// Backbone mass; terminal groups are accounted for by each fragment kind
    pub monoisotopic: f64,
}

impl Peptide {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.sequence
    }
}

impl TryFrom<&str> for Peptide {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(Peptide {
            monoisotopic: backbone(value)?,
            sequence: value.into(),
        })
    }
}

impl Mass for Peptide {
    fn monoisotopic(&self) -> f64 {
        self.monoisotopic
    }
}

impl std::fmt::Display for Peptide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sequence)
    }
}
