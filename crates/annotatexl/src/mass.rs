use serde::{Deserialize, Serialize};

use crate::Error;

pub const H: f64 = 1.007825032;
pub const C: f64 = 12.0096;
pub const O: f64 = 15.99491462;
pub const N: f64 = 14.00307401;
pub const S: f64 = 31.97207069;

/// BS3/DSS linker, less the two hydrogens lost on conjugation
pub const LINKER: f64 = 138.0680796;

/// Terminal groups carried by a peptide chain that has not been fragmented
pub const INTACT_TERMINUS: f64 = O + 2.0 * H;

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, PartialOrd)]
#[serde(rename_all = "lowercase")]
pub enum Tolerance {
    Ppm(f64),
    /// Full width of a symmetric window, in Da
    #[serde(rename = "absolute", alias = "da")]
    Da(f64),
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::Ppm(10.0)
    }
}

impl Tolerance {
    /// Half-width (in Da) of the matching window around `center`
    pub fn window(&self, center: f64) -> f64 {
        match self {
            Tolerance::Ppm(ppm) => Self::ppm_to_delta_mass(center, *ppm),
            Tolerance::Da(da) => da / 2.0,
        }
    }

    /// Compute the (`lower`, `upper`) window (in Da) for a monoisotopic
    /// mass and a given tolerance
    pub fn bounds(&self, center: f64) -> (f64, f64) {
        let window = self.window(center);
        (center - window, center + window)
    }

    pub fn contains(&self, center: f64, rhs: f64) -> bool {
        (center - rhs).abs() <= self.window(center)
    }

    pub fn ppm_to_delta_mass(center: f64, ppm: f64) -> f64 {
        ppm * center / 1_000_000.0
    }
}

pub trait Mass {
    fn monoisotopic(&self) -> f64;
}

/// Residue codes with a known backbone mass. `X` is methionine sulfoxide,
/// `C` is carbamidomethylated cysteine.
pub const VALID_AA: [u8; 21] = [
    b'A', b'C', b'D', b'E', b'F', b'G', b'H', b'I', b'K', b'L', b'M', b'N', b'P', b'Q', b'R', b'S',
    b'T', b'V', b'W', b'X', b'Y',
];

/// Monoisotopic mass of an amino acid as it appears in a peptide backbone
pub fn residue(aa: u8) -> Result<f64, Error> {
    let mass = match aa {
        b'G' => 57.021464,
        b'A' => 71.037114,
        b'S' => 87.032028,
        b'P' => 97.052764,
        b'V' => 99.068414,
        b'M' => 131.040485,
        b'X' => 147.0354,
        b'T' => 101.04768,
        b'H' => 137.058912,
        b'C' => 160.030644,
        b'F' => 147.068414,
        b'L' => 113.084064,
        b'R' => 156.101111,
        b'I' => 113.084064,
        b'N' => 114.042927,
        b'D' => 115.026943,
        b'Q' => 128.058578,
        b'K' => 128.094963,
        b'E' => 129.042593,
        b'W' => 186.079313,
        b'Y' => 163.063329,
        _ => return Err(Error::UnknownResidue(aa as char)),
    };
    Ok(mass)
}

pub fn immonium(aa: u8) -> Result<f64, Error> {
    let mass = match aa {
        b'G' => 30.03438,
        b'A' => 44.05003,
        b'S' => 60.04494,
        b'P' => 70.06568,
        b'V' => 72.08133,
        b'M' => 104.0534,
        b'X' => 120.0483,
        b'T' => 74.06059,
        b'H' => 110.0718,
        b'C' => 133.0436,
        b'F' => 120.0813,
        b'L' => 86.09698,
        b'R' => 129.114,
        b'I' => 86.09698,
        b'N' => 87.05584,
        b'D' => 88.03986,
        b'Q' => 101.0715,
        b'K' => 84.08136,
        b'E' => 102.0555,
        b'W' => 159.0922,
        b'Y' => 136.0762,
        _ => return Err(Error::UnknownImmoniumResidue(aa as char)),
    };
    Ok(mass)
}

/// Linker-derived ions produced by BS3/DSS
pub const DIAGNOSTIC_IONS: [&str; 2] = ["DI_1", "DI_2"];

pub fn diagnostic(code: &str) -> Result<f64, Error> {
    match code {
        "DI_1" => Ok(139.08),
        "DI_2" => Ok(222.15),
        _ => Err(Error::UnknownDiagnosticCode(code.into())),
    }
}
