use serde::{Deserialize, Serialize};

use crate::crosslink::Side;
use crate::ion_series::Kind;
use crate::mass::{self, Mass, H, INTACT_TERMINUS, LINKER};
use crate::peptide::backbone;
use crate::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IonFamily {
    Precursor,
    Common,
    CrosslinkSingle,
    CrosslinkDouble,
    Immonium,
    Diagnostic,
}

impl IonFamily {
    pub fn category(&self) -> Category {
        match self {
            IonFamily::Precursor | IonFamily::CrosslinkSingle | IonFamily::CrosslinkDouble => {
                Category::Crosslink
            }
            IonFamily::Common => Category::Common,
            IonFamily::Immonium => Category::Immonium,
            IonFamily::Diagnostic => Category::Diagnostic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IonFamily::Precursor => "precursor",
            IonFamily::Common => "common",
            IonFamily::CrosslinkSingle => "crosslink_single",
            IonFamily::CrosslinkDouble => "crosslink_double",
            IonFamily::Immonium => "immonium",
            IonFamily::Diagnostic => "diagnostic",
        }
    }
}

/// Coarse grouping of ion families used for export and plotting: the
/// precursor is grouped with the other linked ions
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Crosslink,
    Common,
    Immonium,
    Diagnostic,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Crosslink => "crosslink",
            Category::Common => "common",
            Category::Immonium => "immonium",
            Category::Diagnostic => "diagnostic",
        }
    }
}

/// Fragment of a single peptide that does not carry the linker
#[derive(Clone, Debug, PartialEq)]
pub struct Common {
    pub side: Side,
    pub kind: Kind,
    pub sequence: String,
    mass: f64,
}

impl Common {
    pub fn new(side: Side, kind: Kind, sequence: &str) -> Result<Self, Error> {
        let residues = backbone(sequence).map_err(|_| {
            Error::InvalidCommonIon(format!(
                "peptide representation `{sequence}` contains unknown amino acids"
            ))
        })?;
        Ok(Common {
            side,
            kind,
            sequence: sequence.into(),
            mass: residues + kind.adjustment(),
        })
    }
}

/// Fragment carrying the linker, with part or all of both peptides.
///
/// A side without a scission kind is an intact peptide.
#[derive(Clone, Debug, PartialEq)]
pub struct Crosslinked {
    pub alpha: String,
    pub beta: String,
    pub kinds: [Option<Kind>; 2],
    mass: f64,
}

impl Crosslinked {
    pub fn new(alpha: &str, beta: &str, kinds: [Option<Kind>; 2]) -> Result<Self, Error> {
        let termini = kinds
            .iter()
            .map(|kind| kind.map_or(INTACT_TERMINUS, |kind| kind.adjustment()))
            .sum::<f64>();
        Ok(Crosslinked {
            mass: backbone(alpha)? + backbone(beta)? + termini + LINKER,
            alpha: alpha.into(),
            beta: beta.into(),
            kinds,
        })
    }

    /// Both peptides cleaved?
    pub fn is_double(&self) -> bool {
        self.kinds.iter().all(Option::is_some)
    }
}

/// Intact cross-linked peptide pair
#[derive(Clone, Debug, PartialEq)]
pub struct Precursor {
    pub alpha: String,
    pub beta: String,
    mass: f64,
}

impl Precursor {
    pub fn new(alpha: &str, beta: &str) -> Result<Self, Error> {
        Ok(Precursor {
            mass: backbone(alpha)? + backbone(beta)? + 2.0 * INTACT_TERMINUS + H + LINKER,
            alpha: alpha.into(),
            beta: beta.into(),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Immonium {
    pub residue: String,
    mass: f64,
}

impl Immonium {
    pub fn new(residue: u8) -> Result<Self, Error> {
        Ok(Immonium {
            mass: mass::immonium(residue)?,
            residue: (residue as char).to_string(),
        })
    }
}

/// Linker-derived marker ion
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub code: String,
    mass: f64,
}

impl Diagnostic {
    pub fn new(code: &str) -> Result<Self, Error> {
        Ok(Diagnostic {
            mass: mass::diagnostic(code)?,
            code: code.into(),
        })
    }
}

/// A theoretical fragment ion. Values are immutable once built: the mass is
/// computed on construction.
#[derive(Clone, Debug, PartialEq)]
pub enum FragmentIon {
    Precursor(Precursor),
    Common(Common),
    Crosslinked(Crosslinked),
    Immonium(Immonium),
    Diagnostic(Diagnostic),
}

impl FragmentIon {
    pub fn mass(&self) -> f64 {
        match self {
            FragmentIon::Precursor(ion) => ion.mass,
            FragmentIon::Common(ion) => ion.mass,
            FragmentIon::Crosslinked(ion) => ion.mass,
            FragmentIon::Immonium(ion) => ion.mass,
            FragmentIon::Diagnostic(ion) => ion.mass,
        }
    }

    pub fn family(&self) -> IonFamily {
        match self {
            FragmentIon::Precursor(_) => IonFamily::Precursor,
            FragmentIon::Common(_) => IonFamily::Common,
            FragmentIon::Crosslinked(ion) if ion.is_double() => IonFamily::CrosslinkDouble,
            FragmentIon::Crosslinked(_) => IonFamily::CrosslinkSingle,
            FragmentIon::Immonium(_) => IonFamily::Immonium,
            FragmentIon::Diagnostic(_) => IonFamily::Diagnostic,
        }
    }

    pub fn category(&self) -> Category {
        self.family().category()
    }

    /// Roepstorff nomenclature, e.g. `Ab3`, `Ay2-B5`, `A6-B4`, `IM_K`
    pub fn label(&self) -> String {
        match self {
            FragmentIon::Precursor(ion) => format!("A{}-B{}", ion.alpha.len(), ion.beta.len()),
            FragmentIon::Common(ion) => {
                format!("{}{}{}", ion.side.label(), ion.kind, ion.sequence.len())
            }
            FragmentIon::Crosslinked(ion) => {
                let [alpha, beta] = ion.kinds.map(|kind| kind.map(|k| k.as_char()));
                let mut label = String::from("A");
                label.extend(alpha);
                label.push_str(&format!("{}-B", ion.alpha.len()));
                label.extend(beta);
                label.push_str(&ion.beta.len().to_string());
                label
            }
            FragmentIon::Immonium(ion) => format!("IM_{}", ion.residue),
            FragmentIon::Diagnostic(ion) => ion.code.clone(),
        }
    }

    /// Peptide substrings represented by this ion
    pub fn sequence_parts(&self) -> Vec<&str> {
        match self {
            FragmentIon::Precursor(ion) => vec![ion.alpha.as_str(), ion.beta.as_str()],
            FragmentIon::Common(ion) => vec![ion.sequence.as_str()],
            FragmentIon::Crosslinked(ion) => vec![ion.alpha.as_str(), ion.beta.as_str()],
            FragmentIon::Immonium(ion) => vec![ion.residue.as_str()],
            FragmentIon::Diagnostic(_) => vec!["LinkerIon"],
        }
    }

    pub fn sequence(&self) -> String {
        self.sequence_parts().join("-")
    }
}

impl Mass for FragmentIon {
    fn monoisotopic(&self) -> f64 {
        self.mass()
    }
}

impl std::fmt::Display for FragmentIon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} - Mass: {:.2} Da",
            self.label(),
            self.sequence(),
            self.mass()
        )
    }
}

#[cfg(test)]
mod test {
    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::mass::{residue, O};

    #[test]
    fn common_ions() {
        let ion = FragmentIon::Common(Common::new(Side::Alpha, Kind::B, "PEP").unwrap());
        assert_eq!(ion.label(), "Ab3");
        assert_eq!(ion.sequence(), "PEP");
        assert_eq!(ion.family(), IonFamily::Common);
        assert_eq!(ion.category(), Category::Common);
        assert!((ion.mass() - 324.1559).abs() < 0.001);

        let ion = FragmentIon::Common(Common::new(Side::Beta, Kind::Y, "DE").unwrap());
        assert_eq!(ion.label(), "By2");
        assert!((ion.mass() - 263.0874).abs() < 0.001);

        assert!(matches!(
            Common::new(Side::Beta, Kind::Y, "DEJ"),
            Err(Error::InvalidCommonIon(_))
        ));
    }

    #[test]
    fn crosslinked_ions() {
        let single = FragmentIon::Crosslinked(
            Crosslinked::new("PEPT", "HIKE", [Some(Kind::B), None]).unwrap(),
        );
        assert_eq!(single.label(), "Ab4-B4");
        assert_eq!(single.sequence(), "PEPT-HIKE");
        assert_eq!(single.family(), IonFamily::CrosslinkSingle);
        assert_eq!(single.category(), Category::Crosslink);

        let expected = backbone("PEPT").unwrap()
            + backbone("HIKE").unwrap()
            + Kind::B.adjustment()
            + O
            + 2.0 * H
            + LINKER;
        assert!((single.mass() - expected).abs() < 1e-9);

        let double = FragmentIon::Crosslinked(
            Crosslinked::new("TIDE", "IKE", [Some(Kind::X), Some(Kind::A)]).unwrap(),
        );
        assert_eq!(double.label(), "Ax4-Ba3");
        assert_eq!(double.family(), IonFamily::CrosslinkDouble);

        let beta = FragmentIon::Crosslinked(
            Crosslinked::new("PEPTIDE", "HIK", [None, Some(Kind::C)]).unwrap(),
        );
        assert_eq!(beta.label(), "A7-Bc3");

        assert_eq!(
            Crosslinked::new("PEPTIDE", "HIKO", [None, Some(Kind::C)]),
            Err(Error::UnknownResidue('O'))
        );
    }

    #[test]
    fn precursor_ion() {
        let ion = FragmentIon::Precursor(Precursor::new("AK", "AK").unwrap());
        assert_eq!(ion.label(), "A2-B2");
        assert_eq!(ion.family(), IonFamily::Precursor);
        assert_eq!(ion.category(), Category::Crosslink);

        let a = residue(b'A').unwrap();
        let k = residue(b'K').unwrap();
        let expected = a + k + a + k + 2.0 * (O + 2.0 * H) + H + LINKER;
        assert!((ion.mass() - expected).abs() < 1e-9);
        assert!((ion.mass() - 573.3612).abs() < 0.001);
    }

    #[test]
    fn marker_ions() {
        let ion = FragmentIon::Immonium(Immonium::new(b'K').unwrap());
        assert_eq!(ion.label(), "IM_K");
        assert_eq!(ion.sequence(), "K");
        assert_eq!(ion.mass(), 84.08136);
        assert_eq!(ion.category(), Category::Immonium);
        assert_eq!(Immonium::new(b'Z'), Err(Error::UnknownImmoniumResidue('Z')));

        let ion = FragmentIon::Diagnostic(Diagnostic::new("DI_2").unwrap());
        assert_eq!(ion.label(), "DI_2");
        assert_eq!(ion.sequence(), "LinkerIon");
        assert_eq!(ion.mass(), 222.15);
        assert_eq!(ion.family(), IonFamily::Diagnostic);
        assert_eq!(
            Diagnostic::new("DI_0"),
            Err(Error::UnknownDiagnosticCode("DI_0".into()))
        );
    }

    #[test]
    fn display() {
        let ion = FragmentIon::Common(Common::new(Side::Alpha, Kind::B, "PEP").unwrap());
        assert_eq!(ion.to_string(), "Ab3 PEP - Mass: 324.16 Da");
    }

    #[quickcheck]
    fn mass_is_deterministic(xl: crate::crosslink::Crosslink, a: usize, b: usize) -> bool {
        let alpha = xl.alpha().as_str();
        let beta = xl.beta().as_str();
        let alpha = &alpha[..1 + a % alpha.len()];
        let beta = &beta[..1 + b % beta.len()];
        let kinds = [Some(Kind::Z), Some(Kind::C)];
        let first = Crosslinked::new(alpha, beta, kinds).unwrap();
        let second = Crosslinked::new(alpha, beta, kinds).unwrap();
        first.mass.to_bits() == second.mass.to_bits()
            && FragmentIon::Crosslinked(first.clone()).mass().to_bits() == first.mass.to_bits()
    }
}
