//! Theoretical fragmentation of a cross-linked peptide pair

use itertools::Itertools;

use crate::crosslink::{Crosslink, Side};
use crate::fragment::{Common, Crosslinked, Diagnostic, FragmentIon, Immonium, Precursor};
use crate::ion_series::{IonSeries, Terminus};
use crate::mass::DIAGNOSTIC_IONS;
use crate::Error;

/// Every (peptide, retained terminus) combination, in emission order
const SIDES: [(Side, Terminus); 4] = [
    (Side::Alpha, Terminus::N),
    (Side::Beta, Terminus::N),
    (Side::Alpha, Terminus::C),
    (Side::Beta, Terminus::C),
];

/// Retained termini of (alpha, beta) for ions where both peptides are cleaved
const PAIRS: [(Terminus, Terminus); 4] = [
    (Terminus::N, Terminus::N),
    (Terminus::C, Terminus::N),
    (Terminus::N, Terminus::C),
    (Terminus::C, Terminus::C),
];

/// Enumerates all fragment ions of a [`Crosslink`] under CID-like backbone
/// fragmentation.
///
/// Every method returns a fresh lazy iterator, so the enumeration can be
/// repeated as often as needed. Ion construction is fallible, so items are
/// `Result`s; collecting into `Result<Vec<_>, _>` stops at the first error.
#[derive(Copy, Clone, Debug)]
pub struct Fragmenter<'x> {
    crosslink: &'x Crosslink,
}

impl<'x> Fragmenter<'x> {
    pub fn new(crosslink: &'x Crosslink) -> Self {
        Self { crosslink }
    }

    pub fn precursor(&self) -> impl Iterator<Item = Result<FragmentIon, Error>> + 'x {
        let xl = self.crosslink;
        std::iter::once(
            Precursor::new(xl.alpha().as_str(), xl.beta().as_str()).map(FragmentIon::Precursor),
        )
    }

    pub fn diagnostic(&self) -> impl Iterator<Item = Result<FragmentIon, Error>> + 'x {
        DIAGNOSTIC_IONS
            .into_iter()
            .map(|code| Diagnostic::new(code).map(FragmentIon::Diagnostic))
    }

    /// One immonium ion per residue code outside of the two linked positions
    pub fn immonium(&self) -> impl Iterator<Item = Result<FragmentIon, Error>> + 'x {
        self.crosslink
            .unique_residues()
            .into_iter()
            .map(|aa| Immonium::new(aa).map(FragmentIon::Immonium))
    }

    /// Fragments of a single peptide that stop short of the linked residue
    pub fn common(&self) -> impl Iterator<Item = Result<FragmentIon, Error>> + 'x {
        let xl = self.crosslink;
        SIDES.into_iter().flat_map(move |(side, terminus)| {
            IonSeries::unlinked(xl.peptide(side).as_str(), xl.link_index(side), terminus).flat_map(
                move |frag| {
                    terminus
                        .kinds()
                        .into_iter()
                        .map(move |kind| Common::new(side, kind, frag).map(FragmentIon::Common))
                },
            )
        })
    }

    /// Linked ions where one peptide is cleaved and the other is intact
    pub fn crosslinked_single(&self) -> impl Iterator<Item = Result<FragmentIon, Error>> + 'x {
        let xl = self.crosslink;
        SIDES.into_iter().flat_map(move |(side, terminus)| {
            IonSeries::linked(xl.peptide(side).as_str(), xl.link_index(side), terminus).flat_map(
                move |frag| {
                    terminus.kinds().into_iter().map(move |kind| {
                        let ion = match side {
                            Side::Alpha => {
                                Crosslinked::new(frag, xl.beta().as_str(), [Some(kind), None])
                            }
                            Side::Beta => {
                                Crosslinked::new(xl.alpha().as_str(), frag, [None, Some(kind)])
                            }
                        };
                        ion.map(FragmentIon::Crosslinked)
                    })
                },
            )
        })
    }

    /// Linked ions where both peptides are cleaved. Scission kinds are paired
    /// positionally (a with a, b with b, ...), not crossed.
    pub fn crosslinked_double(&self) -> impl Iterator<Item = Result<FragmentIon, Error>> + 'x {
        let xl = self.crosslink;
        PAIRS.into_iter().flat_map(move |(alpha_terminus, beta_terminus)| {
            let alpha = IonSeries::linked(
                xl.alpha().as_str(),
                xl.link_index(Side::Alpha),
                alpha_terminus,
            );
            let beta = IonSeries::linked(
                xl.beta().as_str(),
                xl.link_index(Side::Beta),
                beta_terminus,
            );
            alpha
                .cartesian_product(beta)
                .flat_map(move |(alpha_frag, beta_frag)| {
                    alpha_terminus
                        .kinds()
                        .into_iter()
                        .zip(beta_terminus.kinds())
                        .map(move |(a, b)| {
                            Crosslinked::new(alpha_frag, beta_frag, [Some(a), Some(b)])
                                .map(FragmentIon::Crosslinked)
                        })
                })
        })
    }

    /// All six ion families: precursor, diagnostic, immonium, common,
    /// singly-cleaved linked, doubly-cleaved linked
    pub fn iter(&self) -> impl Iterator<Item = Result<FragmentIon, Error>> + 'x {
        self.precursor()
            .chain(self.diagnostic())
            .chain(self.immonium())
            .chain(self.common())
            .chain(self.crosslinked_single())
            .chain(self.crosslinked_double())
    }

    pub fn fragments(&self) -> Result<Vec<FragmentIon>, Error> {
        self.iter().collect()
    }
}
