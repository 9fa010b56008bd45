pub mod annotator;
pub mod crosslink;
pub mod fragment;
pub mod fragmenter;
pub mod ion_series;
pub mod mass;
pub mod peptide;
pub mod spectrum;

use crosslink::Side;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("malformed cross-link identifier `{0}`: expected `<alpha>-<beta>-a<N>-b<M>`")]
    MalformedIdentifier(String),
    #[error("{side} link position {position} is outside of a peptide with {length} residues")]
    LinkPosition {
        side: Side,
        position: usize,
        length: usize,
    },
    #[error("unknown amino acid residue `{0}`")]
    UnknownResidue(char),
    #[error("no immonium ion mass for residue `{0}`")]
    UnknownImmoniumResidue(char),
    #[error("unknown diagnostic ion `{0}`")]
    UnknownDiagnosticCode(String),
    #[error("cannot create common fragment ion: {0}")]
    InvalidCommonIon(String),
}
