pub(crate) mod fragment;
pub(crate) mod newick;
pub(crate) mod nexus;

use super::phylo::TreeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeParseError {
    #[error("Not a valid NEWICK string.")]
    InvalidNewick,
    #[error("Unexpected character '{character}' at position {position}.")]
    UnexpectedCharacter { position: usize, character: char },
    #[error("Unexpected end of NEWICK string.")]
    UnexpectedEnd,
    #[error("Invalid branch length: \"{0}\".")]
    InvalidBranchLength(String),
    #[error(transparent)]
    TreeError(#[from] TreeError),
}
