//! Errors for malformed input handed to the engine.
//!
//! Ambiguous structures and unkekulizable components are ordinary outcomes
//! (an `Uncertain` ring type, an unchanged bond) and never show up here.
//! Everything in [`Error`] is a caller bug: a ring whose connectors do not
//! close the cycle, or an index that does not belong to the molecule.

use petgraph::graph::{EdgeIndex, NodeIndex};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A ring's node and connector lists do not describe a closed cycle.
    #[error("malformed ring: {reason}")]
    MalformedRing { reason: String },

    #[error("atom {} does not belong to the molecule", .0.index())]
    UnknownAtom(NodeIndex),

    #[error("bond {} does not belong to the molecule", .0.index())]
    UnknownBond(EdgeIndex),

    /// Two consecutive ring nodes have no bond between them.
    #[error("atoms {} and {} are not bonded", .a.index(), .b.index())]
    NotBonded { a: NodeIndex, b: NodeIndex },
}

impl Error {
    pub(crate) fn malformed_ring(reason: impl Into<String>) -> Self {
        Self::MalformedRing {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
