pub mod aromaticity;
pub mod atom;
pub mod bond;
pub mod cache;
pub mod element;
pub mod error;
pub mod hucklize;
pub mod kekulize;
pub mod mol;
pub mod rings;
pub mod shadow;
pub mod traits;

pub use aromaticity::{
    classify_ring, estimate_pi_electrons, huckel_verdict, perceive_aromatic_rings,
    ring_aromatic_type, AromaticType, PerceptionOptions, PiContext, PiElectrons, PiEstimate,
};
pub use atom::{Atom, Radical};
pub use bond::{Bond, BondOrder, BondOrderChange, BondType};
pub use cache::StructureCache;
pub use element::Element;
pub use error::{Error, Result};
pub use hucklize::{hucklization_changes, hucklize, HucklizationChange, HucklizeOptions};
pub use kekulize::{kekulization_changes, kekulize, KekulizationChange, KekulizeOptions};
pub use mol::{Mol, SubFragment, UpdateScope};
pub use rings::{Ring, RingInfo};
pub use shadow::ShadowFragment;
pub use traits::{
    HasAllowedElements, HasAtomicNum, HasBondOrder, HasBondOrderMut, HasBondType,
    HasFormalCharge, HasHydrogenCount, HasRadical, PiAtom, PiBond,
};

#[cfg(test)]
mod testutil;
