//! Capability traits the engine reads atoms and bonds through.
//!
//! Optional capabilities carry default methods, so a payload type that has
//! no notion of charge, radicals or atom lists only needs an empty `impl`.

use crate::atom::Radical;
use crate::bond::{BondOrder, BondType};
use crate::element::Element;

pub trait HasAtomicNum {
    fn atomic_num(&self) -> u8;
}

pub trait HasFormalCharge {
    fn formal_charge(&self) -> i8 {
        0
    }
}

pub trait HasHydrogenCount {
    fn hydrogen_count(&self) -> u8;
}

pub trait HasRadical {
    fn radical(&self) -> Radical {
        Radical::None
    }
}

/// Element choices of a variable atom. Only consulted when
/// [`HasAtomicNum::atomic_num`] is `0`.
pub trait HasAllowedElements {
    fn allowed_elements(&self) -> &[Element] {
        &[]
    }
}

pub trait HasBondOrder {
    fn bond_order(&self) -> BondOrder;
}

pub trait HasBondOrderMut: HasBondOrder {
    fn set_bond_order(&mut self, order: BondOrder);
}

pub trait HasBondType {
    fn bond_type(&self) -> BondType {
        BondType::Covalent
    }
}

/// Everything π-electron estimation needs from an atom.
pub trait PiAtom:
    HasAtomicNum + HasFormalCharge + HasHydrogenCount + HasRadical + HasAllowedElements
{
}

impl<T> PiAtom for T where
    T: HasAtomicNum + HasFormalCharge + HasHydrogenCount + HasRadical + HasAllowedElements
{
}

/// Everything π-electron estimation needs from a bond.
pub trait PiBond: HasBondOrder + HasBondType {}

impl<T> PiBond for T where T: HasBondOrder + HasBondType {}
