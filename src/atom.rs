use serde::{Deserialize, Serialize};

use crate::element::Element;

/// Radical state of an atom, by spin multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Radical {
    #[default]
    None,
    Singlet,
    /// One unpaired electron.
    Doublet,
    Triplet,
}

/// Default atom type for a molecular graph node.
///
/// `Atom` stores the intrinsic properties the aromaticity engine reads off a
/// structural formula. Saturation is not stored: it follows from the bonds
/// in the owning [`Mol`](crate::Mol) (see [`Mol::is_saturated`](crate::Mol::is_saturated)).
///
/// An `atomic_num` of `0` marks a node that is not a concrete element. If
/// `allowed_elements` is non-empty the node is a variable atom (an atom list
/// such as `[N,O,S]`); otherwise it is fully unresolved.
///
/// # Examples
///
/// ```
/// use huckel::Atom;
///
/// let nitrogen = Atom {
///     atomic_num: 7,
///     hydrogen_count: 1,
///     ..Atom::default()
/// };
/// assert_eq!(nitrogen.atomic_num, 7);
/// assert!(nitrogen.allowed_elements.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Atom {
    /// Atomic number (1 = H, 6 = C, 7 = N, …). `0` for pseudo and variable atoms.
    pub atomic_num: u8,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Mass number. `0` means natural isotopic abundance.
    pub isotope: u16,
    /// Number of hydrogens attached to this atom that are not graph nodes.
    pub hydrogen_count: u8,
    pub radical: Radical,
    /// Element choices of a variable atom.
    pub allowed_elements: Vec<Element>,
}

impl Atom {
    pub fn new(element: Element) -> Self {
        Self {
            atomic_num: element.atomic_num(),
            ..Self::default()
        }
    }

    /// A variable atom restricted to `choices`.
    pub fn any_of(choices: impl IntoIterator<Item = Element>) -> Self {
        Self {
            allowed_elements: choices.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_hydrogens(mut self, count: u8) -> Self {
        self.hydrogen_count = count;
        self
    }

    pub fn with_charge(mut self, charge: i8) -> Self {
        self.formal_charge = charge;
        self
    }

    pub fn with_radical(mut self, radical: Radical) -> Self {
        self.radical = radical;
        self
    }
}

impl crate::traits::HasAtomicNum for Atom {
    fn atomic_num(&self) -> u8 {
        self.atomic_num
    }
}

impl crate::traits::HasFormalCharge for Atom {
    fn formal_charge(&self) -> i8 {
        self.formal_charge
    }
}

impl crate::traits::HasHydrogenCount for Atom {
    fn hydrogen_count(&self) -> u8 {
        self.hydrogen_count
    }
}

impl crate::traits::HasRadical for Atom {
    fn radical(&self) -> Radical {
        self.radical
    }
}

impl crate::traits::HasAllowedElements for Atom {
    fn allowed_elements(&self) -> &[Element] {
        &self.allowed_elements
    }
}
