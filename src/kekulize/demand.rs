//! What each atom of an aromatic component needs from a Kekulé assignment.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;

use crate::atom::Radical;
use crate::bond::{BondOrder, BondType};
use crate::element::Element;
use crate::mol::Mol;
use crate::traits::{PiAtom, PiBond};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Demand {
    /// Exactly one double bond.
    NeedsDouble,
    /// Supplies its π electrons without a double bond: a lone pair, an
    /// anionic carbon, an empty orbital or an exocyclic double bond.
    Independent,
    /// Nothing is known; the π estimate decides once the atom's bonds are set.
    Open,
}

/// Demand of `atom`, from its valence gap when the element has default
/// valences, else from a memoized π count.
pub fn seed_demand<A, B>(mol: &Mol<A, B>, atom: NodeIndex, memo: Option<u8>) -> Demand
where
    A: PiAtom,
    B: PiBond,
{
    valence_demand(mol, atom).unwrap_or(match memo {
        Some(1) => Demand::NeedsDouble,
        Some(_) => Demand::Independent,
        None => Demand::Open,
    })
}

pub fn seed_demands<A, B>(
    mol: &Mol<A, B>,
    atoms: impl IntoIterator<Item = NodeIndex>,
    memo: &HashMap<NodeIndex, u8>,
) -> HashMap<NodeIndex, Demand>
where
    A: PiAtom,
    B: PiBond,
{
    atoms
        .into_iter()
        .map(|atom| (atom, seed_demand(mol, atom, memo.get(&atom).copied())))
        .collect()
}

/// Aromatic bonds count as single; the gap is what the double bond adds.
fn valence_demand<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> Option<Demand>
where
    A: PiAtom,
    B: PiBond,
{
    let payload = mol.atom(atom);
    let element = Element::from_atomic_num(payload.atomic_num())?;

    let bond_sum: u16 = mol
        .bonds_of(atom)
        .filter(|&e| mol.bond(e).bond_type() == BondType::Covalent)
        .map(|e| match mol.bond(e).bond_order() {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Quad => 4,
        })
        .sum();
    let unpaired: u16 = match payload.radical() {
        Radical::None => 0,
        Radical::Doublet => 1,
        Radical::Singlet | Radical::Triplet => 2,
    };
    let hydrogens = u16::from(payload.hydrogen_count());
    let used = bond_sum + hydrogens + unpaired;

    let charge = payload.formal_charge();
    let target = target_valence(element, used, charge)?;
    match target - used {
        0 => Some(Demand::Independent),
        1 => Some(Demand::NeedsDouble),
        2 if hydrogens == 0 && charge != 0 => Some(Demand::NeedsDouble),
        _ => None,
    }
}

/// Smallest charge-adjusted default valence that covers `used`.
fn target_valence(element: Element, used: u16, formal_charge: i8) -> Option<u16> {
    let charge = i16::from(formal_charge);
    element
        .default_valences()
        .iter()
        .filter_map(|&v| u16::try_from(i16::from(v) + charge).ok().filter(|&v| v > 0))
        .find(|&v| v >= used)
}
