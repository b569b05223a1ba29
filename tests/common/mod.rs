#![allow(dead_code)]

use huckel::{Atom, Bond, BondOrder, Element, Mol};
use petgraph::graph::NodeIndex;
use serde::Deserialize;

/// A hand-described molecule as stored in the approval fixtures.
#[derive(Debug, Deserialize)]
pub struct MolSpec {
    pub atoms: Vec<AtomSpec>,
    pub bonds: Vec<(usize, usize, BondOrder)>,
}

#[derive(Debug, Deserialize)]
pub struct AtomSpec {
    pub symbol: String,
    #[serde(default)]
    pub h: u8,
    #[serde(default)]
    pub charge: i8,
}

impl MolSpec {
    pub fn build(&self) -> Mol<Atom, Bond> {
        let mut mol = Mol::new();
        let nodes: Vec<_> = self
            .atoms
            .iter()
            .map(|a| {
                let element = Element::from_symbol(&a.symbol)
                    .unwrap_or_else(|| panic!("unknown symbol {:?}", a.symbol));
                mol.add_atom(
                    Atom::new(element)
                        .with_hydrogens(a.h)
                        .with_charge(a.charge),
                )
            })
            .collect();
        for &(a, b, order) in &self.bonds {
            mol.add_bond(nodes[a], nodes[b], Bond::new(order));
        }
        mol
    }
}

pub fn count_orders(mol: &Mol<Atom, Bond>, wanted: BondOrder) -> usize {
    mol.bonds().filter(|&e| mol.bond(e).order == wanted).count()
}

/// Ring of `size` CH carbons with every bond of `order`.
pub fn carbocycle(size: usize, order: BondOrder) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    let nodes: Vec<_> = (0..size)
        .map(|_| mol.add_atom(Atom::new(Element::C).with_hydrogens(1)))
        .collect();
    for i in 0..size {
        mol.add_bond(nodes[i], nodes[(i + 1) % size], Bond::new(order));
    }
    mol
}

/// Linearly fused benzenoid with `rings` rings, all bonds aromatic.
pub fn acene(rings: usize) -> Mol<Atom, Bond> {
    fn add(mol: &mut Mol<Atom, Bond>, h: u8) -> NodeIndex {
        mol.add_atom(Atom::new(Element::C).with_hydrogens(h))
    }
    let aromatic = || Bond::new(BondOrder::Aromatic);
    let mut mol = Mol::new();

    // First ring: 0..6, with the fusion edge of the next ring on (4, 5).
    let first: Vec<_> = (0..6).map(|_| add(&mut mol, 1)).collect();
    for i in 0..6 {
        mol.add_bond(first[i], first[(i + 1) % 6], aromatic());
    }
    let (mut left, mut right) = (first[4], first[5]);
    for _ in 1..rings {
        mol.atom_mut(left).hydrogen_count = 0;
        mol.atom_mut(right).hydrogen_count = 0;
        let ring: Vec<_> = (0..4).map(|_| add(&mut mol, 1)).collect();
        mol.add_bond(left, ring[0], aromatic());
        mol.add_bond(ring[0], ring[1], aromatic());
        mol.add_bond(ring[1], ring[2], aromatic());
        mol.add_bond(ring[2], ring[3], aromatic());
        mol.add_bond(ring[3], right, aromatic());
        left = ring[1];
        right = ring[2];
    }
    mol
}

/// No atom carries more than one double bond.
pub fn is_valid_kekule(mol: &Mol<Atom, Bond>) -> bool {
    mol.atoms().all(|a| {
        mol.bonds_of(a)
            .filter(|&e| mol.bond(e).order == BondOrder::Double)
            .count()
            <= 1
    })
}
