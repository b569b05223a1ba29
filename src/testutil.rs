//! Hand-built molecules shared by the unit tests.

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder};
use crate::element::Element;
use crate::mol::Mol;

pub(crate) const S: BondOrder = BondOrder::Single;
pub(crate) const D: BondOrder = BondOrder::Double;
pub(crate) const T: BondOrder = BondOrder::Triple;
pub(crate) const A: BondOrder = BondOrder::Aromatic;

pub(crate) fn n(i: usize) -> NodeIndex {
    NodeIndex::new(i)
}

pub(crate) fn atom(symbol: &str, hydrogens: u8) -> Atom {
    let element = Element::from_symbol(symbol).expect("test uses known symbols");
    Atom::new(element).with_hydrogens(hydrogens)
}

pub(crate) fn carbons(count: usize, hydrogens: u8) -> Vec<Atom> {
    (0..count).map(|_| atom("C", hydrogens)).collect()
}

/// Bonds `i -> i + 1` closing back to atom 0.
pub(crate) fn cycle_bonds(orders: &[BondOrder]) -> Vec<(usize, usize, BondOrder)> {
    let len = orders.len();
    orders
        .iter()
        .enumerate()
        .map(|(i, &order)| (i, (i + 1) % len, order))
        .collect()
}

pub(crate) fn build(atoms: Vec<Atom>, bonds: &[(usize, usize, BondOrder)]) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    let idx: Vec<NodeIndex> = atoms.into_iter().map(|a| mol.add_atom(a)).collect();
    for &(a, b, order) in bonds {
        mol.add_bond(idx[a], idx[b], Bond::new(order));
    }
    mol
}

pub(crate) fn bond(mol: &Mol<Atom, Bond>, a: usize, b: usize) -> EdgeIndex {
    mol.bond_between(n(a), n(b)).expect("bond exists")
}

pub(crate) fn order(mol: &Mol<Atom, Bond>, a: usize, b: usize) -> BondOrder {
    mol.bond(bond(mol, a, b)).order
}

pub(crate) fn orders(mol: &Mol<Atom, Bond>) -> Vec<BondOrder> {
    mol.bonds().map(|e| mol.bond(e).order).collect()
}

pub(crate) fn count_orders(mol: &Mol<Atom, Bond>, wanted: BondOrder) -> usize {
    mol.bonds().filter(|&e| mol.bond(e).order == wanted).count()
}

/// No atom carries more than one double bond.
pub(crate) fn is_valid_kekule(mol: &Mol<Atom, Bond>) -> bool {
    mol.atoms().all(|a| {
        mol.bonds_of(a)
            .filter(|&e| mol.bond(e).order == BondOrder::Double)
            .count()
            <= 1
    })
}

fn kekule_or_aromatic(aromatic: bool, kekule: &[BondOrder]) -> Vec<BondOrder> {
    if aromatic {
        vec![A; kekule.len()]
    } else {
        kekule.to_vec()
    }
}

pub(crate) fn benzene(aromatic: bool) -> Mol<Atom, Bond> {
    let orders = kekule_or_aromatic(aromatic, &[D, S, D, S, D, S]);
    build(carbons(6, 1), &cycle_bonds(&orders))
}

/// Atom 0 is the NH nitrogen.
pub(crate) fn pyrrole(aromatic: bool) -> Mol<Atom, Bond> {
    let mut atoms = vec![atom("N", 1)];
    atoms.extend(carbons(4, 1));
    let orders = kekule_or_aromatic(aromatic, &[S, D, S, D, S]);
    build(atoms, &cycle_bonds(&orders))
}

/// Atom 0 is the heteroatom.
pub(crate) fn five_ring_with(symbol: &str, aromatic: bool) -> Mol<Atom, Bond> {
    let mut atoms = vec![atom(symbol, 0)];
    atoms.extend(carbons(4, 1));
    let orders = kekule_or_aromatic(aromatic, &[S, D, S, D, S]);
    build(atoms, &cycle_bonds(&orders))
}

/// Atom 3 is the nitrogen.
pub(crate) fn pyridine(aromatic: bool) -> Mol<Atom, Bond> {
    let atoms = vec![
        atom("C", 1),
        atom("C", 1),
        atom("C", 1),
        atom("N", 0),
        atom("C", 1),
        atom("C", 1),
    ];
    let orders = kekule_or_aromatic(aromatic, &[D, S, D, S, D, S]);
    build(atoms, &cycle_bonds(&orders))
}

/// Atom 2 is NH, atom 4 the pyridine-type nitrogen.
pub(crate) fn imidazole(aromatic: bool) -> Mol<Atom, Bond> {
    let atoms = vec![
        atom("C", 1),
        atom("C", 1),
        atom("N", 1),
        atom("C", 1),
        atom("N", 0),
    ];
    let orders = kekule_or_aromatic(aromatic, &[D, S, S, D, S]);
    build(atoms, &cycle_bonds(&orders))
}

/// Ring A is atoms 0–5, ring B is 4, 6, 7, 8, 9, 5. Atoms 4 and 5 are shared.
pub(crate) fn naphthalene(aromatic: bool) -> Mol<Atom, Bond> {
    let mut atoms = carbons(10, 1);
    atoms[4].hydrogen_count = 0;
    atoms[5].hydrogen_count = 0;
    let kekule = [
        (0, 1, D),
        (1, 2, S),
        (2, 3, D),
        (3, 4, S),
        (4, 5, D),
        (5, 0, S),
        (4, 6, S),
        (6, 7, D),
        (7, 8, S),
        (8, 9, D),
        (9, 5, S),
    ];
    let bonds: Vec<_> = kekule
        .iter()
        .map(|&(a, b, o)| (a, b, if aromatic { A } else { o }))
        .collect();
    build(atoms, &bonds)
}

/// Linear fusion; atoms 4, 5, 7 and 8 are ring-fusion carbons.
pub(crate) fn anthracene(aromatic: bool) -> Mol<Atom, Bond> {
    let mut atoms = carbons(14, 1);
    for i in [4, 5, 7, 8] {
        atoms[i].hydrogen_count = 0;
    }
    let kekule = [
        (0, 1, D),
        (1, 2, S),
        (2, 3, D),
        (3, 4, S),
        (4, 5, D),
        (5, 0, S),
        (4, 6, S),
        (6, 7, D),
        (7, 8, S),
        (8, 9, D),
        (9, 5, S),
        (7, 10, S),
        (10, 11, D),
        (11, 12, S),
        (12, 13, D),
        (13, 8, S),
    ];
    let bonds: Vec<_> = kekule
        .iter()
        .map(|&(a, b, o)| (a, b, if aromatic { A } else { o }))
        .collect();
    build(atoms, &bonds)
}

/// Benzene ring 0–5 with a methyl carbon 6 on atom 0.
pub(crate) fn toluene() -> Mol<Atom, Bond> {
    let mut atoms = carbons(6, 1);
    atoms[0].hydrogen_count = 0;
    atoms.push(atom("C", 3));
    let mut bonds = cycle_bonds(&[D, S, D, S, D, S]);
    bonds.push((0, 6, S));
    build(atoms, &bonds)
}

/// 2-pyridone: NH at 0, carbonyl carbon 1 with exocyclic oxygen 6.
pub(crate) fn pyridone() -> Mol<Atom, Bond> {
    let mut atoms = vec![atom("N", 1), atom("C", 0)];
    atoms.extend(carbons(4, 1));
    atoms.push(atom("O", 0));
    let mut bonds = cycle_bonds(&[S, S, D, S, D, S]);
    bonds.push((1, 6, D));
    build(atoms, &bonds)
}

pub(crate) fn carbocycle(size: usize, orders: &[BondOrder]) -> Mol<Atom, Bond> {
    assert_eq!(size, orders.len());
    build(carbons(size, 1), &cycle_bonds(orders))
}

pub(crate) fn alternating(size: usize) -> Vec<BondOrder> {
    (0..size).map(|i| if i % 2 == 0 { D } else { S }).collect()
}
