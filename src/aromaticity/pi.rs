//! π-electron contribution of a single ring atom.
//!
//! The estimate depends on the atom's element, charge and radical, and on the
//! bonds around it: which of them are multiple, and which lie on the ring
//! system under consideration. [`PiContext`] supplies the ring bonds and can
//! overlay bond orders, so the kekulization search can ask about a partial
//! assignment without writing it to the molecule.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::atom::Radical;
use crate::bond::{BondOrder, BondType};
use crate::element::Element;
use crate::mol::Mol;
use crate::traits::{PiAtom, PiBond};

/// π electrons one atom can put into a ring, or the reason it cannot take
/// part in an aromatic system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PiElectrons {
    Count(u8),
    /// Neutral sp3 carbon.
    SaturatedCarbon,
    /// Carbon carrying both `C-O` and `C=O`.
    EsterCarbon,
    /// Sulfur with a multiple bond to oxygen.
    SulfoneOrSulfoxideSulfur,
    /// Cumulated or triple bonds in the ring.
    Impossible,
}

impl PiElectrons {
    pub fn count(self) -> Option<u8> {
        match self {
            PiElectrons::Count(n) => Some(n),
            _ => None,
        }
    }
}

/// Either one exact value or the set of values the atom might contribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PiEstimate {
    Exact(PiElectrons),
    OneOf(Vec<PiElectrons>),
}

impl PiEstimate {
    pub(crate) fn count(n: u8) -> Self {
        PiEstimate::Exact(PiElectrons::Count(n.min(2)))
    }

    /// Nothing is known about the atom.
    pub(crate) fn unknown() -> Self {
        PiEstimate::OneOf((0..=2).map(PiElectrons::Count).collect())
    }

    /// Collapse to `Exact` when only one distinct value remains.
    pub(crate) fn from_choices(choices: impl IntoIterator<Item = PiElectrons>) -> Self {
        let mut unique: Vec<PiElectrons> = Vec::new();
        for c in choices {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }
        if unique.len() == 1 {
            PiEstimate::Exact(unique[0])
        } else {
            PiEstimate::OneOf(unique)
        }
    }

    pub fn choices(&self) -> &[PiElectrons] {
        match self {
            PiEstimate::Exact(p) => std::slice::from_ref(p),
            PiEstimate::OneOf(v) => v,
        }
    }

    pub fn is_uncertain(&self) -> bool {
        self.choices().len() > 1
    }
}

/// Ring bonds and optional bond-order overrides for an estimate.
#[derive(Debug, Clone, Copy)]
pub struct PiContext<'a> {
    ring_bonds: &'a HashSet<EdgeIndex>,
    orders: Option<&'a HashMap<EdgeIndex, BondOrder>>,
}

impl<'a> PiContext<'a> {
    pub fn new(ring_bonds: &'a HashSet<EdgeIndex>) -> Self {
        Self {
            ring_bonds,
            orders: None,
        }
    }

    /// Read bond orders from `orders` first, then from the molecule.
    pub fn with_orders(mut self, orders: &'a HashMap<EdgeIndex, BondOrder>) -> Self {
        self.orders = Some(orders);
        self
    }

    pub fn is_ring_bond(&self, bond: EdgeIndex) -> bool {
        self.ring_bonds.contains(&bond)
    }

    fn order<A, B: PiBond>(&self, mol: &Mol<A, B>, bond: EdgeIndex) -> BondOrder {
        self.orders
            .and_then(|o| o.get(&bond).copied())
            .unwrap_or_else(|| mol.bond(bond).bond_order())
    }

    fn linked_multiple_bonds<A, B: PiBond>(
        &self,
        mol: &Mol<A, B>,
        atom: NodeIndex,
    ) -> Vec<EdgeIndex> {
        mol.bonds_of(atom)
            .filter(|&e| {
                mol.bond(e).bond_type() == BondType::Covalent && self.order(mol, e).is_multiple()
            })
            .collect()
    }
}

/// Estimate the π electrons `atom` contributes to the ring system described
/// by `ctx`.
///
/// A concrete element yields an exact value. A variable atom yields the
/// union over its allowed elements, and an atom with no element information
/// yields `{0, 1, 2}`.
pub fn estimate_pi_electrons<A, B>(mol: &Mol<A, B>, atom: NodeIndex, ctx: &PiContext) -> PiEstimate
where
    A: PiAtom,
    B: PiBond,
{
    let payload = mol.atom(atom);
    let atomic_num = payload.atomic_num();
    if atomic_num != 0 {
        return match Element::from_atomic_num(atomic_num) {
            Some(element) => estimate_as(mol, atom, element, ctx),
            None => PiEstimate::unknown(),
        };
    }
    let allowed = payload.allowed_elements();
    if allowed.is_empty() {
        return PiEstimate::unknown();
    }
    PiEstimate::from_choices(allowed.iter().flat_map(|&element| {
        estimate_as(mol, atom, element, ctx)
            .choices()
            .to_vec()
    }))
}

/// Sulfur with a covalent multiple bond to oxygen (`S=O`).
pub fn is_sulfone_or_sulfoxide_sulfur<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> bool
where
    A: PiAtom,
    B: PiBond,
{
    let no_ring = HashSet::new();
    let ctx = PiContext::new(&no_ring);
    element_of(mol, atom) == Some(Element::S) && sulfur_oxide(mol, atom, &ctx)
}

/// Carbon with both a single and a double covalent bond to oxygen.
pub fn is_ester_carbon<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> bool
where
    A: PiAtom,
    B: PiBond,
{
    let no_ring = HashSet::new();
    let ctx = PiContext::new(&no_ring);
    element_of(mol, atom) == Some(Element::C) && carboxyl(mol, atom, &ctx)
}

fn element_of<A: PiAtom, B>(mol: &Mol<A, B>, atom: NodeIndex) -> Option<Element> {
    Element::from_atomic_num(mol.atom(atom).atomic_num())
}

fn estimate_as<A, B>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    element: Element,
    ctx: &PiContext,
) -> PiEstimate
where
    A: PiAtom,
    B: PiBond,
{
    let multiple = ctx.linked_multiple_bonds(mol, atom);
    if multiple.is_empty() {
        return PiEstimate::Exact(saturated(mol.atom(atom), element));
    }

    if element == Element::S && sulfur_oxide(mol, atom, ctx) {
        return PiEstimate::Exact(PiElectrons::SulfoneOrSulfoxideSulfur);
    }
    if element == Element::C && carboxyl(mol, atom, ctx) {
        return PiEstimate::Exact(PiElectrons::EsterCarbon);
    }

    let in_ring: Vec<BondOrder> = multiple
        .iter()
        .filter(|&&e| ctx.is_ring_bond(e))
        .map(|&e| ctx.order(mol, e))
        .collect();

    match in_ring.as_slice() {
        [] => {
            // C=O, C=N, C=S outside the ring leave no p electron on carbon.
            let to_hetero = element == Element::C
                && multiple.iter().any(|&e| {
                    mol.other_atom(e, atom)
                        .and_then(|other| element_of(mol, other))
                        .is_some_and(Element::is_hetero)
                });
            PiEstimate::count(if to_hetero { 0 } else { 1 })
        }
        [BondOrder::Double | BondOrder::Aromatic] => PiEstimate::count(1),
        orders if orders.iter().all(|&o| o == BondOrder::Aromatic) => {
            if element.is_hetero() {
                PiEstimate::OneOf(vec![PiElectrons::Count(1), PiElectrons::Count(2)])
            } else {
                PiEstimate::count(1)
            }
        }
        _ => PiEstimate::Exact(PiElectrons::Impossible),
    }
}

fn saturated<A: PiAtom>(atom: &A, element: Element) -> PiElectrons {
    let charge = atom.formal_charge();
    if atom.radical() == Radical::Doublet {
        PiElectrons::Count(1)
    } else if element.is_hetero() {
        PiElectrons::Count((2 - i16::from(charge)).clamp(0, 2) as u8)
    } else if element == Element::C {
        match charge {
            c if c > 0 => PiElectrons::Count(0),
            c if c < 0 => PiElectrons::Count(2),
            _ => PiElectrons::SaturatedCarbon,
        }
    } else {
        PiElectrons::Count(0)
    }
}

fn bonds_to_oxygen<A, B>(mol: &Mol<A, B>, atom: NodeIndex, ctx: &PiContext) -> Vec<BondOrder>
where
    A: PiAtom,
    B: PiBond,
{
    mol.bonds_of(atom)
        .filter(|&e| mol.bond(e).bond_type() == BondType::Covalent)
        .filter(|&e| {
            mol.other_atom(e, atom)
                .and_then(|other| element_of(mol, other))
                == Some(Element::O)
        })
        .map(|e| ctx.order(mol, e))
        .collect()
}

fn sulfur_oxide<A: PiAtom, B: PiBond>(mol: &Mol<A, B>, atom: NodeIndex, ctx: &PiContext) -> bool {
    bonds_to_oxygen(mol, atom, ctx)
        .into_iter()
        .any(BondOrder::is_multiple)
}

fn carboxyl<A: PiAtom, B: PiBond>(mol: &Mol<A, B>, atom: NodeIndex, ctx: &PiContext) -> bool {
    let mut single = false;
    let mut double = false;
    for order in bonds_to_oxygen(mol, atom, ctx) {
        match order {
            BondOrder::Single => single = true,
            BondOrder::Double => double = true,
            _ => {}
        }
    }
    single && double
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::bond::Bond;
    use crate::testutil::*;

    fn ring_set(mol: &Mol<Atom, Bond>, ring: &[usize]) -> HashSet<EdgeIndex> {
        (0..ring.len())
            .map(|i| bond(mol, ring[i], ring[(i + 1) % ring.len()]))
            .collect()
    }

    fn estimate(mol: &Mol<Atom, Bond>, ring: &[usize], atom: usize) -> PiEstimate {
        let bonds = ring_set(mol, ring);
        estimate_pi_electrons(mol, n(atom), &PiContext::new(&bonds))
    }

    const HEXAGON: [usize; 6] = [0, 1, 2, 3, 4, 5];
    const PENTAGON: [usize; 5] = [0, 1, 2, 3, 4];

    #[test]
    fn kekule_carbon_gives_one() {
        let mol = benzene(false);
        for i in 0..6 {
            assert_eq!(estimate(&mol, &HEXAGON, i), PiEstimate::count(1));
        }
    }

    #[test]
    fn saturated_heteroatom_lone_pair() {
        let mol = pyrrole(false);
        assert_eq!(estimate(&mol, &PENTAGON, 0), PiEstimate::count(2));
        let furan = five_ring_with("O", false);
        assert_eq!(estimate(&furan, &PENTAGON, 0), PiEstimate::count(2));
    }

    #[test]
    fn charge_shifts_heteroatom_count() {
        let mut atoms = vec![atom("N", 2).with_charge(1)];
        atoms.extend(carbons(4, 1));
        let mol = build(atoms, &cycle_bonds(&[S, D, S, D, S]));
        assert_eq!(estimate(&mol, &PENTAGON, 0), PiEstimate::count(1));

        let mut atoms = vec![atom("O", 0).with_charge(2)];
        atoms.extend(carbons(4, 1));
        let mol = build(atoms, &cycle_bonds(&[S, D, S, D, S]));
        assert_eq!(estimate(&mol, &PENTAGON, 0), PiEstimate::count(0));

        let mut atoms = vec![atom("N", 0).with_charge(-1)];
        atoms.extend(carbons(4, 1));
        let mol = build(atoms, &cycle_bonds(&[S, D, S, D, S]));
        assert_eq!(estimate(&mol, &PENTAGON, 0), PiEstimate::count(2));
    }

    #[test]
    fn saturated_carbon_by_charge() {
        let mut atoms = carbons(5, 1);
        atoms[0] = atom("C", 1).with_charge(-1);
        let mol = build(atoms.clone(), &cycle_bonds(&[S, D, S, D, S]));
        assert_eq!(estimate(&mol, &PENTAGON, 0), PiEstimate::count(2));

        atoms[0] = atom("C", 1).with_charge(1);
        let mol = build(atoms.clone(), &cycle_bonds(&[S, D, S, D, S]));
        assert_eq!(estimate(&mol, &PENTAGON, 0), PiEstimate::count(0));

        atoms[0] = atom("C", 2);
        let mol = build(atoms, &cycle_bonds(&[S, D, S, D, S]));
        assert_eq!(
            estimate(&mol, &PENTAGON, 0),
            PiEstimate::Exact(PiElectrons::SaturatedCarbon)
        );
    }

    #[test]
    fn doublet_radical_gives_one() {
        let mut atoms = carbons(5, 1);
        atoms[0] = atom("C", 1).with_radical(Radical::Doublet);
        let mol = build(atoms, &cycle_bonds(&[S, D, S, D, S]));
        assert_eq!(estimate(&mol, &PENTAGON, 0), PiEstimate::count(1));
    }

    #[test]
    fn saturated_boron_gives_zero() {
        let mut atoms = vec![atom("B", 1)];
        atoms.extend(carbons(4, 1));
        let mol = build(atoms, &cycle_bonds(&[S, D, S, D, S]));
        assert_eq!(estimate(&mol, &PENTAGON, 0), PiEstimate::count(0));
    }

    #[test]
    fn aromatic_bonds_on_heteroatom_are_uncertain() {
        let mol = pyridine(true);
        let est = estimate(&mol, &HEXAGON, 3);
        assert!(est.is_uncertain());
        assert_eq!(
            est.choices(),
            &[PiElectrons::Count(1), PiElectrons::Count(2)]
        );
        assert_eq!(estimate(&mol, &HEXAGON, 0), PiEstimate::count(1));
    }

    #[test]
    fn fused_junction_with_three_aromatic_bonds() {
        let mol = naphthalene(true);
        let bonds: HashSet<EdgeIndex> = mol.bonds().collect();
        let est = estimate_pi_electrons(&mol, n(4), &PiContext::new(&bonds));
        assert_eq!(est, PiEstimate::count(1));
    }

    #[test]
    fn exocyclic_carbonyl_carbon_gives_zero() {
        let mol = pyridone();
        assert_eq!(estimate(&mol, &HEXAGON, 1), PiEstimate::count(0));
    }

    #[test]
    fn exocyclic_methylene_gives_one() {
        let mut atoms = carbons(6, 1);
        atoms[0].hydrogen_count = 0;
        atoms.push(atom("C", 2));
        let mut bonds = cycle_bonds(&[S, S, D, S, D, S]);
        bonds.push((0, 6, D));
        let mol = build(atoms, &bonds);
        assert_eq!(estimate(&mol, &HEXAGON, 0), PiEstimate::count(1));
    }

    #[test]
    fn cumulated_and_triple_ring_bonds_are_impossible() {
        let mol = carbocycle(6, &[D, D, S, D, S, S]);
        assert_eq!(
            estimate(&mol, &HEXAGON, 1),
            PiEstimate::Exact(PiElectrons::Impossible)
        );
        let mol = carbocycle(6, &[T, S, D, S, D, S]);
        assert_eq!(
            estimate(&mol, &HEXAGON, 0),
            PiEstimate::Exact(PiElectrons::Impossible)
        );
    }

    #[test]
    fn mixed_aromatic_and_double_is_impossible() {
        let mol = carbocycle(6, &[A, D, S, S, S, S]);
        assert_eq!(
            estimate(&mol, &HEXAGON, 1),
            PiEstimate::Exact(PiElectrons::Impossible)
        );
        assert_eq!(estimate(&mol, &HEXAGON, 0), PiEstimate::count(1));
    }

    #[test]
    fn sulfone_sulfur_and_ester_carbon() {
        let mut atoms = vec![atom("S", 0)];
        atoms.extend(carbons(4, 1));
        atoms.push(atom("O", 0));
        atoms.push(atom("O", 0));
        let mut bonds = cycle_bonds(&[S, D, S, D, S]);
        bonds.push((0, 5, D));
        bonds.push((0, 6, D));
        let mol = build(atoms, &bonds);
        assert!(is_sulfone_or_sulfoxide_sulfur(&mol, n(0)));
        assert_eq!(
            estimate(&mol, &PENTAGON, 0),
            PiEstimate::Exact(PiElectrons::SulfoneOrSulfoxideSulfur)
        );

        // Lactone: ring O bonded to carbonyl carbon 1.
        let mut atoms = vec![atom("O", 0), atom("C", 0)];
        atoms.extend(carbons(3, 1));
        atoms.push(atom("O", 0));
        let mut bonds = cycle_bonds(&[S, S, D, S, S]);
        bonds.push((1, 5, D));
        let mol = build(atoms, &bonds);
        assert!(is_ester_carbon(&mol, n(1)));
        assert!(!is_ester_carbon(&mol, n(2)));
        assert_eq!(
            estimate(&mol, &PENTAGON, 1),
            PiEstimate::Exact(PiElectrons::EsterCarbon)
        );
    }

    #[test]
    fn thiophene_sulfur_is_not_a_sulfone() {
        let mol = five_ring_with("S", false);
        assert!(!is_sulfone_or_sulfoxide_sulfur(&mol, n(0)));
        assert_eq!(estimate(&mol, &PENTAGON, 0), PiEstimate::count(2));
    }

    #[test]
    fn variable_atoms() {
        let mut atoms = vec![Atom::any_of([Element::N, Element::O, Element::C])];
        atoms.extend(carbons(4, 1));
        let mol = build(atoms, &cycle_bonds(&[S, D, S, D, S]));
        assert_eq!(
            estimate(&mol, &PENTAGON, 0).choices(),
            &[PiElectrons::Count(2), PiElectrons::SaturatedCarbon]
        );

        let mut atoms = vec![Atom::default()];
        atoms.extend(carbons(4, 1));
        let mol = build(atoms, &cycle_bonds(&[S, D, S, D, S]));
        assert_eq!(estimate(&mol, &PENTAGON, 0), PiEstimate::unknown());
    }

    #[test]
    fn overrides_replace_bond_orders() {
        let mol = benzene(true);
        let bonds = ring_set(&mol, &HEXAGON);
        let mut orders: HashMap<EdgeIndex, BondOrder> =
            bonds.iter().map(|&e| (e, BondOrder::Single)).collect();
        let ctx = PiContext::new(&bonds).with_orders(&orders);
        assert_eq!(
            estimate_pi_electrons(&mol, n(0), &ctx),
            PiEstimate::Exact(PiElectrons::SaturatedCarbon)
        );

        orders.insert(bond(&mol, 0, 1), BondOrder::Double);
        let ctx = PiContext::new(&bonds).with_orders(&orders);
        assert_eq!(estimate_pi_electrons(&mol, n(0), &ctx), PiEstimate::count(1));
    }

    #[test]
    fn ionic_bonds_do_not_unsaturate() {
        let mut mol = benzene(false);
        let e = bond(&mol, 0, 1);
        mol.bond_mut(e).kind = BondType::Ionic;
        let bonds = ring_set(&mol, &HEXAGON);
        assert_eq!(
            estimate_pi_electrons(&mol, n(0), &PiContext::new(&bonds)),
            PiEstimate::Exact(PiElectrons::SaturatedCarbon)
        );
    }
}
