use std::collections::{BTreeSet, VecDeque};

use petgraph::graph::EdgeIndex;

use crate::mol::Mol;

/// Split `bonds` into groups connected through shared atoms.
///
/// Each group lists its bonds in breadth-first order from its lowest-indexed
/// bond, so every bond after the first touches an earlier one. Groups are
/// ordered by their first bond. Two groups never share an atom.
pub fn aromatic_components<A, B>(mol: &Mol<A, B>, bonds: &[EdgeIndex]) -> Vec<Vec<EdgeIndex>> {
    let mut remaining: BTreeSet<EdgeIndex> = bonds.iter().copied().collect();
    let mut components = Vec::new();

    while let Some(seed) = remaining.pop_first() {
        let mut component = Vec::new();
        let mut queue = VecDeque::from([seed]);
        while let Some(bond) = queue.pop_front() {
            component.push(bond);
            for next in mol.neighbor_bonds(bond) {
                if remaining.remove(&next) {
                    queue.push_back(next);
                }
            }
        }
        components.push(component);
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;

    #[test]
    fn fused_rings_form_one_component() {
        let mol = naphthalene(true);
        let bonds: Vec<EdgeIndex> = mol.bonds().collect();
        let components = aromatic_components(&mol, &bonds);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 11);
    }

    #[test]
    fn disjoint_systems_split() {
        let mut atoms = carbons(11, 1);
        atoms[0].hydrogen_count = 0;
        atoms[6].hydrogen_count = 0;
        let mut bonds = cycle_bonds(&[A; 6]);
        bonds.extend([(6, 7, A), (7, 8, A), (8, 9, A), (9, 10, A), (10, 6, A)]);
        let mol = build(atoms, &bonds);
        let all: Vec<EdgeIndex> = mol.bonds().collect();
        let components = aromatic_components(&mol, &all);
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].len(), 6);
        assert_eq!(components[1].len(), 5);
        assert_eq!(components[1][0], bond(&mol, 6, 7));
    }

    #[test]
    fn only_listed_bonds_connect() {
        let mol = benzene(true);
        let picked = [bond(&mol, 0, 1), bond(&mol, 3, 4)];
        let components = aromatic_components(&mol, &picked);
        assert_eq!(components, vec![vec![picked[0]], vec![picked[1]]]);
    }

    #[test]
    fn breadth_first_order() {
        let mol = anthracene(true);
        let bonds: Vec<EdgeIndex> = mol.bonds().collect();
        let components = aromatic_components(&mol, &bonds);
        assert_eq!(components.len(), 1);
        let order = &components[0];
        for (i, &b) in order.iter().enumerate().skip(1) {
            let touches_earlier = order[..i]
                .iter()
                .any(|&earlier| mol.neighbor_bonds(b).contains(&earlier));
            assert!(touches_earlier, "bond {} is disconnected", b.index());
        }
    }

    #[test]
    fn empty_input() {
        let mol = benzene(true);
        assert!(aromatic_components(&mol, &[]).is_empty());
    }
}
