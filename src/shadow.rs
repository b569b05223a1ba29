//! Detached copies of part of a molecule.
//!
//! A [`ShadowFragment`] owns a fresh [`Mol`] holding the subgraph induced by
//! an atom set, plus the index maps between shadow and original. Edits to
//! the shadow never reach the original; callers translate the results back
//! through the maps.

use std::collections::{BTreeSet, HashMap};

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::error::{Error, Result};
use crate::mol::{Mol, SubFragment};

pub struct ShadowFragment<A, B> {
    mol: Mol<A, B>,
    atom_to_shadow: HashMap<NodeIndex, NodeIndex>,
    atom_to_original: Vec<NodeIndex>,
    bond_to_shadow: HashMap<EdgeIndex, EdgeIndex>,
    bond_to_original: Vec<EdgeIndex>,
}

impl<A: Clone, B: Clone> ShadowFragment<A, B> {
    /// Copy `atoms` and every bond between two of them.
    ///
    /// Shadow atoms are numbered in ascending order of their original
    /// indices, bonds likewise. Sub-fragments are carried over restricted to
    /// the copied atoms.
    pub fn new(mol: &Mol<A, B>, atoms: impl IntoIterator<Item = NodeIndex>) -> Result<Self> {
        let atoms: BTreeSet<NodeIndex> = atoms.into_iter().collect();
        if let Some(&unknown) = atoms.iter().find(|&&a| !mol.contains_atom(a)) {
            return Err(Error::UnknownAtom(unknown));
        }
        Ok(Self::copy(mol, &atoms))
    }

    /// Copy of the whole molecule.
    pub fn whole(mol: &Mol<A, B>) -> Self {
        Self::copy(mol, &mol.atoms().collect())
    }

    fn copy(mol: &Mol<A, B>, atoms: &BTreeSet<NodeIndex>) -> Self {
        let mut shadow = Mol::new();
        let mut atom_to_shadow = HashMap::with_capacity(atoms.len());
        let mut atom_to_original = Vec::with_capacity(atoms.len());
        for &atom in atoms {
            let copy = shadow.add_atom(mol.atom(atom).clone());
            atom_to_shadow.insert(atom, copy);
            atom_to_original.push(atom);
        }

        let bonds: BTreeSet<EdgeIndex> = atoms
            .iter()
            .flat_map(|&a| mol.bonds_of(a))
            .filter(|&e| {
                mol.bond_endpoints(e)
                    .is_some_and(|(a, b)| atoms.contains(&a) && atoms.contains(&b))
            })
            .collect();
        let mut bond_to_shadow = HashMap::with_capacity(bonds.len());
        let mut bond_to_original = Vec::with_capacity(bonds.len());
        for bond in bonds {
            let Some((a, b)) = mol.bond_endpoints(bond) else {
                continue;
            };
            let copy = shadow.add_bond(
                atom_to_shadow[&a],
                atom_to_shadow[&b],
                mol.bond(bond).clone(),
            );
            bond_to_shadow.insert(bond, copy);
            bond_to_original.push(bond);
        }

        for fragment in mol.sub_fragments() {
            let inside: Vec<NodeIndex> = fragment
                .atoms
                .iter()
                .filter_map(|a| atom_to_shadow.get(a).copied())
                .collect();
            if !inside.is_empty() {
                shadow.add_sub_fragment(SubFragment {
                    label: fragment.label.clone(),
                    atoms: inside,
                    expanded: fragment.expanded,
                });
            }
        }

        Self {
            mol: shadow,
            atom_to_shadow,
            atom_to_original,
            bond_to_shadow,
            bond_to_original,
        }
    }
}

impl<A, B> ShadowFragment<A, B> {
    pub fn mol(&self) -> &Mol<A, B> {
        &self.mol
    }

    pub fn mol_mut(&mut self) -> &mut Mol<A, B> {
        &mut self.mol
    }

    pub fn into_mol(self) -> Mol<A, B> {
        self.mol
    }

    pub fn to_shadow_atom(&self, original: NodeIndex) -> Option<NodeIndex> {
        self.atom_to_shadow.get(&original).copied()
    }

    pub fn to_original_atom(&self, shadow: NodeIndex) -> Option<NodeIndex> {
        self.atom_to_original.get(shadow.index()).copied()
    }

    pub fn to_shadow_bond(&self, original: EdgeIndex) -> Option<EdgeIndex> {
        self.bond_to_shadow.get(&original).copied()
    }

    pub fn to_original_bond(&self, shadow: EdgeIndex) -> Option<EdgeIndex> {
        self.bond_to_original.get(shadow.index()).copied()
    }
}
