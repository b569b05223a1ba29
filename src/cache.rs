//! Per-molecule side table of derived structure data.
//!
//! Entries are keyed by node identity and live as long as the structure
//! they were derived from. [`Mol`](crate::Mol) clears the whole table when a
//! structure change is flushed; callers that edit a payload behind the
//! molecule's back use [`StructureCache::invalidate`] or
//! [`StructureCache::invalidate_atom`] themselves.

use std::collections::HashMap;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::rings::Ring;

#[derive(Debug, Clone, Default)]
pub struct StructureCache {
    pi_electrons: HashMap<NodeIndex, u8>,
    sssr: Option<Vec<Ring>>,
    aromatic_rings: Option<Vec<Ring>>,
}

impl StructureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memoized π-electron contribution of an atom on an aromatic ring.
    pub fn pi_electrons(&self, atom: NodeIndex) -> Option<u8> {
        self.pi_electrons.get(&atom).copied()
    }

    /// Memoize an atom's π-electron count. The first value written wins;
    /// returns `false` when an entry already existed.
    pub fn remember_pi_electrons(&mut self, atom: NodeIndex, count: u8) -> bool {
        if self.pi_electrons.contains_key(&atom) {
            return false;
        }
        self.pi_electrons.insert(atom, count);
        true
    }

    pub fn pi_electron_map(&self) -> &HashMap<NodeIndex, u8> {
        &self.pi_electrons
    }

    pub fn sssr(&self) -> Option<&[Ring]> {
        self.sssr.as_deref()
    }

    pub(crate) fn take_sssr(&mut self) -> Option<Vec<Ring>> {
        self.sssr.take()
    }

    pub(crate) fn set_sssr(&mut self, rings: Vec<Ring>) {
        self.sssr = Some(rings);
    }

    /// Rings found by the last aromaticity perception.
    pub fn aromatic_rings(&self) -> Option<&[Ring]> {
        self.aromatic_rings.as_deref()
    }

    pub(crate) fn set_aromatic_rings(&mut self, rings: Vec<Ring>) {
        self.aromatic_rings = Some(rings);
    }

    pub fn is_atom_in_aromatic_ring(&self, atom: NodeIndex) -> bool {
        self.aromatic_rings
            .iter()
            .flatten()
            .any(|ring| ring.contains_atom(atom))
    }

    pub fn is_bond_in_aromatic_ring(&self, bond: EdgeIndex) -> bool {
        self.aromatic_rings
            .iter()
            .flatten()
            .any(|ring| ring.contains_bond(bond))
    }

    pub fn invalidate(&mut self) {
        self.pi_electrons.clear();
        self.sssr = None;
        self.aromatic_rings = None;
    }

    /// Forget everything derived from one atom. Rings through the atom may
    /// change type, so ring data is dropped too.
    pub fn invalidate_atom(&mut self, atom: NodeIndex) {
        self.pi_electrons.remove(&atom);
        self.sssr = None;
        self.aromatic_rings = None;
    }

    pub fn is_empty(&self) -> bool {
        self.pi_electrons.is_empty() && self.sssr.is_none() && self.aromatic_rings.is_none()
    }
}
