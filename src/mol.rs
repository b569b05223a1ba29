use std::ops::{Deref, DerefMut};

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::bond::{BondOrder, BondType};
use crate::cache::StructureCache;
use crate::traits::{HasBondOrder, HasBondOrderMut, HasBondType};

/// A named group of atoms inside a molecule, such as an abbreviated
/// substituent (`Ph`, `Boc`) drawn as a single superatom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubFragment {
    pub label: String,
    pub atoms: Vec<NodeIndex>,
    /// `false` while the group is displayed collapsed under its label.
    pub expanded: bool,
}

impl SubFragment {
    pub fn new(label: impl Into<String>, atoms: Vec<NodeIndex>) -> Self {
        Self {
            label: label.into(),
            atoms,
            expanded: true,
        }
    }

    pub fn collapsed(mut self) -> Self {
        self.expanded = false;
        self
    }

    pub fn contains(&self, atom: NodeIndex) -> bool {
        self.atoms.contains(&atom)
    }
}

/// Molecular graph with a structure cache and batched-update bookkeeping.
///
/// Every mutation through `Mol` records a structure change. Outside an
/// update scope the change is flushed at once: the [`StructureCache`] is
/// cleared and [`revision`](Mol::revision) advances. Inside a scope opened
/// with [`begin_update`](Mol::begin_update) or
/// [`update_scope`](Mol::update_scope) changes are collected and flushed once
/// when the outermost scope ends.
pub struct Mol<A, B> {
    graph: UnGraph<A, B>,
    sub_fragments: Vec<SubFragment>,
    cache: StructureCache,
    update_depth: u32,
    pending_change: bool,
    revision: u64,
}

impl<A, B> Mol<A, B> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
            sub_fragments: Vec::new(),
            cache: StructureCache::new(),
            update_depth: 0,
            pending_change: false,
            revision: 0,
        }
    }

    pub fn graph(&self) -> &UnGraph<A, B> {
        &self.graph
    }

    pub fn atom(&self, idx: NodeIndex) -> &A {
        &self.graph[idx]
    }

    pub fn atom_mut(&mut self, idx: NodeIndex) -> &mut A {
        self.structure_changed();
        &mut self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &B {
        &self.graph[idx]
    }

    pub fn bond_mut(&mut self, idx: EdgeIndex) -> &mut B {
        self.structure_changed();
        &mut self.graph[idx]
    }

    pub fn add_atom(&mut self, atom: A) -> NodeIndex {
        self.structure_changed();
        self.graph.add_node(atom)
    }

    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: B) -> EdgeIndex {
        self.structure_changed();
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_atom(&self, idx: NodeIndex) -> bool {
        idx.index() < self.graph.node_count()
    }

    pub fn contains_bond(&self, idx: EdgeIndex) -> bool {
        idx.index() < self.graph.edge_count()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(idx).map(|e| e.id())
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn bond_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    /// The endpoint of `bond` opposite to `atom`.
    pub fn other_atom(&self, bond: EdgeIndex, atom: NodeIndex) -> Option<NodeIndex> {
        let (a, b) = self.bond_endpoints(bond)?;
        if a == atom {
            Some(b)
        } else if b == atom {
            Some(a)
        } else {
            None
        }
    }

    /// Bonds that share at least one atom with `bond`, excluding `bond` itself.
    pub fn neighbor_bonds(&self, bond: EdgeIndex) -> Vec<EdgeIndex> {
        let Some((a, b)) = self.bond_endpoints(bond) else {
            return Vec::new();
        };
        let mut result: Vec<EdgeIndex> = self
            .bonds_of(a)
            .chain(self.bonds_of(b))
            .filter(|&e| e != bond)
            .collect();
        result.sort();
        result.dedup();
        result
    }

    pub fn sub_fragments(&self) -> &[SubFragment] {
        &self.sub_fragments
    }

    pub fn add_sub_fragment(&mut self, fragment: SubFragment) -> usize {
        self.structure_changed();
        self.sub_fragments.push(fragment);
        self.sub_fragments.len() - 1
    }

    pub fn sub_fragment_of(&self, atom: NodeIndex) -> Option<&SubFragment> {
        self.sub_fragments.iter().find(|f| f.contains(atom))
    }

    /// Either end of `bond` belongs to a sub-fragment.
    pub fn touches_sub_fragment(&self, bond: EdgeIndex) -> bool {
        self.bond_endpoints(bond).is_some_and(|(a, b)| {
            self.sub_fragment_of(a).is_some() || self.sub_fragment_of(b).is_some()
        })
    }

    /// Both ends of `bond` lie inside one collapsed sub-fragment.
    pub fn in_collapsed_sub_fragment(&self, bond: EdgeIndex) -> bool {
        self.bond_endpoints(bond).is_some_and(|(a, b)| {
            self.sub_fragments
                .iter()
                .any(|f| !f.expanded && f.contains(a) && f.contains(b))
        })
    }

    pub fn structure_cache(&self) -> &StructureCache {
        &self.cache
    }

    /// Mutable access to the side table. Writing derived data here is not a
    /// structure change.
    pub fn structure_cache_mut(&mut self) -> &mut StructureCache {
        &mut self.cache
    }

    pub fn invalidate_structure_cache(&mut self) {
        self.cache.invalidate();
    }

    /// Number of flushed structure changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn begin_update(&mut self) {
        self.update_depth += 1;
    }

    pub fn end_update(&mut self) {
        if self.update_depth == 0 {
            return;
        }
        self.update_depth -= 1;
        if self.update_depth == 0 && self.pending_change {
            self.flush_change();
        }
    }

    pub fn is_updating(&self) -> bool {
        self.update_depth > 0
    }

    /// Open an update scope that ends when the returned guard is dropped.
    pub fn update_scope(&mut self) -> UpdateScope<'_, A, B> {
        self.begin_update();
        UpdateScope { mol: self }
    }

    fn structure_changed(&mut self) {
        if self.update_depth > 0 {
            self.pending_change = true;
        } else {
            self.flush_change();
        }
    }

    fn flush_change(&mut self) {
        self.pending_change = false;
        self.cache.invalidate();
        self.revision += 1;
    }
}

impl<A, B: HasBondOrder + HasBondType> Mol<A, B> {
    /// Covalent bonds of `atom` whose order is double, triple, quadruple or
    /// aromatic.
    pub fn linked_multiple_bonds(&self, atom: NodeIndex) -> Vec<EdgeIndex> {
        self.bonds_of(atom)
            .filter(|&e| {
                let bond = self.bond(e);
                bond.bond_type() == BondType::Covalent && bond.bond_order().is_multiple()
            })
            .collect()
    }

    pub fn is_saturated(&self, atom: NodeIndex) -> bool {
        self.linked_multiple_bonds(atom).is_empty()
    }
}

impl<A, B: HasBondOrderMut> Mol<A, B> {
    pub fn set_bond_order(&mut self, bond: EdgeIndex, order: BondOrder) {
        if self.bond(bond).bond_order() != order {
            self.bond_mut(bond).set_bond_order(order);
        }
    }
}

/// RAII guard returned by [`Mol::update_scope`].
pub struct UpdateScope<'a, A, B> {
    mol: &'a mut Mol<A, B>,
}

impl<A, B> Deref for UpdateScope<'_, A, B> {
    type Target = Mol<A, B>;

    fn deref(&self) -> &Mol<A, B> {
        self.mol
    }
}

impl<A, B> DerefMut for UpdateScope<'_, A, B> {
    fn deref_mut(&mut self) -> &mut Mol<A, B> {
        self.mol
    }
}

impl<A, B> Drop for UpdateScope<'_, A, B> {
    fn drop(&mut self) {
        self.mol.end_update();
    }
}

impl<A: Clone, B: Clone> Clone for Mol<A, B> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            sub_fragments: self.sub_fragments.clone(),
            cache: self.cache.clone(),
            update_depth: 0,
            pending_change: false,
            revision: self.revision,
        }
    }
}

impl<A, B> Default for Mol<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: PartialEq, B: PartialEq> PartialEq for Mol<A, B> {
    fn eq(&self, other: &Self) -> bool {
        if self.atom_count() != other.atom_count() || self.bond_count() != other.bond_count() {
            return false;
        }
        for idx in self.atoms() {
            if self.atom(idx) != other.atom(idx) {
                return false;
            }
        }
        for idx in self.bonds() {
            if self.bond(idx) != other.bond(idx) {
                return false;
            }
            if self.bond_endpoints(idx) != other.bond_endpoints(idx) {
                return false;
            }
        }
        self.sub_fragments == other.sub_fragments
    }
}

impl<A: std::fmt::Debug, B: std::fmt::Debug> std::fmt::Debug for Mol<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mol")
            .field("atom_count", &self.atom_count())
            .field("bond_count", &self.bond_count())
            .field("sub_fragments", &self.sub_fragments.len())
            .field("revision", &self.revision)
            .finish()
    }
}
