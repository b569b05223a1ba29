//! Ring search and the ring type shared by perception and hucklization.
//!
//! [`RingInfo::sssr`] is the default ring-search provider: Horton candidate
//! cycles (shortest paths from every root to both ends of every bond) sorted
//! by size, filtered to a linearly independent set over GF(2) edge vectors.
//! Callers with their own ring search build [`Ring`]s with
//! [`Ring::from_cycle`] or [`Ring::new`], which enforce the input contract.

use std::collections::VecDeque;

use petgraph::algo::connected_components;
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::aromaticity::AromaticType;
use crate::error::{Error, Result};
use crate::mol::Mol;

/// A ring as an ordered node cycle plus the connector between each node and
/// its successor.
///
/// `connectors[i]` joins `nodes[i]` and `nodes[(i + 1) % len]`. The cached
/// aromatic type is written by aromaticity perception and reused by later
/// perceptions while the ring lives in the molecule's structure cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    nodes: Vec<NodeIndex>,
    connectors: Vec<EdgeIndex>,
    aromatic_type: Option<AromaticType>,
}

impl Ring {
    /// Build a ring from an ordered node cycle, looking up the connecting bonds.
    pub fn from_cycle<A, B>(mol: &Mol<A, B>, nodes: Vec<NodeIndex>) -> Result<Self> {
        check_nodes(mol, &nodes)?;
        let len = nodes.len();
        let connectors = (0..len)
            .map(|i| {
                let (a, b) = (nodes[i], nodes[(i + 1) % len]);
                mol.bond_between(a, b).ok_or(Error::NotBonded { a, b })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            nodes,
            connectors,
            aromatic_type: None,
        })
    }

    /// Build a ring from explicit node and connector lists.
    pub fn new<A, B>(
        mol: &Mol<A, B>,
        nodes: Vec<NodeIndex>,
        connectors: Vec<EdgeIndex>,
    ) -> Result<Self> {
        let ring = Self {
            nodes,
            connectors,
            aromatic_type: None,
        };
        ring.validate(mol)?;
        Ok(ring)
    }

    /// Check that the ring still describes a closed cycle in `mol`.
    pub fn validate<A, B>(&self, mol: &Mol<A, B>) -> Result<()> {
        check_nodes(mol, &self.nodes)?;
        let len = self.nodes.len();
        if self.connectors.len() != len {
            return Err(Error::malformed_ring(format!(
                "{} nodes but {} connectors",
                len,
                self.connectors.len()
            )));
        }
        for (i, &bond) in self.connectors.iter().enumerate() {
            let (a, b) = (self.nodes[i], self.nodes[(i + 1) % len]);
            let ends = mol.bond_endpoints(bond).ok_or(Error::UnknownBond(bond))?;
            if ends != (a, b) && ends != (b, a) {
                return Err(Error::malformed_ring(format!(
                    "connector {} does not join atoms {} and {}",
                    bond.index(),
                    a.index(),
                    b.index()
                )));
            }
        }
        Ok(())
    }

    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    pub fn connectors(&self) -> &[EdgeIndex] {
        &self.connectors
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_atom(&self, atom: NodeIndex) -> bool {
        self.nodes.contains(&atom)
    }

    pub fn contains_bond(&self, bond: EdgeIndex) -> bool {
        self.connectors.contains(&bond)
    }

    pub fn aromatic_type(&self) -> Option<AromaticType> {
        self.aromatic_type
    }

    pub fn set_aromatic_type(&mut self, aromatic_type: AromaticType) {
        self.aromatic_type = Some(aromatic_type);
    }

    pub fn clear_aromatic_type(&mut self) {
        self.aromatic_type = None;
    }
}

fn check_nodes<A, B>(mol: &Mol<A, B>, nodes: &[NodeIndex]) -> Result<()> {
    if nodes.len() < 3 {
        return Err(Error::malformed_ring(format!(
            "ring has {} nodes, at least 3 required",
            nodes.len()
        )));
    }
    for (i, &node) in nodes.iter().enumerate() {
        if !mol.contains_atom(node) {
            return Err(Error::UnknownAtom(node));
        }
        if nodes[..i].contains(&node) {
            return Err(Error::malformed_ring(format!(
                "atom {} appears twice",
                node.index()
            )));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct RingInfo {
    rings: Vec<Ring>,
}

impl RingInfo {
    /// Smallest set of smallest rings.
    pub fn sssr<A, B>(mol: &Mol<A, B>) -> Self {
        let num_expected = Self::expected_ring_count(mol);
        if num_expected == 0 {
            return Self::default();
        }

        let paths = ShortestPaths::new(mol);
        let mut space = CycleSpace::new(mol.bond_count());
        let mut rings = Vec::with_capacity(num_expected);

        for cycle in horton_candidates(mol, &paths) {
            if rings.len() >= num_expected {
                break;
            }
            let Ok(ring) = Ring::from_cycle(mol, canonical_cycle(&cycle)) else {
                continue;
            };
            if space.insert(space.edge_vector(ring.connectors())) {
                rings.push(ring);
            }
        }

        rings.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.nodes.cmp(&b.nodes)));
        Self { rings }
    }

    pub fn num_rings(&self) -> usize {
        self.rings.len()
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn into_rings(self) -> Vec<Ring> {
        self.rings
    }

    pub fn is_ring_atom(&self, atom: NodeIndex) -> bool {
        self.rings.iter().any(|ring| ring.contains_atom(atom))
    }

    pub fn is_ring_bond(&self, bond: EdgeIndex) -> bool {
        self.rings.iter().any(|ring| ring.contains_bond(bond))
    }

    pub fn smallest_ring_size(&self, atom: NodeIndex) -> Option<usize> {
        self.atom_rings(atom).map(Ring::len).min()
    }

    pub fn atom_rings(&self, atom: NodeIndex) -> impl Iterator<Item = &Ring> + '_ {
        self.rings.iter().filter(move |ring| ring.contains_atom(atom))
    }

    /// Cyclomatic number: bonds − atoms + connected components.
    pub fn expected_ring_count<A, B>(mol: &Mol<A, B>) -> usize {
        let v = mol.atom_count();
        let e = mol.bond_count();
        let c = connected_components(mol.graph());
        (e + c).saturating_sub(v)
    }
}

/// BFS distances and predecessors from every atom.
struct ShortestPaths {
    dist: Vec<Vec<u32>>,
    pred: Vec<Vec<Option<NodeIndex>>>,
}

impl ShortestPaths {
    fn new<A, B>(mol: &Mol<A, B>) -> Self {
        let n = mol.atom_count();
        let mut dist = vec![vec![u32::MAX; n]; n];
        let mut pred = vec![vec![None; n]; n];
        for root in mol.atoms() {
            let (row, prow) = (&mut dist[root.index()], &mut pred[root.index()]);
            row[root.index()] = 0;
            let mut queue = VecDeque::from([root]);
            while let Some(cur) = queue.pop_front() {
                let d = row[cur.index()];
                for nb in mol.neighbors(cur) {
                    if row[nb.index()] == u32::MAX {
                        row[nb.index()] = d + 1;
                        prow[nb.index()] = Some(cur);
                        queue.push_back(nb);
                    }
                }
            }
        }
        Self { dist, pred }
    }

    fn distance(&self, from: NodeIndex, to: NodeIndex) -> Option<u32> {
        let d = self.dist[from.index()][to.index()];
        (d != u32::MAX).then_some(d)
    }

    /// Path `from ..= to`, or empty when unreachable.
    fn path(&self, from: NodeIndex, to: NodeIndex) -> Vec<NodeIndex> {
        let mut path = vec![to];
        let mut cur = to;
        while cur != from {
            match self.pred[from.index()][cur.index()] {
                Some(p) => {
                    path.push(p);
                    cur = p;
                }
                None => return Vec::new(),
            }
        }
        path.reverse();
        path
    }
}

fn horton_candidates<A, B>(mol: &Mol<A, B>, paths: &ShortestPaths) -> Vec<Vec<NodeIndex>> {
    let mut candidates: Vec<Vec<NodeIndex>> = Vec::new();

    for edge in mol.bonds() {
        let Some((u, v)) = mol.bond_endpoints(edge) else {
            continue;
        };
        for root in mol.atoms() {
            let (Some(du), Some(dv)) = (paths.distance(root, u), paths.distance(root, v)) else {
                continue;
            };
            if du + dv + 1 < 3 {
                continue;
            }
            let to_u = paths.path(root, u);
            let to_v = paths.path(root, v);
            if to_u[1..].iter().any(|node| to_v[1..].contains(node)) {
                continue;
            }
            let mut cycle = to_u;
            cycle.extend(to_v[1..].iter().rev());
            candidates.push(cycle);
        }
    }

    candidates.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    candidates.dedup();
    candidates
}

/// Rotate a cycle to start at its smallest atom and walk towards the smaller
/// neighbor, so that equal cycles compare equal.
fn canonical_cycle(cycle: &[NodeIndex]) -> Vec<NodeIndex> {
    let len = cycle.len();
    let Some(start) = (0..len).min_by_key(|&i| cycle[i]) else {
        return Vec::new();
    };
    let mut result: Vec<NodeIndex> = (0..len).map(|i| cycle[(start + i) % len]).collect();
    if len > 2 && result[1] > result[len - 1] {
        result[1..].reverse();
    }
    result
}

/// Incremental GF(2) row echelon basis over bond bit vectors.
struct CycleSpace {
    words: usize,
    rows: Vec<(usize, Vec<u64>)>,
}

impl CycleSpace {
    fn new(num_bonds: usize) -> Self {
        Self {
            words: num_bonds.div_ceil(64),
            rows: Vec::new(),
        }
    }

    fn edge_vector(&self, bonds: &[EdgeIndex]) -> Vec<u64> {
        let mut v = vec![0u64; self.words];
        for bond in bonds {
            let i = bond.index();
            v[i / 64] |= 1u64 << (i % 64);
        }
        v
    }

    /// Add `v` to the basis unless it is a combination of existing rows.
    fn insert(&mut self, mut v: Vec<u64>) -> bool {
        for (pivot, row) in &self.rows {
            if v[pivot / 64] & (1u64 << (pivot % 64)) != 0 {
                for (a, b) in v.iter_mut().zip(row) {
                    *a ^= *b;
                }
            }
        }
        let pivot = v
            .iter()
            .enumerate()
            .find(|(_, w)| **w != 0)
            .map(|(i, w)| i * 64 + w.trailing_zeros() as usize);
        match pivot {
            Some(p) => {
                self.rows.push((p, v));
                true
            }
            None => false,
        }
    }
}
