//! Aromaticity perception by π-electron counting and Hückel's rule.
//!
//! Each ring atom gets a π estimate ([`estimate_pi_electrons`]), possibly a
//! set of values when the atom is ambiguous. [`classify_ring`] enumerates the
//! combinations and applies Hückel's rule. [`perceive_aromatic_rings`] runs
//! this over a ring set, persists each ring's type and memoizes the π counts
//! of aromatic ring atoms in the molecule's structure cache.

mod classify;
mod pi;

use std::collections::HashSet;

use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::Result;
use crate::mol::Mol;
use crate::rings::{Ring, RingInfo};
use crate::traits::{PiAtom, PiBond};

pub use classify::{classify_ring, huckel_verdict, PiElectronMap, RingClassification};
pub use pi::{
    estimate_pi_electrons, is_ester_carbon, is_sulfone_or_sulfoxide_sulfur, PiContext,
    PiElectrons, PiEstimate,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum AromaticType {
    NonAromatic = 0,
    ExplicitAromatic = 1,
    AntiAromatic = -1,
    /// Aromatic for some readings of an ambiguous atom and not for others.
    Uncertain = 64,
}

impl AromaticType {
    pub fn code(self) -> i8 {
        self as i8
    }

    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            0 => Some(AromaticType::NonAromatic),
            1 => Some(AromaticType::ExplicitAromatic),
            -1 => Some(AromaticType::AntiAromatic),
            64 => Some(AromaticType::Uncertain),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionOptions {
    /// Also report rings classified [`AromaticType::Uncertain`].
    pub allow_uncertain_rings: bool,
}

/// Classify a ring set and return the aromatic rings.
///
/// Without `candidate_rings` the molecule's SSSR is used, taken from the
/// structure cache or computed and cached there. Rings that already carry an
/// aromatic type keep it. Atoms of newly found aromatic rings get their π
/// count memoized; an atom shared by two rings keeps the first count written.
///
/// Every candidate ring is validated before anything is classified.
pub fn perceive_aromatic_rings<A, B>(
    mol: &mut Mol<A, B>,
    options: &PerceptionOptions,
    candidate_rings: Option<&mut [Ring]>,
) -> Result<Vec<Ring>>
where
    A: PiAtom,
    B: PiBond,
{
    let aromatic = match candidate_rings {
        Some(rings) => {
            for ring in rings.iter() {
                ring.validate(mol)?;
            }
            perceive_in(mol, rings, options)
        }
        None => {
            let mut rings = match mol.structure_cache_mut().take_sssr() {
                Some(rings) => rings,
                None => RingInfo::sssr(mol).into_rings(),
            };
            let aromatic = perceive_in(mol, &mut rings, options);
            mol.structure_cache_mut().set_sssr(rings);
            aromatic
        }
    };
    debug!(aromatic = aromatic.len(), "perceived aromatic rings");
    mol.structure_cache_mut().set_aromatic_rings(aromatic.clone());
    Ok(aromatic)
}

/// Classify a single ring without touching the molecule.
///
/// Only the ring's own atoms are estimated, but the connectors of every ring
/// in `ref_rings` (the cached or freshly computed SSSR by default) count as
/// ring bonds, so a double bond shared with a fused ring is not mistaken for
/// an exocyclic one.
pub fn ring_aromatic_type<A, B>(
    mol: &Mol<A, B>,
    ring: &Ring,
    ref_rings: Option<&[Ring]>,
) -> Result<AromaticType>
where
    A: PiAtom,
    B: PiBond,
{
    ring.validate(mol)?;
    let computed;
    let refs = match ref_rings.or_else(|| mol.structure_cache().sssr()) {
        Some(refs) => refs,
        None => {
            computed = RingInfo::sssr(mol).into_rings();
            &computed
        }
    };
    for r in refs {
        r.validate(mol)?;
    }
    let mut ring_bonds = ring_bond_set(refs);
    ring_bonds.extend(ring.connectors().iter().copied());
    let electrons = electron_map(mol, ring.nodes().iter().copied(), &ring_bonds);
    Ok(classify_ring(ring.nodes(), &electrons).aromatic_type)
}

fn perceive_in<A, B>(
    mol: &mut Mol<A, B>,
    rings: &mut [Ring],
    options: &PerceptionOptions,
) -> Vec<Ring>
where
    A: PiAtom,
    B: PiBond,
{
    let ring_bonds = ring_bond_set(rings);
    let atoms: HashSet<NodeIndex> = rings.iter().flat_map(|r| r.nodes().iter().copied()).collect();
    let electrons = electron_map(mol, atoms, &ring_bonds);

    let mut aromatic = Vec::new();
    for ring in rings.iter_mut() {
        let aromatic_type = match ring.aromatic_type() {
            Some(cached) => cached,
            None => {
                let result = classify_ring(ring.nodes(), &electrons);
                if let Some(assignment) = result.assignment {
                    let cache = mol.structure_cache_mut();
                    for (atom, count) in assignment {
                        cache.remember_pi_electrons(atom, count);
                    }
                }
                ring.set_aromatic_type(result.aromatic_type);
                result.aromatic_type
            }
        };
        trace!(size = ring.len(), ?aromatic_type, "classified ring");
        let keep = match aromatic_type {
            AromaticType::ExplicitAromatic => true,
            AromaticType::Uncertain => options.allow_uncertain_rings,
            _ => false,
        };
        if keep {
            aromatic.push(ring.clone());
        }
    }
    aromatic
}

fn ring_bond_set(rings: &[Ring]) -> HashSet<EdgeIndex> {
    rings
        .iter()
        .flat_map(|r| r.connectors().iter().copied())
        .collect()
}

/// π estimates for `atoms`, preferring counts memoized by earlier perceptions.
fn electron_map<A, B>(
    mol: &Mol<A, B>,
    atoms: impl IntoIterator<Item = NodeIndex>,
    ring_bonds: &HashSet<EdgeIndex>,
) -> PiElectronMap
where
    A: PiAtom,
    B: PiBond,
{
    let ctx = PiContext::new(ring_bonds);
    atoms
        .into_iter()
        .map(|atom| {
            let estimate = match mol.structure_cache().pi_electrons(atom) {
                Some(count) => PiEstimate::count(count),
                None => estimate_pi_electrons(mol, atom, &ctx),
            };
            (atom, estimate)
        })
        .collect()
}
