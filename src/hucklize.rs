//! Kekulé bond orders to the symbolic aromatic order.

use std::collections::HashSet;

use petgraph::graph::EdgeIndex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aromaticity::{perceive_aromatic_rings, PerceptionOptions};
use crate::bond::{BondOrder, BondOrderChange, BondType};
use crate::error::{Error, Result};
use crate::mol::Mol;
use crate::traits::{HasBondOrderMut, PiAtom, PiBond};

pub type HucklizationChange = BondOrderChange;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HucklizeOptions {
    /// Also hucklize rings perceived as uncertain.
    pub allow_uncertain_rings: bool,
    /// Consider bonds touching sub-fragment atoms.
    pub include_sub_fragments: bool,
}

impl Default for HucklizeOptions {
    fn default() -> Self {
        Self {
            allow_uncertain_rings: false,
            include_sub_fragments: true,
        }
    }
}

/// Bonds of aromatic rings that would become [`BondOrder::Aromatic`].
///
/// Only covalent single and double ring bonds change. With `target_bonds`
/// the result is restricted to those bonds. Perception results are cached
/// on the molecule; bond orders are left alone.
pub fn hucklization_changes<A, B>(
    mol: &mut Mol<A, B>,
    target_bonds: Option<&[EdgeIndex]>,
    options: &HucklizeOptions,
) -> Result<Vec<HucklizationChange>>
where
    A: PiAtom,
    B: PiBond,
{
    let targets = target_set(mol, target_bonds)?;
    let perception = PerceptionOptions {
        allow_uncertain_rings: options.allow_uncertain_rings,
    };
    let rings = perceive_aromatic_rings(mol, &perception, None)?;

    let mut seen = HashSet::new();
    let mut changes = Vec::new();
    for bond in rings.iter().flat_map(|r| r.connectors().iter().copied()) {
        if !seen.insert(bond) {
            continue;
        }
        if targets.as_ref().is_some_and(|t| !t.contains(&bond)) {
            continue;
        }
        if !options.include_sub_fragments && mol.touches_sub_fragment(bond) {
            continue;
        }
        let payload = mol.bond(bond);
        if payload.bond_type() != BondType::Covalent {
            continue;
        }
        if matches!(payload.bond_order(), BondOrder::Single | BondOrder::Double) {
            changes.push(BondOrderChange {
                bond,
                new_order: BondOrder::Aromatic,
            });
        }
    }
    Ok(changes)
}

/// Apply [`hucklization_changes`] in one update and return the changed bonds.
pub fn hucklize<A, B>(
    mol: &mut Mol<A, B>,
    target_bonds: Option<&[EdgeIndex]>,
    options: &HucklizeOptions,
) -> Result<Vec<EdgeIndex>>
where
    A: PiAtom,
    B: PiBond + HasBondOrderMut,
{
    let changes = hucklization_changes(mol, target_bonds, options)?;
    let mut scope = mol.update_scope();
    for change in &changes {
        scope.set_bond_order(change.bond, change.new_order);
    }
    debug!(bonds = changes.len(), "hucklized");
    Ok(changes.into_iter().map(|c| c.bond).collect())
}

/// Validated target bond set; `None` means every bond.
pub(crate) fn target_set<A, B>(
    mol: &Mol<A, B>,
    target_bonds: Option<&[EdgeIndex]>,
) -> Result<Option<HashSet<EdgeIndex>>> {
    let Some(bonds) = target_bonds else {
        return Ok(None);
    };
    if let Some(&unknown) = bonds.iter().find(|&&e| !mol.contains_bond(e)) {
        return Err(Error::UnknownBond(unknown));
    }
    Ok(Some(bonds.iter().copied().collect()))
}
