//! Kekulization assigns concrete single and double bonds to aromatic bonds.
//!
//! Candidate bonds (covalent bonds of order [`BondOrder::Aromatic`]) are
//! split into components that share no atom ([`aromatic_components`]). Each
//! component is solved on its own by a backtracking search over bond orders,
//! checked atom by atom against the π-electron estimator. A component is
//! committed only when every one of its bonds is resolved; an infeasible
//! component keeps its aromatic bonds and never blocks the others.
//!
//! With [`KekulizeOptions::use_shadow`] each component is solved on a
//! [`ShadowFragment`] copy and the original molecule is left untouched.

mod demand;
mod partition;
mod solver;

use std::collections::{HashMap, HashSet};

use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aromaticity::{perceive_aromatic_rings, PerceptionOptions};
use crate::bond::{BondOrder, BondOrderChange, BondType};
use crate::error::Result;
use crate::hucklize::target_set;
use crate::mol::Mol;
use crate::shadow::ShadowFragment;
use crate::traits::{HasBondOrderMut, PiAtom, PiBond};

pub use demand::Demand;
pub use partition::aromatic_components;

use demand::seed_demands;
use solver::{solve_component, Solution};

pub type KekulizationChange = BondOrderChange;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KekulizeOptions {
    /// Only kekulize bonds of rings perceived aromatic or uncertain, seeding
    /// atom demands from the perceived π counts.
    pub do_aromatic_tests: bool,
    /// Consider bonds touching sub-fragment atoms.
    pub include_sub_fragments: bool,
    /// Consider bonds inside collapsed sub-fragments.
    pub expand_sub_fragments: bool,
    /// Solve on a detached copy instead of the molecule itself.
    pub use_shadow: bool,
    /// Search steps allowed per component.
    pub max_steps: usize,
}

impl Default for KekulizeOptions {
    fn default() -> Self {
        Self {
            do_aromatic_tests: false,
            include_sub_fragments: true,
            expand_sub_fragments: true,
            use_shadow: false,
            max_steps: 1_000_000,
        }
    }
}

/// Aromatic bonds that would become single or double.
///
/// Bonds of components without a valid Kekulé form are absent from the
/// result. Bonds already assigned their final order are absent too, so a
/// bond that stays [`BondOrder::Aromatic`] never appears. Bond orders are
/// left alone; perception results may be cached on the molecule.
pub fn kekulization_changes<A, B>(
    mol: &mut Mol<A, B>,
    target_bonds: Option<&[EdgeIndex]>,
    options: &KekulizeOptions,
) -> Result<Vec<KekulizationChange>>
where
    A: PiAtom + Clone,
    B: PiBond + HasBondOrderMut + Clone,
{
    let targets = target_set(mol, target_bonds)?;

    let ring_bonds = if options.do_aromatic_tests {
        let perception = PerceptionOptions {
            allow_uncertain_rings: true,
        };
        let rings = perceive_aromatic_rings(mol, &perception, None)?;
        Some(
            rings
                .iter()
                .flat_map(|r| r.connectors().iter().copied())
                .collect::<HashSet<_>>(),
        )
    } else {
        None
    };
    let memo = mol.structure_cache().pi_electron_map().clone();

    let candidates: Vec<EdgeIndex> = mol
        .bonds()
        .filter(|&e| {
            let bond = mol.bond(e);
            bond.bond_type() == BondType::Covalent && bond.bond_order() == BondOrder::Aromatic
        })
        .filter(|e| targets.as_ref().map_or(true, |t| t.contains(e)))
        .filter(|e| ring_bonds.as_ref().map_or(true, |r| r.contains(e)))
        .filter(|&e| options.include_sub_fragments || !mol.touches_sub_fragment(e))
        .filter(|&e| options.expand_sub_fragments || !mol.in_collapsed_sub_fragment(e))
        .collect();

    let components = aromatic_components(mol, &candidates);
    let mut changes = Vec::new();
    let mut failed = 0;
    for component in &components {
        let solved = if options.use_shadow {
            solve_in_shadow(mol, component, &memo, options.max_steps)
        } else {
            solve_in_place(mol, component, &memo, options.max_steps)
        };
        match solved {
            Some(found) => changes.extend(found),
            None => failed += 1,
        }
    }
    debug!(
        components = components.len(),
        failed,
        bonds = changes.len(),
        "kekulization computed"
    );
    Ok(changes)
}

/// Apply [`kekulization_changes`] in one update and return the changed bonds.
pub fn kekulize<A, B>(
    mol: &mut Mol<A, B>,
    target_bonds: Option<&[EdgeIndex]>,
    options: &KekulizeOptions,
) -> Result<Vec<EdgeIndex>>
where
    A: PiAtom + Clone,
    B: PiBond + HasBondOrderMut + Clone,
{
    let changes = kekulization_changes(mol, target_bonds, options)?;
    let mut scope = mol.update_scope();
    for change in &changes {
        scope.set_bond_order(change.bond, change.new_order);
    }
    debug!(bonds = changes.len(), "kekulized");
    Ok(changes.into_iter().map(|c| c.bond).collect())
}

fn component_atoms<A, B>(mol: &Mol<A, B>, component: &[EdgeIndex]) -> Vec<NodeIndex> {
    let mut atoms: Vec<NodeIndex> = component
        .iter()
        .filter_map(|&e| mol.bond_endpoints(e))
        .flat_map(|(a, b)| [a, b])
        .collect();
    atoms.sort();
    atoms.dedup();
    atoms
}

fn solve_in_place<A, B>(
    mol: &Mol<A, B>,
    component: &[EdgeIndex],
    memo: &HashMap<NodeIndex, u8>,
    max_steps: usize,
) -> Option<Vec<KekulizationChange>>
where
    A: PiAtom,
    B: PiBond,
{
    let demands = seed_demands(mol, component_atoms(mol, component), memo);
    let assignment = settle(solve_component(mol, component, &demands, max_steps), component)?;
    Some(
        assignment
            .into_iter()
            .filter(|&(bond, order)| mol.bond(bond).bond_order() != order)
            .map(|(bond, new_order)| BondOrderChange { bond, new_order })
            .collect(),
    )
}

/// Solve on a copy of the component atoms and their first neighbors, commit
/// there, then diff the copy against its starting orders and map back.
fn solve_in_shadow<A, B>(
    mol: &Mol<A, B>,
    component: &[EdgeIndex],
    memo: &HashMap<NodeIndex, u8>,
    max_steps: usize,
) -> Option<Vec<KekulizationChange>>
where
    A: PiAtom + Clone,
    B: PiBond + HasBondOrderMut + Clone,
{
    let atoms = component_atoms(mol, component);
    let demands = seed_demands(mol, atoms.iter().copied(), memo);
    let mut context = atoms.clone();
    context.extend(atoms.iter().flat_map(|&a| mol.neighbors(a)));
    // Every atom passed in comes from the molecule itself.
    let mut shadow = ShadowFragment::new(mol, context).ok()?;

    let shadow_bonds: Vec<EdgeIndex> = component
        .iter()
        .filter_map(|&e| shadow.to_shadow_bond(e))
        .collect();
    let shadow_demands: HashMap<NodeIndex, Demand> = demands
        .into_iter()
        .filter_map(|(atom, demand)| Some((shadow.to_shadow_atom(atom)?, demand)))
        .collect();
    let solution = solve_component(shadow.mol(), &shadow_bonds, &shadow_demands, max_steps);
    let assignment = settle(solution, component)?;

    let before: Vec<BondOrder> = shadow_bonds
        .iter()
        .map(|&e| shadow.mol().bond(e).bond_order())
        .collect();
    {
        let mut scope = shadow.mol_mut().update_scope();
        for &(bond, order) in &assignment {
            scope.set_bond_order(bond, order);
        }
    }
    Some(
        shadow_bonds
            .iter()
            .zip(before)
            .filter_map(|(&e, old)| {
                let new_order = shadow.mol().bond(e).bond_order();
                if new_order == old {
                    return None;
                }
                Some(BondOrderChange {
                    bond: shadow.to_original_bond(e)?,
                    new_order,
                })
            })
            .collect(),
    )
}

fn settle(solution: Solution, component: &[EdgeIndex]) -> Option<Vec<(EdgeIndex, BondOrder)>> {
    match solution {
        Solution::Solved(assignment) => Some(assignment),
        Solution::Infeasible => {
            debug!(bonds = component.len(), "no kekule form for component");
            None
        }
        Solution::Exhausted => {
            warn!(
                bonds = component.len(),
                "kekulization search budget exhausted"
            );
            None
        }
    }
}
