//! Depth-first search for a Kekulé assignment of one aromatic component.
//!
//! Bonds are assigned in component order. Every tentative assignment is
//! recorded in a journal and mirrored into a bond-order overlay, so the π
//! estimator sees the partial structure without the molecule being touched.
//! After each step both endpoints are checked; a failed check undoes the
//! step and tries the next candidate order, backtracking when none is left.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{EdgeIndex, NodeIndex};

use super::demand::Demand;
use crate::aromaticity::{estimate_pi_electrons, PiContext, PiElectrons};
use crate::bond::{BondOrder, BondType};
use crate::mol::Mol;
use crate::traits::{PiAtom, PiBond};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solution {
    /// New order for every bond of the component, in component order.
    Solved(Vec<(EdgeIndex, BondOrder)>),
    Infeasible,
    /// The step budget ran out before the search finished.
    Exhausted,
}

const DOUBLE_FIRST: &[BondOrder] = &[BondOrder::Double, BondOrder::Single];
const ONLY_SINGLE: &[BondOrder] = &[BondOrder::Single];
const ONLY_DOUBLE: &[BondOrder] = &[BondOrder::Double];

pub fn solve_component<A, B>(
    mol: &Mol<A, B>,
    bonds: &[EdgeIndex],
    demands: &HashMap<NodeIndex, Demand>,
    max_steps: usize,
) -> Solution
where
    A: PiAtom,
    B: PiBond,
{
    let Some(mut search) = Search::new(mol, bonds, demands, max_steps) else {
        return Solution::Infeasible;
    };
    search.run()
}

struct Frame {
    index: usize,
    candidates: &'static [BondOrder],
    next: usize,
}

struct Search<'m, A, B> {
    mol: &'m Mol<A, B>,
    bonds: &'m [EdgeIndex],
    ends: Vec<(NodeIndex, NodeIndex)>,
    demands: &'m HashMap<NodeIndex, Demand>,
    ring_bonds: HashSet<EdgeIndex>,
    journal: Vec<Option<BondOrder>>,
    overlay: HashMap<EdgeIndex, BondOrder>,
    open: HashMap<NodeIndex, usize>,
    doubles: HashMap<NodeIndex, usize>,
    /// Atoms with a double, triple or quadruple bond outside the component.
    exocyclic: HashSet<NodeIndex>,
    steps: usize,
    max_steps: usize,
}

impl<'m, A, B> Search<'m, A, B>
where
    A: PiAtom,
    B: PiBond,
{
    fn new(
        mol: &'m Mol<A, B>,
        bonds: &'m [EdgeIndex],
        demands: &'m HashMap<NodeIndex, Demand>,
        max_steps: usize,
    ) -> Option<Self> {
        let ends = bonds
            .iter()
            .map(|&e| mol.bond_endpoints(e))
            .collect::<Option<Vec<_>>>()?;
        let ring_bonds: HashSet<EdgeIndex> = bonds.iter().copied().collect();

        let mut open: HashMap<NodeIndex, usize> = HashMap::new();
        for &(a, b) in &ends {
            *open.entry(a).or_default() += 1;
            *open.entry(b).or_default() += 1;
        }
        let exocyclic = open
            .keys()
            .copied()
            .filter(|&atom| {
                mol.bonds_of(atom).any(|e| {
                    let bond = mol.bond(e);
                    !ring_bonds.contains(&e)
                        && bond.bond_type() == BondType::Covalent
                        && matches!(
                            bond.bond_order(),
                            BondOrder::Double | BondOrder::Triple | BondOrder::Quad
                        )
                })
            })
            .collect();

        Some(Self {
            mol,
            bonds,
            ends,
            demands,
            overlay: bonds.iter().map(|&e| (e, BondOrder::Single)).collect(),
            ring_bonds,
            journal: vec![None; bonds.len()],
            doubles: open.keys().map(|&a| (a, 0)).collect(),
            open,
            exocyclic,
            steps: 0,
            max_steps,
        })
    }

    fn run(&mut self) -> Solution {
        if self.bonds.is_empty() {
            return Solution::Solved(Vec::new());
        }
        let mut frames = vec![self.frame(0)];
        while let Some(frame) = frames.last_mut() {
            if frame.next == frame.candidates.len() {
                frames.pop();
                if let Some(parent) = frames.last() {
                    self.unassign(parent.index);
                }
                continue;
            }
            let index = frame.index;
            let order = frame.candidates[frame.next];
            frame.next += 1;

            self.steps += 1;
            if self.steps > self.max_steps {
                return Solution::Exhausted;
            }
            if !self.assign(index, order) {
                self.unassign(index);
                continue;
            }
            if index + 1 == self.bonds.len() {
                return Solution::Solved(self.assignment());
            }
            frames.push(self.frame(index + 1));
        }
        Solution::Infeasible
    }

    fn frame(&self, index: usize) -> Frame {
        Frame {
            index,
            candidates: self.candidates(index),
            next: 0,
        }
    }

    fn candidates(&self, index: usize) -> &'static [BondOrder] {
        let (a, b) = self.ends[index];
        let blocked = |x: NodeIndex| {
            self.doubles[&x] > 0
                || self.exocyclic.contains(&x)
                || self.demand(x) == Demand::Independent
        };
        if blocked(a) || blocked(b) {
            return ONLY_SINGLE;
        }
        // The endpoint's last chance at its one double bond.
        let last_chance =
            |x: NodeIndex| self.demand(x) == Demand::NeedsDouble && self.open[&x] == 1;
        if last_chance(a) || last_chance(b) {
            ONLY_DOUBLE
        } else {
            DOUBLE_FIRST
        }
    }

    fn demand(&self, atom: NodeIndex) -> Demand {
        self.demands.get(&atom).copied().unwrap_or(Demand::Open)
    }

    fn assign(&mut self, index: usize, order: BondOrder) -> bool {
        let (a, b) = self.ends[index];
        self.journal[index] = Some(order);
        self.overlay.insert(self.bonds[index], order);
        for x in [a, b] {
            *self.open.entry(x).or_default() -= 1;
            if order == BondOrder::Double {
                *self.doubles.entry(x).or_default() += 1;
            }
        }
        self.consistent(a) && self.consistent(b)
    }

    fn unassign(&mut self, index: usize) {
        let Some(order) = self.journal[index].take() else {
            return;
        };
        let (a, b) = self.ends[index];
        self.overlay.insert(self.bonds[index], BondOrder::Single);
        for x in [a, b] {
            *self.open.entry(x).or_default() += 1;
            if order == BondOrder::Double {
                *self.doubles.entry(x).or_default() -= 1;
            }
        }
    }

    fn consistent(&self, atom: NodeIndex) -> bool {
        let doubles = self.doubles[&atom];
        let open = self.open[&atom];
        if doubles > 1 || (doubles == 1 && self.exocyclic.contains(&atom)) {
            return false;
        }
        match self.demand(atom) {
            Demand::NeedsDouble if open == 0 && doubles == 0 => return false,
            Demand::Independent if doubles > 0 => return false,
            _ => {}
        }
        if doubles == 0 && open > 0 {
            return true;
        }
        let ctx = PiContext::new(&self.ring_bonds).with_orders(&self.overlay);
        estimate_pi_electrons(self.mol, atom, &ctx)
            .choices()
            .iter()
            .any(|&choice| accepts(choice, doubles))
    }

    fn assignment(&self) -> Vec<(EdgeIndex, BondOrder)> {
        self.bonds
            .iter()
            .zip(&self.journal)
            .map(|(&bond, order)| (bond, order.unwrap_or(BondOrder::Single)))
            .collect()
    }
}

/// Whether an atom with `doubles` ring double bonds may contribute `choice`.
fn accepts(choice: PiElectrons, doubles: usize) -> bool {
    match choice {
        PiElectrons::Count(n) => doubles == 0 || n == 1,
        PiElectrons::EsterCarbon | PiElectrons::SulfoneOrSulfoxideSulfur => doubles == 0,
        PiElectrons::SaturatedCarbon | PiElectrons::Impossible => false,
    }
}
