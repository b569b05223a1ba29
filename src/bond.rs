use petgraph::graph::EdgeIndex;
use serde::{Deserialize, Serialize};

/// Bond order. `Aromatic` is the symbolic order of a hucklized bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Quad,
    Aromatic,
}

impl BondOrder {
    /// Orders that make an atom unsaturated.
    pub fn is_multiple(self) -> bool {
        !matches!(self, BondOrder::Single)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BondType {
    #[default]
    Covalent,
    Ionic,
    Coordinate,
    Hydrogen,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bond {
    pub order: BondOrder,
    pub kind: BondType,
}

impl Bond {
    pub fn new(order: BondOrder) -> Self {
        Self {
            order,
            kind: BondType::Covalent,
        }
    }
}

/// A pending bond-order edit computed by kekulization or hucklization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BondOrderChange {
    pub bond: EdgeIndex,
    pub new_order: BondOrder,
}

impl crate::traits::HasBondOrder for Bond {
    fn bond_order(&self) -> BondOrder {
        self.order
    }
}

impl crate::traits::HasBondOrderMut for Bond {
    fn set_bond_order(&mut self, order: BondOrder) {
        self.order = order;
    }
}

impl crate::traits::HasBondType for Bond {
    fn bond_type(&self) -> BondType {
        self.kind
    }
}
