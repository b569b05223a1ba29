mod common;

use huckel::{
    hucklization_changes, hucklize, kekulization_changes, kekulize, perceive_aromatic_rings,
    BondOrder, HucklizeOptions, KekulizeOptions, PerceptionOptions,
};
use proptest::prelude::*;

use common::{acene, carbocycle, count_orders, is_valid_kekule};

proptest! {
    #[test]
    fn even_carbocycles_kekulize(half in 2usize..12) {
        let size = half * 2;
        let mut mol = carbocycle(size, BondOrder::Aromatic);
        let changed = kekulize(&mut mol, None, &KekulizeOptions::default()).unwrap();
        prop_assert_eq!(changed.len(), size);
        prop_assert_eq!(count_orders(&mol, BondOrder::Double), half);
        prop_assert!(is_valid_kekule(&mol));
    }

    #[test]
    fn odd_carbocycles_stay_aromatic(half in 1usize..12) {
        let size = half * 2 + 1;
        let mut mol = carbocycle(size, BondOrder::Aromatic);
        let changed = kekulize(&mut mol, None, &KekulizeOptions::default()).unwrap();
        prop_assert!(changed.is_empty());
        prop_assert_eq!(count_orders(&mol, BondOrder::Aromatic), size);
    }

    #[test]
    fn acenes_kekulize_and_round_trip(rings in 1usize..7, use_shadow in any::<bool>()) {
        let mut mol = acene(rings);
        let bonds = mol.bond_count();
        let options = KekulizeOptions { use_shadow, ..KekulizeOptions::default() };
        kekulize(&mut mol, None, &options).unwrap();
        prop_assert_eq!(count_orders(&mol, BondOrder::Double), mol.atom_count() / 2);
        prop_assert!(is_valid_kekule(&mol));

        hucklize(&mut mol, None, &HucklizeOptions::default()).unwrap();
        prop_assert_eq!(count_orders(&mol, BondOrder::Aromatic), bonds);
    }

    #[test]
    fn second_pass_changes_nothing(rings in 1usize..5) {
        let mut mol = acene(rings);
        kekulize(&mut mol, None, &KekulizeOptions::default()).unwrap();
        prop_assert!(kekulization_changes(&mut mol, None, &KekulizeOptions::default())
            .unwrap()
            .is_empty());

        hucklize(&mut mol, None, &HucklizeOptions::default()).unwrap();
        prop_assert!(hucklization_changes(&mut mol, None, &HucklizeOptions::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn perception_is_idempotent(rings in 1usize..6, kekule in any::<bool>()) {
        let mut mol = acene(rings);
        if kekule {
            kekulize(&mut mol, None, &KekulizeOptions::default()).unwrap();
        }
        let orders: Vec<BondOrder> = mol.bonds().map(|e| mol.bond(e).order).collect();
        let revision = mol.revision();
        let options = PerceptionOptions { allow_uncertain_rings: true };

        let first = perceive_aromatic_rings(&mut mol, &options, None).unwrap();
        let second = perceive_aromatic_rings(&mut mol, &options, None).unwrap();
        prop_assert_eq!(&first, &second);
        if kekule {
            prop_assert_eq!(first.len(), rings);
        }
        let after: Vec<BondOrder> = mol.bonds().map(|e| mol.bond(e).order).collect();
        prop_assert_eq!(after, orders);
        prop_assert_eq!(mol.revision(), revision);
    }

    #[test]
    fn kekulization_is_deterministic(half in 2usize..8) {
        let first = {
            let mut mol = carbocycle(half * 2, BondOrder::Aromatic);
            kekulization_changes(&mut mol, None, &KekulizeOptions::default()).unwrap()
        };
        let mut mol = carbocycle(half * 2, BondOrder::Aromatic);
        let second = kekulization_changes(&mut mol, None, &KekulizeOptions::default()).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn ten_ring_double_first_tie_break() {
    let mut mol = carbocycle(10, BondOrder::Aromatic);
    kekulize(&mut mol, None, &KekulizeOptions::default()).unwrap();
    let first = mol.bonds().next().unwrap();
    assert_eq!(mol.bond(first).order, BondOrder::Double);
}
