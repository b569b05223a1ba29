//! Hückel classification of one ring from per-atom π estimates.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;

use super::pi::{PiElectrons, PiEstimate};
use super::AromaticType;

/// Per-atom π estimates shared by every ring of one perception.
pub type PiElectronMap = HashMap<NodeIndex, PiEstimate>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingClassification {
    pub aromatic_type: AromaticType,
    /// π count per ring atom, set only for `ExplicitAromatic` rings. For an
    /// uncertain atom this is the first choice that made the ring aromatic.
    pub assignment: Option<Vec<(NodeIndex, u8)>>,
}

/// Hückel verdict for a total π count, if there is one.
///
/// `4n + 2` is aromatic and `4n` antiaromatic for `n <= 5`, except `n == 2`:
/// a 10-electron ring is left without a verdict.
pub fn huckel_verdict(pi_total: u32) -> Option<AromaticType> {
    let q = pi_total / 4;
    let r = pi_total % 4;
    if q > 5 || q == 2 {
        return None;
    }
    match r {
        2 => Some(AromaticType::ExplicitAromatic),
        0 => Some(AromaticType::AntiAromatic),
        _ => None,
    }
}

/// Classify `nodes` by enumerating every combination of their π choices.
///
/// A combination containing a sentinel is nonaromatic; otherwise Hückel's
/// rule decides, possibly with no verdict. If one combination is aromatic
/// and another disagrees (no verdict included), the ring is `Uncertain`.
/// Otherwise the first verdict wins, and a ring with no verdict at all is
/// nonaromatic. The result does not depend on the order of the choices.
/// An empty node list is nonaromatic.
pub fn classify_ring(nodes: &[NodeIndex], electrons: &PiElectronMap) -> RingClassification {
    let unknown = PiEstimate::unknown();
    let choices: Vec<&[PiElectrons]> = nodes
        .iter()
        .map(|n| electrons.get(n).unwrap_or(&unknown).choices())
        .collect();

    if choices.is_empty() || choices.iter().any(|c| c.is_empty()) {
        return RingClassification {
            aromatic_type: AromaticType::NonAromatic,
            assignment: None,
        };
    }

    let mut odometer = vec![0usize; nodes.len()];
    let mut first_outcome: Option<Option<AromaticType>> = None;
    let mut first_verdict: Option<AromaticType> = None;
    let mut disagreement = false;
    let mut aromatic_assignment: Option<Vec<(NodeIndex, u8)>> = None;

    loop {
        let outcome = combination_verdict(&choices, &odometer);

        match first_outcome {
            None => first_outcome = Some(outcome),
            Some(first) if first != outcome => disagreement = true,
            Some(_) => {}
        }
        if first_verdict.is_none() {
            first_verdict = outcome;
        }
        if outcome == Some(AromaticType::ExplicitAromatic) && aromatic_assignment.is_none() {
            aromatic_assignment = Some(
                nodes
                    .iter()
                    .zip(&odometer)
                    .zip(&choices)
                    .filter_map(|((&node, &i), c)| c[i].count().map(|n| (node, n)))
                    .collect(),
            );
        }
        if disagreement && aromatic_assignment.is_some() {
            return RingClassification {
                aromatic_type: AromaticType::Uncertain,
                assignment: None,
            };
        }

        if !advance(&mut odometer, &choices) {
            break;
        }
    }

    let aromatic_type = first_verdict.unwrap_or(AromaticType::NonAromatic);
    RingClassification {
        aromatic_type,
        assignment: if aromatic_type == AromaticType::ExplicitAromatic {
            aromatic_assignment
        } else {
            None
        },
    }
}

fn combination_verdict(choices: &[&[PiElectrons]], odometer: &[usize]) -> Option<AromaticType> {
    let mut total = 0u32;
    for (c, &i) in choices.iter().zip(odometer) {
        match c[i].count() {
            Some(n) => total += u32::from(n),
            None => return Some(AromaticType::NonAromatic),
        }
    }
    huckel_verdict(total)
}

/// Step to the next combination; `false` once every one has been visited.
fn advance(odometer: &mut [usize], choices: &[&[PiElectrons]]) -> bool {
    for (digit, c) in odometer.iter_mut().zip(choices) {
        *digit += 1;
        if *digit < c.len() {
            return true;
        }
        *digit = 0;
    }
    false
}
