use alloc::vec::Vec;

use crate::cost::{Cost, CostVector};
use crate::tree::NodeId;

use super::event::{classify_event, Event};
use super::input::{Reconciliation, ReconciliationInput};

/// Total cost of the part of a reconciliation below `gene` (inclusive).
///
/// Each node of the subtree is evaluated once, children first. An invalid
/// event anywhere in the subtree makes the cost infinite.
pub fn evaluate_cost(
    input: &ReconciliationInput<'_>,
    rec: &Reconciliation,
    costs: &CostVector,
    gene: NodeId,
) -> Cost {
    let mut memo: Vec<Cost> = alloc::vec![Cost::INFINITE; input.gene_tree.len()];

    for &node in input.gene_tree.subtree(gene).iter().rev() {
        memo[node as usize] = node_cost(input, rec, costs, node, &memo);
    }

    memo[gene as usize]
}

/// Total cost of a full reconciliation of the gene tree.
pub fn reconciliation_cost(
    input: &ReconciliationInput<'_>,
    rec: &Reconciliation,
    costs: &CostVector,
) -> Cost {
    evaluate_cost(input, rec, costs, input.gene_tree.root())
}

/// Cost of `gene`'s event plus its children's already-evaluated costs.
fn node_cost(
    input: &ReconciliationInput<'_>,
    rec: &Reconciliation,
    costs: &CostVector,
    gene: NodeId,
    memo: &[Cost],
) -> Cost {
    let event = classify_event(input, rec, gene);
    let (left_gene, right_gene) = match event {
        Event::Invalid => return Cost::INFINITE,
        Event::Leaf => return Cost::ZERO,
        _ => match input.gene_children(gene) {
            Some(children) => children,
            None => return Cost::INFINITE,
        },
    };

    // Valid internal events have all three images.
    let (root, left, right) = (rec[&gene], rec[&left_gene], rec[&right_gene]);
    let anc = input.ancestry;
    let dist_left = u64::from(anc.distance(root, left));
    let dist_right = u64::from(anc.distance(root, right));
    let children = memo[left_gene as usize] + memo[right_gene as usize];

    match event {
        // Each child lies at least one edge below; extra edges are losses.
        Event::Speciation => children + costs.loss.times(dist_left + dist_right - 2),
        Event::Duplication => {
            costs.duplication + children + costs.loss.times(dist_left + dist_right)
        }
        Event::HorizontalGeneTransfer => {
            let dist_conserved = if anc.is_ancestor_of(root, left) {
                dist_left
            } else {
                dist_right
            };
            costs.transfer + children + costs.loss.times(dist_conserved)
        }
        Event::Leaf | Event::Invalid => Cost::INFINITE,
    }
}
