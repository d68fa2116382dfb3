use alloc::vec::Vec;

use crate::cost::{Cost, CostVector};
use crate::min_sequence::MinSequence;
use crate::tree::NodeId;

use super::evaluate::reconciliation_cost;
use super::input::{Reconciliation, ReconciliationInput};

/// Generate every valid reconciliation of the gene tree, each exactly once.
///
/// For every combination of its children's reconciliations, an internal
/// gene node is placed on the LCA of their images or any ancestor of it
/// (speciation or duplication), or on the path from one child's image up to
/// the LCA, excluded, when the other image is not an ancestor of it
/// (transfer of the other child).
///
/// The output size is exponential in the gene tree size; this is meant as a
/// reference for small trees only. Empty when a gene leaf names no species
/// leaf.
pub fn enumerate_all(input: &ReconciliationInput<'_>) -> Vec<Reconciliation> {
    let species_tree = input.species_tree;
    let anc = input.ancestry;
    let mut partial: Vec<Vec<Reconciliation>> = alloc::vec![Vec::new(); input.gene_tree.len()];

    for gene in input.gene_tree.postorder() {
        let Some((left, right)) = input.gene_children(gene) else {
            if let Some(species) = input.leaf_species(gene) {
                partial[gene as usize].push(Reconciliation::from([(gene, species)]));
            }
            continue;
        };

        let left_all = core::mem::take(&mut partial[left as usize]);
        let right_all = core::mem::take(&mut partial[right as usize]);
        let mut here = Vec::new();

        for left_rec in &left_all {
            for right_rec in &right_all {
                let (left_species, right_species) = (left_rec[&left], right_rec[&right]);
                let lca = anc.lowest_common_ancestor(left_species, right_species);

                let mut placements: Vec<NodeId> = species_tree.ancestors(lca).collect();
                for (kept, sent) in [(left_species, right_species), (right_species, left_species)] {
                    if anc.is_ancestor_of(sent, kept) {
                        continue;
                    }
                    placements.extend(species_tree.ancestors(kept).take_while(|&n| n != lca));
                }

                for species in placements {
                    let mut rec = left_rec.clone();
                    rec.extend(right_rec.iter().map(|(&g, &s)| (g, s)));
                    rec.insert(gene, species);
                    here.push(rec);
                }
            }
        }

        partial[gene as usize] = here;
    }

    core::mem::take(&mut partial[input.gene_tree.root() as usize])
}

/// Minimum-cost reconciliations found by scoring every valid one.
///
/// Agrees with [`reconcile_dtl`](super::decode::reconcile_dtl) on both the
/// cost and the solution set, at exponential running time.
pub fn reconcile_exhaustive(
    input: &ReconciliationInput<'_>,
    costs: &CostVector,
) -> (Cost, Vec<Reconciliation>) {
    let best: MinSequence<Reconciliation> = enumerate_all(input)
        .into_iter()
        .map(|rec| (reconciliation_cost(input, &rec, costs), rec))
        .collect();
    (best.min(), best.into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ancestry::build_ancestor_structure;
    use crate::newick::parse_newick;
    use crate::reconciliation::decode::reconcile_dtl;
    use crate::reconciliation::event::{classify_event, Event};
    use crate::tree::Tree;

    fn trees(genes: &str, species: &str) -> (Tree, Tree) {
        let mut gene_tree = parse_newick(genes).unwrap();
        gene_tree.label_species_from_names();
        (gene_tree, parse_newick(species).unwrap())
    }

    #[test]
    fn every_valid_reconciliation_once() {
        let (genes, species) = trees("((x_1,x_2)2,(y_1,z_1)3)1;", "(X,(Y,Z)YZ)XYZ;");
        let ancestry = build_ancestor_structure(&species);
        let input = ReconciliationInput::new(&genes, &species, &ancestry).unwrap();

        let mut all = enumerate_all(&input);
        assert_eq!(all.len(), 16);

        let name = |gene: &str| genes.find_by_name(gene).unwrap();
        let sp = |label: &str| species.find_by_name(label).unwrap();
        let mut expected = Reconciliation::new();
        for (gene, label) in [
            ("1", "X"),
            ("2", "X"),
            ("3", "YZ"),
            ("x_1", "X"),
            ("x_2", "X"),
            ("y_1", "Y"),
            ("z_1", "Z"),
        ] {
            expected.insert(name(gene), sp(label));
        }
        assert!(all.contains(&expected));

        for rec in &all {
            assert_eq!(rec.len(), genes.len());
            for gene in genes.preorder() {
                assert_ne!(classify_event(&input, rec, gene), Event::Invalid);
            }
        }

        all.sort();
        all.dedup();
        assert_eq!(all.len(), 16);
    }

    #[test]
    fn unknown_species_yields_nothing() {
        let (genes, species) = trees("(x_1,q_1)1;", "(X,Y)XY;");
        let ancestry = build_ancestor_structure(&species);
        let input = ReconciliationInput::new(&genes, &species, &ancestry).unwrap();
        assert!(enumerate_all(&input).is_empty());

        let (cost, solutions) = reconcile_exhaustive(&input, &CostVector::default());
        assert_eq!(cost, Cost::INFINITE);
        assert!(solutions.is_empty());
    }

    #[test]
    fn agrees_with_dynamic_programming() {
        let (genes, species) = trees(
            "((x_1,(x_2,(y_1,z_1)5)4)3,(y_2,z_2)2)1;",
            "(X,(Y,Z)YZ)XYZ;",
        );
        let ancestry = build_ancestor_structure(&species);
        let input = ReconciliationInput::new(&genes, &species, &ancestry).unwrap();

        for costs in [
            CostVector::default(),
            CostVector::new(Cost::new(2), Cost::new(3), Cost::new(1)),
            CostVector::new(Cost::new(1), Cost::INFINITE, Cost::new(1)),
            CostVector::new(Cost::ZERO, Cost::new(1), Cost::ZERO),
        ] {
            let (brute_cost, mut brute) = reconcile_exhaustive(&input, &costs);
            let (dp_cost, mut dp) = reconcile_dtl(&input, &costs);
            brute.sort();
            dp.sort();
            assert_eq!(dp_cost, brute_cost);
            assert_eq!(dp, brute);
        }
    }
}
