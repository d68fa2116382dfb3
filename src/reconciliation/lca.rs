use alloc::string::String;

use crate::errors::{ReconcileError, Result};

use super::input::{Reconciliation, ReconciliationInput};

/// Map every gene node to the lowest species node able to hold it.
///
/// Leaves go to the species leaf named by their label, internal nodes to the
/// lowest common ancestor of their children's images. The result only uses
/// speciations and duplications and minimizes the duplication-loss cost.
///
/// Runs in linear time after the ancestry structure is built. Fails with
/// [`ReconcileError::UnknownSpecies`] when a gene leaf's label matches no
/// species leaf.
pub fn reconcile_lca(input: &ReconciliationInput<'_>) -> Result<Reconciliation> {
    let mut rec = Reconciliation::new();

    for gene in input.gene_tree.postorder() {
        let image = match input.gene_children(gene) {
            Some((left, right)) => input
                .ancestry
                .lowest_common_ancestor(rec[&left], rec[&right]),
            None => input.leaf_species(gene).ok_or_else(|| {
                ReconcileError::UnknownSpecies(
                    input
                        .gene_tree
                        .species_of(gene)
                        .map(String::from)
                        .unwrap_or_default(),
                )
            })?,
        };
        rec.insert(gene, image);
    }

    Ok(rec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ancestry::build_ancestor_structure;
    use crate::cost::{Cost, CostVector};
    use crate::newick::parse_newick;
    use crate::reconciliation::evaluate::reconciliation_cost;
    use crate::reconciliation::event::{classify_event, Event};

    #[test]
    fn maps_internal_nodes_to_lca() {
        let mut genes = parse_newick("((x_1,(x_2,(y_1,z_1)5)4)3,(y_2,z_2)2)1;").unwrap();
        genes.label_species_from_names();
        let species = parse_newick("(X,(Y,Z)YZ)XYZ;").unwrap();
        let ancestry = build_ancestor_structure(&species);
        let input = ReconciliationInput::new(&genes, &species, &ancestry).unwrap();

        let rec = reconcile_lca(&input).unwrap();
        let image = |gene: &str| species.name_of(rec[&genes.find_by_name(gene).unwrap()]);

        assert_eq!(rec.len(), genes.len());
        assert_eq!(image("1"), "XYZ");
        assert_eq!(image("2"), "YZ");
        assert_eq!(image("3"), "XYZ");
        assert_eq!(image("4"), "XYZ");
        assert_eq!(image("5"), "YZ");
        assert_eq!(image("x_2"), "X");
        assert_eq!(image("z_2"), "Z");

        assert_eq!(
            reconciliation_cost(&input, &rec, &CostVector::default()),
            Cost::new(4)
        );
        for gene in genes.preorder() {
            assert_ne!(classify_event(&input, &rec, gene), Event::Invalid);
            assert_ne!(
                classify_event(&input, &rec, gene),
                Event::HorizontalGeneTransfer
            );
        }
    }

    #[test]
    fn unknown_species_is_an_error() {
        let mut genes = parse_newick("(x_1,q_1)1;").unwrap();
        genes.label_species_from_names();
        let species = parse_newick("(X,Y)XY;").unwrap();
        let ancestry = build_ancestor_structure(&species);
        let input = ReconciliationInput::new(&genes, &species, &ancestry).unwrap();

        assert_eq!(
            reconcile_lca(&input),
            Err(ReconcileError::UnknownSpecies("Q".into()))
        );
    }

    #[test]
    fn single_leaf_gene_tree() {
        let mut genes = parse_newick("y_1;").unwrap();
        genes.label_species_from_names();
        let species = parse_newick("(X,Y)XY;").unwrap();
        let ancestry = build_ancestor_structure(&species);
        let input = ReconciliationInput::new(&genes, &species, &ancestry).unwrap();

        let rec = reconcile_lca(&input).unwrap();
        assert_eq!(rec.get(&0), species.find_by_name("Y").as_ref());
    }
}
