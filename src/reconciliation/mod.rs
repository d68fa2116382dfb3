pub mod decode;
pub mod evaluate;
pub mod event;
pub mod exhaustive;
pub mod input;
pub mod lca;
pub mod table;

pub use decode::{reconcile_dtl, reconcile_dtl_any};
pub use evaluate::{evaluate_cost, reconciliation_cost};
pub use event::{classify_event, Event};
pub use exhaustive::{enumerate_all, reconcile_exhaustive};
pub use input::{reconcile_leaves, Reconciliation, ReconciliationInput};
pub use lca::reconcile_lca;
pub use table::{DtlTable, MappingInfo};

#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::Reconciliation;
    use crate::newick::parse_newick;
    use crate::tree::Tree;

    /// Gene tree with speciations, duplications and two transfers, along
    /// with the species tree it is reconciled against.
    pub(crate) fn example_trees() -> (Tree, Tree) {
        let mut genes = parse_newick(
            "(((x_1,z_1)3,(w_1,w_2)4)2,(((x_2,y_4)7,((x_3,(y_1,(y_2,y_3)11)10)9,z_2)8)6,\
             (w_3,(z_3,(t_1,t_2)14)13)12)5)1;",
        )
        .unwrap();
        genes.label_species_from_names();
        let species = parse_newick("(((X,Y)XY,Z)XYZ,(W,T)WT)XYZWT;").unwrap();
        (genes, species)
    }

    pub(crate) fn example_reconciliation(genes: &Tree, species: &Tree) -> Reconciliation {
        [
            ("x_1", "X"),
            ("x_2", "X"),
            ("x_3", "X"),
            ("y_1", "Y"),
            ("y_2", "Y"),
            ("y_3", "Y"),
            ("y_4", "Y"),
            ("z_1", "Z"),
            ("z_2", "Z"),
            ("z_3", "Z"),
            ("w_1", "W"),
            ("w_2", "W"),
            ("w_3", "W"),
            ("t_1", "T"),
            ("t_2", "T"),
            ("1", "XYZWT"),
            ("2", "XYZ"),
            ("3", "XYZ"),
            ("4", "W"),
            ("5", "XYZWT"),
            ("6", "XYZ"),
            ("7", "XY"),
            ("8", "XYZ"),
            ("9", "XY"),
            ("10", "Y"),
            ("11", "Y"),
            ("12", "WT"),
            ("13", "T"),
            ("14", "T"),
        ]
        .into_iter()
        .map(|(gene, sp)| {
            (
                genes.find_by_name(gene).unwrap(),
                species.find_by_name(sp).unwrap(),
            )
        })
        .collect()
    }
}
