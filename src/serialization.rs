use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::errors::{ReconcileError, Result};
use crate::reconciliation::Reconciliation;
use crate::tree::Tree;

/// Write a reconciliation as comma-separated `gene:species` node name
/// pairs, in gene node order.
///
/// Example: `"1:XYZ,2:YZ,x_1:X"`.
pub fn serialize_reconciliation(
    gene_tree: &Tree,
    species_tree: &Tree,
    rec: &Reconciliation,
) -> String {
    rec.iter()
        .map(|(&gene, &species)| {
            alloc::format!("{}:{}", gene_tree.name_of(gene), species_tree.name_of(species))
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Read back the output of [`serialize_reconciliation`].
///
/// Names are resolved to the first node carrying them in each tree. Blank
/// segments and whitespace around names are ignored.
pub fn parse_reconciliation(
    gene_tree: &Tree,
    species_tree: &Tree,
    source: &str,
) -> Result<Reconciliation> {
    let mut rec = Reconciliation::new();

    for pair in source.split(',') {
        if pair.trim().is_empty() {
            continue;
        }
        let mut parts = pair.split(':');
        let (Some(gene), Some(species), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ReconcileError::MalformedReconciliation(pair.trim().to_string()));
        };
        let lookup = |tree: &Tree, name: &str| {
            let name = name.trim();
            tree.find_by_name(name)
                .ok_or_else(|| ReconcileError::UnknownNode(name.to_string()))
        };
        rec.insert(lookup(gene_tree, gene)?, lookup(species_tree, species)?);
    }

    Ok(rec)
}
