use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::ancestry::AncestorStructure;
use crate::errors::{ReconcileError, Result};
use crate::tree::{NodeId, Tree};

/// Mapping of gene tree nodes onto species tree nodes.
pub type Reconciliation = BTreeMap<NodeId, NodeId>;

/// A gene tree, the species tree it is reconciled against and the ancestry
/// information of that species tree.
///
/// Construction checks the gene tree is binary and resolves every gene leaf
/// to the species leaf named by its label.
#[derive(Debug, Clone)]
pub struct ReconciliationInput<'a> {
    pub gene_tree: &'a Tree,
    pub species_tree: &'a Tree,
    pub ancestry: &'a AncestorStructure,
    /// Species leaf of each gene leaf, `None` for internal nodes and for
    /// labels matching no species leaf.
    leaf_species: Vec<Option<NodeId>>,
}

impl<'a> ReconciliationInput<'a> {
    pub fn new(
        gene_tree: &'a Tree,
        species_tree: &'a Tree,
        ancestry: &'a AncestorStructure,
    ) -> Result<Self> {
        if let Some((node, children)) = gene_tree.find_non_binary() {
            return Err(ReconcileError::NonBinaryGeneNode { node, children });
        }
        if ancestry.len() != species_tree.len() {
            return Err(ReconcileError::MismatchedAncestry {
                expected: species_tree.len(),
                found: ancestry.len(),
            });
        }

        let leaf_species = (0..gene_tree.len() as u32)
            .map(|gene| {
                if !gene_tree.is_leaf(gene) {
                    return None;
                }
                gene_tree
                    .species_of(gene)
                    .and_then(|label| species_tree.leaf_by_name(label))
            })
            .collect();

        Ok(Self {
            gene_tree,
            species_tree,
            ancestry,
            leaf_species,
        })
    }

    /// Species leaf a gene leaf is forced onto.
    #[inline]
    pub fn leaf_species(&self, gene: NodeId) -> Option<NodeId> {
        self.leaf_species[gene as usize]
    }

    /// The two children of an internal gene node.
    #[inline]
    pub(crate) fn gene_children(&self, gene: NodeId) -> Option<(NodeId, NodeId)> {
        match self.gene_tree.children_of(gene) {
            &[left, right] => Some((left, right)),
            _ => None,
        }
    }
}

/// Partial reconciliation holding the forced leaf assignments.
///
/// Leaves whose species label matches no species leaf are left out.
pub fn reconcile_leaves(input: &ReconciliationInput<'_>) -> Reconciliation {
    input
        .gene_tree
        .leaves()
        .filter_map(|gene| input.leaf_species(gene).map(|species| (gene, species)))
        .collect()
}
