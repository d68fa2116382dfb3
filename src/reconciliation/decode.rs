use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::cost::{Cost, CostVector};
use crate::min_sequence::MinSequence;
use crate::tree::NodeId;

use super::input::{Reconciliation, ReconciliationInput};
use super::table::{DtlTable, MappingInfo};

/// Find every minimum-cost DTL reconciliation of the gene tree.
///
/// Returns the minimum cost with all reconciliations achieving it. When no
/// valid reconciliation exists (for instance a gene leaf names no species
/// leaf) the cost is infinite and the list empty.
///
/// The number of solutions can grow combinatorially with the number of
/// ties; bound it by avoiding degenerate cost vectors, or use
/// [`reconcile_dtl_any`].
pub fn reconcile_dtl(
    input: &ReconciliationInput<'_>,
    costs: &CostVector,
) -> (Cost, Vec<Reconciliation>) {
    let table = DtlTable::compute(input, costs);
    let (min_cost, solutions) = decode(input, &table, MinSequence::new());

    #[cfg(feature = "tracing")]
    tracing::debug!(cost = %min_cost, solutions = solutions.len(), "decoded reconciliations");

    (min_cost, solutions)
}

/// Find one minimum-cost DTL reconciliation of the gene tree.
///
/// Same cost as [`reconcile_dtl`], but every table cell keeps a single
/// placement, so the work stays polynomial however many ties there are.
/// The reconciliation returned is one of those [`reconcile_dtl`] lists.
/// `None` when no valid reconciliation exists.
pub fn reconcile_dtl_any(
    input: &ReconciliationInput<'_>,
    costs: &CostVector,
) -> (Cost, Option<Reconciliation>) {
    let table = DtlTable::compute_any(input, costs);
    let (min_cost, solutions) = decode(input, &table, MinSequence::with_max_keep(1));

    #[cfg(feature = "tracing")]
    tracing::debug!(cost = %min_cost, found = !solutions.is_empty(), "decoded one reconciliation");

    (min_cost, solutions.into_iter().next())
}

/// Collect the cheapest root placements into `roots` and expand them.
fn decode(
    input: &ReconciliationInput<'_>,
    table: &DtlTable,
    mut roots: MinSequence<MappingInfo>,
) -> (Cost, Vec<Reconciliation>) {
    #[cfg(feature = "tracing")]
    let span = tracing::info_span!("decode");
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let root = input.gene_tree.root();
    for species in 0..table.num_species() as u32 {
        let cell = table.get(root, species);
        roots.extend(cell.iter().map(|&info| (cell.min(), info)));
    }

    let mut decoder = Decoder {
        input,
        table,
        memo: BTreeMap::new(),
    };
    let solutions: Vec<Reconciliation> = roots
        .iter()
        .flat_map(|&info| decoder.expand(root, info))
        .collect();

    (roots.min(), solutions)
}

struct Decoder<'t, 'a> {
    input: &'t ReconciliationInput<'a>,
    table: &'t DtlTable,
    /// Solutions of each (gene, species) placement already expanded.
    memo: BTreeMap<(NodeId, NodeId), Rc<[Reconciliation]>>,
}

impl Decoder<'_, '_> {
    /// Every optimal reconciliation of the subtree of `gene` placed on
    /// `species`.
    fn placed(&mut self, gene: NodeId, species: NodeId) -> Rc<[Reconciliation]> {
        if let Some(done) = self.memo.get(&(gene, species)) {
            return Rc::clone(done);
        }
        let table = self.table;
        let solutions: Rc<[Reconciliation]> = table
            .get(gene, species)
            .iter()
            .flat_map(|&info| self.expand(gene, info))
            .collect();
        self.memo.insert((gene, species), Rc::clone(&solutions));
        solutions
    }

    /// Every reconciliation of the subtree of `gene` following `info`.
    fn expand(&mut self, gene: NodeId, info: MappingInfo) -> Vec<Reconciliation> {
        let (Some(left_species), Some(right_species), Some((left, right))) =
            (info.left, info.right, self.input.gene_children(gene))
        else {
            let mut leaf = Reconciliation::new();
            leaf.insert(gene, info.species);
            return alloc::vec![leaf];
        };

        let left_solutions = self.placed(left, left_species);
        let right_solutions = self.placed(right, right_species);

        let mut merged = Vec::with_capacity(left_solutions.len() * right_solutions.len());
        for left_rec in left_solutions.iter() {
            for right_rec in right_solutions.iter() {
                let mut rec = left_rec.clone();
                rec.extend(right_rec.iter().map(|(&g, &s)| (g, s)));
                rec.insert(gene, info.species);
                merged.push(rec);
            }
        }
        merged
    }
}
