use alloc::vec::Vec;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::cost::{Cost, CostVector};
use crate::min_sequence::MinSequence;
use crate::tree::NodeId;

use super::input::ReconciliationInput;

/// One optimal placement of a gene subtree root.
///
/// `left` and `right` hold the species nodes chosen for the two gene
/// children; both are `None` for a gene leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MappingInfo {
    pub species: NodeId,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl MappingInfo {
    fn leaf(species: NodeId) -> Self {
        Self {
            species,
            left: None,
            right: None,
        }
    }

    fn internal(species: NodeId, left: NodeId, right: NodeId) -> Self {
        Self {
            species,
            left: Some(left),
            right: Some(right),
        }
    }
}

/// Minimum DTL cost of every (gene subtree, species node) placement, with
/// every tied way of achieving it.
///
/// Cells are stored densely, one row of `species_tree.len()` cells per gene
/// node. A row is filled once all rows of the gene's children are.
#[derive(Debug, Clone)]
pub struct DtlTable {
    num_species: usize,
    cells: Vec<MinSequence<MappingInfo>>,
}

impl DtlTable {
    /// Fill the table for the whole gene tree, keeping every tie.
    ///
    /// Complexity: O(G * S^2) cost lookups for G gene nodes and S species
    /// nodes, plus the size of the tied candidate products.
    pub fn compute(input: &ReconciliationInput<'_>, costs: &CostVector) -> Self {
        Self::compute_with_max_keep(input, costs, None)
    }

    /// Fill the table keeping a single placement per cell. Minimum costs are
    /// the same as with [`compute`](Self::compute).
    pub fn compute_any(input: &ReconciliationInput<'_>, costs: &CostVector) -> Self {
        Self::compute_with_max_keep(input, costs, Some(1))
    }

    /// Fill the table keeping at most `max_keep` tied placements per cell,
    /// or all of them for `None`.
    pub fn compute_with_max_keep(
        input: &ReconciliationInput<'_>,
        costs: &CostVector,
        max_keep: Option<usize>,
    ) -> Self {
        let num_genes = input.gene_tree.len();
        let num_species = input.species_tree.len();

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("dtl_table", genes = num_genes, species = num_species);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut table = Self {
            num_species,
            cells: (0..num_genes * num_species).map(|_| empty_cell(max_keep)).collect(),
        };
        let subtrees: Vec<Vec<NodeId>> = (0..num_species as u32)
            .map(|species| input.species_tree.subtree(species))
            .collect();

        for gene in input.gene_tree.postorder() {
            #[cfg(feature = "tracing")]
            let _row = tracing::trace_span!("gene_row", gene).entered();

            let Some((left, right)) = input.gene_children(gene) else {
                if let Some(species) = input.leaf_species(gene) {
                    let idx = table.index(gene, species);
                    table.cells[idx].update(Cost::ZERO, MappingInfo::leaf(species));
                }
                continue;
            };

            let fill = RowFill {
                input,
                costs,
                max_keep,
                subtrees: &subtrees,
                left: table.row(left),
                right: table.row(right),
            };

            #[cfg(feature = "rayon")]
            let row: Vec<MinSequence<MappingInfo>> = (0..num_species as u32)
                .into_par_iter()
                .map(|species| fill.cell(species))
                .collect();

            #[cfg(not(feature = "rayon"))]
            let row: Vec<MinSequence<MappingInfo>> = (0..num_species as u32)
                .map(|species| fill.cell(species))
                .collect();

            let start = table.index(gene, 0);
            for (slot, cell) in table.cells[start..start + num_species].iter_mut().zip(row) {
                *slot = cell;
            }
        }

        table
    }

    /// Optimal placements of the subtree rooted at `gene` onto `species`.
    #[inline]
    pub fn get(&self, gene: NodeId, species: NodeId) -> &MinSequence<MappingInfo> {
        &self.cells[self.index(gene, species)]
    }

    /// Minimum cost of placing the subtree rooted at `gene` onto `species`.
    #[inline]
    pub fn min_cost(&self, gene: NodeId, species: NodeId) -> Cost {
        self.get(gene, species).min()
    }

    pub fn num_species(&self) -> usize {
        self.num_species
    }

    fn row(&self, gene: NodeId) -> &[MinSequence<MappingInfo>] {
        let start = self.index(gene, 0);
        &self.cells[start..start + self.num_species]
    }

    #[inline]
    fn index(&self, gene: NodeId, species: NodeId) -> usize {
        gene as usize * self.num_species + species as usize
    }
}

fn empty_cell(max_keep: Option<usize>) -> MinSequence<MappingInfo> {
    match max_keep {
        Some(cap) => MinSequence::with_max_keep(cap),
        None => MinSequence::new(),
    }
}

/// Everything needed to fill one internal gene row from its children's rows.
struct RowFill<'t, 'a> {
    input: &'t ReconciliationInput<'a>,
    costs: &'t CostVector,
    max_keep: Option<usize>,
    subtrees: &'t [Vec<NodeId>],
    left: &'t [MinSequence<MappingInfo>],
    right: &'t [MinSequence<MappingInfo>],
}

impl RowFill<'_, '_> {
    fn cell(&self, species: NodeId) -> MinSequence<MappingInfo> {
        let mut cell = empty_cell(self.max_keep);
        self.try_speciation(species, &mut cell);
        self.try_duplication_transfer(species, &mut cell);
        cell
    }

    /// Cheapest nodes among `candidates`, keyed by the child's table cost
    /// plus `edges(node)` losses.
    fn side_minima(
        &self,
        child_row: &[MinSequence<MappingInfo>],
        candidates: impl Iterator<Item = NodeId>,
        edges: impl Fn(NodeId) -> Option<u64>,
    ) -> MinSequence<NodeId> {
        candidates
            .map(|node| {
                let losses = match edges(node) {
                    Some(count) => self.costs.loss.times(count),
                    None => Cost::ZERO,
                };
                (child_row[node as usize].min() + losses, node)
            })
            .collect()
    }

    /// Children placed in two distinct child subtrees of `species`, one
    /// edge below it being free.
    fn try_speciation(&self, species: NodeId, cell: &mut MinSequence<MappingInfo>) {
        let children = self.input.species_tree.children_of(species);
        if children.len() < 2 {
            return;
        }

        let anc = self.input.ancestry;
        let below = |node: NodeId| Some(u64::from(anc.distance(species, node)) - 1);
        let per_child = |row: &[MinSequence<MappingInfo>]| -> Vec<MinSequence<NodeId>> {
            children
                .iter()
                .map(|&child| {
                    self.side_minima(row, self.subtrees[child as usize].iter().copied(), below)
                })
                .collect()
        };
        let left_sides = per_child(self.left);
        let right_sides = per_child(self.right);

        for (i, left_side) in left_sides.iter().enumerate() {
            for (j, right_side) in right_sides.iter().enumerate() {
                if i != j {
                    cross(species, left_side, right_side, Cost::ZERO, cell);
                }
            }
        }
    }

    /// Both children kept below `species` (duplication), or one kept and
    /// the other sent to a node incomparable to `species` (transfer).
    fn try_duplication_transfer(&self, species: NodeId, cell: &mut MinSequence<MappingInfo>) {
        let anc = self.input.ancestry;
        let within = self.subtrees[species as usize].iter().copied();
        let kept = |node: NodeId| Some(u64::from(anc.distance(species, node)));
        let left_within = self.side_minima(self.left, within.clone(), kept);
        let right_within = self.side_minima(self.right, within, kept);

        if !left_within.is_empty() && !right_within.is_empty() {
            let dup = self.costs.duplication + left_within.min() + right_within.min();
            if dup <= cell.min() {
                for &left in &left_within {
                    for &right in &right_within {
                        // Those pairs are speciations, already offered cheaper.
                        if anc.lowest_common_ancestor(left, right) == species
                            && !anc.is_comparable(left, right)
                        {
                            continue;
                        }
                        cell.update(dup, MappingInfo::internal(species, left, right));
                    }
                }
            }
        }

        let foreign = || {
            (0..self.input.species_tree.len() as u32)
                .filter(move |&node| !anc.is_comparable(species, node))
        };
        let left_away = self.side_minima(self.left, foreign(), |_| None);
        let right_away = self.side_minima(self.right, foreign(), |_| None);

        cross(species, &left_within, &right_away, self.costs.transfer, cell);
        cross(species, &left_away, &right_within, self.costs.transfer, cell);
    }
}

/// Offer every pair of the two sides at their combined cost plus `extra`.
fn cross(
    species: NodeId,
    left_side: &MinSequence<NodeId>,
    right_side: &MinSequence<NodeId>,
    extra: Cost,
    cell: &mut MinSequence<MappingInfo>,
) {
    if left_side.is_empty() || right_side.is_empty() {
        return;
    }
    let cost = extra + left_side.min() + right_side.min();
    if cost > cell.min() {
        return;
    }
    for &left in left_side {
        for &right in right_side {
            cell.update(cost, MappingInfo::internal(species, left, right));
        }
    }
}
