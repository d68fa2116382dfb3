// PyO3 bindings, behind the `pyo3` feature flag.
// Trees are passed as Newick strings; gene leaves are labeled with the
// species derived from their names (`x_1` lives in `X`).

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::ancestry::{build_ancestor_structure, AncestorStructure};
use crate::cost::{Cost, CostVector};
use crate::errors::ReconcileError;
use crate::newick::parse_newick;
use crate::reconciliation::{Reconciliation, ReconciliationInput};
use crate::tree::Tree;

fn value_error(err: ReconcileError) -> PyErr {
    PyErr::new::<PyValueError, _>(err.to_string())
}

fn prepare(gene_newick: &str, species_newick: &str) -> PyResult<(Tree, Tree, AncestorStructure)> {
    let mut gene_tree = parse_newick(gene_newick).map_err(value_error)?;
    gene_tree.label_species_from_names();
    let species_tree = parse_newick(species_newick).map_err(value_error)?;
    let ancestry = build_ancestor_structure(&species_tree);
    Ok((gene_tree, species_tree, ancestry))
}

fn named(gene_tree: &Tree, species_tree: &Tree, rec: &Reconciliation) -> BTreeMap<String, String> {
    rec.iter()
        .map(|(&gene, &species)| {
            (
                gene_tree.name_of(gene).to_string(),
                species_tree.name_of(species).to_string(),
            )
        })
        .collect()
}

/// Map every gene node onto the LCA of its children's species.
/// Returns a dict of gene name to species name.
#[pyfunction]
fn reconcile_lca(gene_newick: &str, species_newick: &str) -> PyResult<BTreeMap<String, String>> {
    let (gene_tree, species_tree, ancestry) = prepare(gene_newick, species_newick)?;
    let input = ReconciliationInput::new(&gene_tree, &species_tree, &ancestry).map_err(value_error)?;
    let rec = crate::reconciliation::reconcile_lca(&input).map_err(value_error)?;
    Ok(named(&gene_tree, &species_tree, &rec))
}

/// Find every minimum-cost DTL reconciliation.
/// A cost of None forbids the event. Returns (min_cost, solutions) where
/// min_cost is None when no valid reconciliation exists.
#[pyfunction]
#[pyo3(signature = (gene_newick, species_newick, duplication=Some(1), transfer=Some(1), loss=Some(1)))]
fn reconcile_dtl(
    py: Python<'_>,
    gene_newick: &str,
    species_newick: &str,
    duplication: Option<u64>,
    transfer: Option<u64>,
    loss: Option<u64>,
) -> PyResult<(Option<u64>, Vec<BTreeMap<String, String>>)> {
    let to_cost = |value: Option<u64>| value.map_or(Cost::INFINITE, Cost::new);
    let costs = CostVector::new(to_cost(duplication), to_cost(transfer), to_cost(loss));

    let (gene_tree, species_tree, ancestry) = prepare(gene_newick, species_newick)?;
    let input = ReconciliationInput::new(&gene_tree, &species_tree, &ancestry).map_err(value_error)?;
    let (cost, solutions) = py.allow_threads(|| crate::reconciliation::reconcile_dtl(&input, &costs));

    Ok((
        cost.finite(),
        solutions
            .iter()
            .map(|rec| named(&gene_tree, &species_tree, rec))
            .collect(),
    ))
}

/// Find one minimum-cost DTL reconciliation, same arguments as
/// `reconcile_dtl`. Returns (min_cost, solution or None).
#[pyfunction]
#[pyo3(signature = (gene_newick, species_newick, duplication=Some(1), transfer=Some(1), loss=Some(1)))]
fn reconcile_dtl_any(
    py: Python<'_>,
    gene_newick: &str,
    species_newick: &str,
    duplication: Option<u64>,
    transfer: Option<u64>,
    loss: Option<u64>,
) -> PyResult<(Option<u64>, Option<BTreeMap<String, String>>)> {
    let to_cost = |value: Option<u64>| value.map_or(Cost::INFINITE, Cost::new);
    let costs = CostVector::new(to_cost(duplication), to_cost(transfer), to_cost(loss));

    let (gene_tree, species_tree, ancestry) = prepare(gene_newick, species_newick)?;
    let input = ReconciliationInput::new(&gene_tree, &species_tree, &ancestry).map_err(value_error)?;
    let (cost, solution) =
        py.allow_threads(|| crate::reconciliation::reconcile_dtl_any(&input, &costs));

    Ok((
        cost.finite(),
        solution.map(|rec| named(&gene_tree, &species_tree, &rec)),
    ))
}

#[pymodule]
fn dtlrec_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(reconcile_lca, m)?)?;
    m.add_function(wrap_pyfunction!(reconcile_dtl, m)?)?;
    m.add_function(wrap_pyfunction!(reconcile_dtl_any, m)?)?;
    Ok(())
}
