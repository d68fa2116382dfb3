#![cfg_attr(not(feature = "std"), no_std)]

//! Reconciliation of gene trees with species trees.
//!
//! A reconciliation maps every gene tree node onto a species tree node and
//! explains the gene tree through speciations, duplications, horizontal gene
//! transfers and losses. Two solvers are provided: [`reconcile_lca`], the
//! linear-time duplication-loss mapping, and [`reconcile_dtl`], which finds
//! every minimum-cost reconciliation under a [`CostVector`]
//! ([`reconcile_dtl_any`] stops at one).
//!
//! ```
//! use dtlrec::{build_ancestor_structure, parse_newick, reconcile_dtl};
//! use dtlrec::{Cost, CostVector, ReconciliationInput};
//!
//! let mut genes = parse_newick("((x_1,y_1)2,z_1)1;").unwrap();
//! genes.label_species_from_names();
//! let species = parse_newick("((X,Y)XY,Z)XYZ;").unwrap();
//! let ancestry = build_ancestor_structure(&species);
//!
//! let input = ReconciliationInput::new(&genes, &species, &ancestry).unwrap();
//! let (cost, solutions) = reconcile_dtl(&input, &CostVector::default());
//! assert_eq!(cost, Cost::ZERO);
//! assert_eq!(solutions.len(), 1);
//! ```

extern crate alloc;

pub mod ancestry;
pub mod cost;
pub mod errors;
pub mod min_sequence;
pub mod newick;
pub mod reconciliation;
pub mod serialization;
pub mod tree;

#[cfg(feature = "pyo3")]
pub mod pyo3_bindings;

pub use ancestry::{build_ancestor_structure, AncestorStructure, RangeMinQuery};
pub use cost::{Cost, CostType, CostVector};
pub use errors::ReconcileError;
pub use min_sequence::MinSequence;
pub use newick::{parse_newick, to_newick};
pub use reconciliation::{
    classify_event, enumerate_all, evaluate_cost, reconcile_dtl, reconcile_dtl_any,
    reconcile_exhaustive, reconcile_lca, reconcile_leaves, reconciliation_cost, DtlTable, Event,
    MappingInfo, Reconciliation, ReconciliationInput,
};
pub use serialization::{parse_reconciliation, serialize_reconciliation};
pub use tree::{species_from_gene_name, NodeId, Tree};
