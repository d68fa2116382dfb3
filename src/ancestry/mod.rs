pub mod lca;
pub mod range_min;

pub use lca::{build_ancestor_structure, AncestorStructure};
pub use range_min::RangeMinQuery;
