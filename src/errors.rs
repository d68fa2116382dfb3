use alloc::string::String;
use core::fmt;

/// Error types for the dtlrec crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// Newick input could not be parsed.
    NewickSyntax { position: usize, message: &'static str },
    /// A gene tree node does not have exactly zero or two children.
    NonBinaryGeneNode { node: u32, children: usize },
    /// Ancestry information was built from a different species tree.
    MismatchedAncestry { expected: usize, found: usize },
    /// A gene leaf's species label matches no species leaf.
    UnknownSpecies(String),
    /// A node name matches no node of the tree it was looked up in.
    UnknownNode(String),
    /// A textual reconciliation is not a list of `gene:species` pairs.
    MalformedReconciliation(String),
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewickSyntax { position, message } => {
                write!(f, "invalid newick at byte {}: {}", position, message)
            }
            Self::NonBinaryGeneNode { node, children } => {
                write!(
                    f,
                    "gene node {} has {} children (expected 0 or 2)",
                    node, children
                )
            }
            Self::MismatchedAncestry { expected, found } => {
                write!(
                    f,
                    "ancestry covers {} nodes but the species tree has {}",
                    found, expected
                )
            }
            Self::UnknownSpecies(label) => {
                write!(f, "no species leaf named '{}'", label)
            }
            Self::UnknownNode(name) => write!(f, "no node named '{}'", name),
            Self::MalformedReconciliation(pair) => {
                write!(f, "malformed reconciliation pair '{}'", pair)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ReconcileError {}

pub type Result<T> = core::result::Result<T, ReconcileError>;
