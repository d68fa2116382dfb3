use alloc::string::String;
use alloc::vec::Vec;

/// Handle of a node inside a [`Tree`] arena.
pub type NodeId = u32;

pub(crate) const NO_PARENT: u32 = u32::MAX;

/// SoA rooted tree.
///
/// Nodes are stored as indices into parallel vectors; the root is node 0 and
/// every node is pushed after its parent. Children own nothing: `parent` is a
/// plain index back-reference. Leaves of a gene tree carry a `species` label
/// resolving them onto a species tree leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub parent: Vec<u32>,
    pub children: Vec<Vec<u32>>,
    pub name: Vec<String>,
    pub species: Vec<Option<String>>,
}

impl Tree {
    /// Create a tree holding only a root node.
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            parent: alloc::vec![NO_PARENT],
            children: alloc::vec![Vec::new()],
            name: alloc::vec![root_name.into()],
            species: alloc::vec![None],
        }
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn root(&self) -> NodeId {
        0
    }

    /// Add a node as the last child of `parent_idx`.
    pub fn add_node(&mut self, parent_idx: NodeId, name: impl Into<String>) -> NodeId {
        let idx = self.parent.len() as u32;
        self.parent.push(parent_idx);
        self.children.push(Vec::new());
        self.name.push(name.into());
        self.species.push(None);
        self.children[parent_idx as usize].push(idx);
        idx
    }

    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.children[node as usize].is_empty()
    }

    #[inline]
    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        match self.parent[node as usize] {
            NO_PARENT => None,
            p => Some(p),
        }
    }

    #[inline]
    pub fn children_of(&self, node: NodeId) -> &[NodeId] {
        &self.children[node as usize]
    }

    #[inline]
    pub fn name_of(&self, node: NodeId) -> &str {
        &self.name[node as usize]
    }

    #[inline]
    pub fn species_of(&self, node: NodeId) -> Option<&str> {
        self.species[node as usize].as_deref()
    }

    pub fn set_species(&mut self, node: NodeId, label: impl Into<String>) {
        self.species[node as usize] = Some(label.into());
    }

    /// Label every leaf with the species derived from its name
    /// (see [`species_from_gene_name`]).
    pub fn label_species_from_names(&mut self) {
        for node in 0..self.len() as u32 {
            if self.is_leaf(node) {
                let label = species_from_gene_name(&self.name[node as usize]);
                self.species[node as usize] = Some(label);
            }
        }
    }

    /// Nodes of the subtree rooted at `node`, parents before children,
    /// siblings in insertion order.
    pub fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = alloc::vec![node];
        while let Some(cur) = stack.pop() {
            order.push(cur);
            stack.extend(self.children[cur as usize].iter().rev().copied());
        }
        order
    }

    /// All nodes in preorder.
    pub fn preorder(&self) -> Vec<NodeId> {
        self.subtree(self.root())
    }

    /// All nodes in postorder (children before parents).
    pub fn postorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack: Vec<(u32, bool)> = alloc::vec![(self.root(), false)];
        while let Some((cur, expanded)) = stack.pop() {
            if expanded {
                order.push(cur);
                continue;
            }
            stack.push((cur, true));
            for &child in self.children[cur as usize].iter().rev() {
                stack.push((child, false));
            }
        }
        order
    }

    /// Leaves in preorder.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.preorder().into_iter().filter(move |&n| self.is_leaf(n))
    }

    /// First node (in index order) carrying `name`.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.name.iter().position(|n| n == name).map(|i| i as u32)
    }

    /// First leaf (in index order) carrying `name`.
    pub fn leaf_by_name(&self, name: &str) -> Option<NodeId> {
        (0..self.len() as u32).find(|&n| self.is_leaf(n) && self.name[n as usize] == name)
    }

    /// Walk the parent chain of `node`, `node` itself first.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut cur = node;
        core::iter::from_fn(move || {
            if cur == NO_PARENT {
                return None;
            }
            let out = cur;
            cur = self.parent[cur as usize];
            Some(out)
        })
    }

    /// First node with neither zero nor two children, with its child count.
    pub fn find_non_binary(&self) -> Option<(NodeId, usize)> {
        self.children
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_empty() && c.len() != 2)
            .map(|(i, c)| (i as u32, c.len()))
    }
}

/// Extract the species name out of a gene name: the text before the first
/// `_`, upper-cased (`"x_21"` gives `"X"`).
pub fn species_from_gene_name(gene_name: &str) -> String {
    gene_name
        .split('_')
        .next()
        .unwrap_or_default()
        .to_uppercase()
}
