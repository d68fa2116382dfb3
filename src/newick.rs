use alloc::string::String;
use alloc::vec::Vec;

use crate::errors::{ReconcileError, Result};
use crate::tree::{NodeId, Tree};

/// Parse a Newick string into a [`Tree`].
///
/// Internal nodes may be named (`(A,B)AB;`). Branch lengths and bracketed
/// comments are skipped. The string must end with `;`.
pub fn parse_newick(newick: &str) -> Result<Tree> {
    let bytes = newick.as_bytes();
    let mut tree: Option<Tree> = None;
    // Open subtrees awaiting their closing parenthesis.
    let mut open: Vec<NodeId> = Vec::new();
    // Node whose name/length is currently being read.
    let mut current: Option<NodeId> = None;
    let mut pos = 0usize;
    let mut finished = false;

    let syntax = |position: usize, message: &'static str| ReconcileError::NewickSyntax {
        position,
        message,
    };

    while pos < bytes.len() {
        let c = bytes[pos];
        match c {
            b'(' => {
                if current.is_some() {
                    return Err(syntax(pos, "unexpected '(' after a node"));
                }
                let node = if tree.is_none() {
                    tree = Some(Tree::new(""));
                    0
                } else {
                    match (tree.as_mut(), open.last()) {
                        (Some(t), Some(&parent)) => t.add_node(parent, ""),
                        _ => return Err(syntax(pos, "multiple roots")),
                    }
                };
                open.push(node);
                pos += 1;
            }
            b',' => {
                if open.is_empty() {
                    return Err(syntax(pos, "',' outside of parentheses"));
                }
                if current.is_none() {
                    add_leaf(&mut tree, &open, "");
                }
                current = None;
                pos += 1;
            }
            b')' => {
                let Some(node) = open.pop() else {
                    return Err(syntax(pos, "unbalanced ')'"));
                };
                if current.is_none() {
                    open.push(node);
                    add_leaf(&mut tree, &open, "");
                    open.pop();
                }
                current = Some(node);
                pos += 1;
            }
            b':' => {
                pos += 1;
                while pos < bytes.len() && !b"(),;[".contains(&bytes[pos]) {
                    pos += 1;
                }
            }
            b'[' => {
                while pos < bytes.len() && bytes[pos] != b']' {
                    pos += 1;
                }
                if pos == bytes.len() {
                    return Err(syntax(pos, "unterminated comment"));
                }
                pos += 1;
            }
            b';' => {
                if !open.is_empty() {
                    return Err(syntax(pos, "unbalanced '('"));
                }
                finished = true;
                pos += 1;
                break;
            }
            c if c.is_ascii_whitespace() => pos += 1,
            _ => {
                let start = pos;
                while pos < bytes.len() && !b"(),:;[".contains(&bytes[pos]) {
                    pos += 1;
                }
                let label = newick[start..pos].trim();
                match current {
                    Some(node) => {
                        // Name following a closing parenthesis.
                        if let Some(t) = tree.as_mut() {
                            t.name[node as usize] = String::from(label);
                        }
                    }
                    None if open.is_empty() && tree.is_none() => {
                        tree = Some(Tree::new(label));
                        current = Some(0);
                    }
                    None if open.is_empty() => {
                        return Err(syntax(start, "label outside of the tree"));
                    }
                    None => current = Some(add_leaf(&mut tree, &open, label)),
                }
            }
        }
    }

    if !finished {
        return Err(syntax(pos, "missing ';'"));
    }
    if bytes[pos..].iter().any(|b| !b.is_ascii_whitespace()) {
        return Err(syntax(pos, "trailing characters after ';'"));
    }
    tree.ok_or(syntax(0, "empty tree"))
}

fn add_leaf(tree: &mut Option<Tree>, open: &[NodeId], label: &str) -> NodeId {
    match (tree.as_mut(), open.last()) {
        (Some(t), Some(&parent)) => t.add_node(parent, label),
        // `open` is never non-empty without a tree.
        _ => 0,
    }
}

/// Write a tree in Newick format, internal names included, no lengths.
pub fn to_newick(tree: &Tree) -> String {
    let mut out = String::new();
    write_subtree(tree, tree.root(), &mut out);
    out.push(';');
    out
}

fn write_subtree(tree: &Tree, node: NodeId, out: &mut String) {
    let children = tree.children_of(node);
    if !children.is_empty() {
        out.push('(');
        for (i, &child) in children.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            write_subtree(tree, child, out);
        }
        out.push(')');
    }
    out.push_str(tree.name_of(node));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_named_internal_nodes() {
        let tree = parse_newick("(X,(Y,Z)YZ)XYZ;").unwrap();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.name_of(0), "XYZ");
        assert_eq!(tree.name_of(1), "X");
        assert_eq!(tree.name_of(2), "YZ");
        assert_eq!(tree.children_of(2), &[3, 4]);
        assert_eq!(tree.name_of(4), "Z");
    }

    #[test]
    fn parse_polytomy_and_unary_nodes() {
        let tree = parse_newick("((2,(4,5)3)1,(7,8,(10)9)6)0;").unwrap();
        assert_eq!(tree.len(), 11);
        let six = tree.find_by_name("6").unwrap();
        assert_eq!(tree.children_of(six).len(), 3);
        let nine = tree.find_by_name("9").unwrap();
        assert_eq!(tree.children_of(nine).len(), 1);
    }

    #[test]
    fn skips_lengths_comments_and_whitespace() {
        let tree = parse_newick(" ( a:0.5 , b:1e-3 [&&NHX:S=b] ) r:0 ;\n").unwrap();
        assert_eq!(tree.name, alloc::vec!["r", "a", "b"]);
    }

    #[test]
    fn unnamed_nodes() {
        let tree = parse_newick("((,),);").unwrap();
        assert_eq!(tree.len(), 5);
        assert!(tree.name.iter().all(|n| n.is_empty()));
    }

    #[test]
    fn single_leaf_tree() {
        let tree = parse_newick("A;").unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.name_of(0), "A");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_newick("(A,B)").is_err());
        assert!(parse_newick("(A,B;").is_err());
        assert!(parse_newick("A,B);").is_err());
        assert!(parse_newick("(A,B)R;(C,D);").is_err());
        assert!(parse_newick("").is_err());
    }

    #[test]
    fn writes_back_the_same_topology() {
        let source = "((x_1,(x_2,(y_1,z_1)5)4)3,(y_2,z_2)2)1;";
        let tree = parse_newick(source).unwrap();
        assert_eq!(to_newick(&tree), source);
    }
}
