use core::fmt;

use crate::tree::NodeId;

use super::input::{Reconciliation, ReconciliationInput};

/// Evolutionary event a reconciliation induces at a gene node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// Extant gene mapped onto its own species.
    Leaf,
    /// Scenario that is invalid with respect to the evolutionary model.
    Invalid,
    /// Transmission of the parent gene to both children species.
    Speciation,
    /// Duplication of the parent gene in the same genome.
    Duplication,
    /// Transfer of one copy of the parent gene to a foreign genome.
    HorizontalGeneTransfer,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Leaf => "leaf",
            Self::Invalid => "invalid",
            Self::Speciation => "speciation",
            Self::Duplication => "duplication",
            Self::HorizontalGeneTransfer => "horizontal gene transfer",
        })
    }
}

/// Find the event a reconciliation associates to a gene node.
///
/// A node missing from `rec`, or whose children are missing, is `Invalid`.
pub fn classify_event(
    input: &ReconciliationInput<'_>,
    rec: &Reconciliation,
    gene: NodeId,
) -> Event {
    let Some(&root_species) = rec.get(&gene) else {
        return Event::Invalid;
    };

    let Some((left_gene, right_gene)) = input.gene_children(gene) else {
        let own_label = input.gene_tree.species_of(gene);
        return if own_label == Some(input.species_tree.name_of(root_species)) {
            Event::Leaf
        } else {
            Event::Invalid
        };
    };

    let (Some(&left), Some(&right)) = (rec.get(&left_gene), rec.get(&right_gene)) else {
        return Event::Invalid;
    };

    let anc = input.ancestry;

    if anc.is_strict_ancestor_of(left, root_species)
        || anc.is_strict_ancestor_of(right, root_species)
    {
        return Event::Invalid;
    }

    let keeps_left = anc.is_ancestor_of(root_species, left);
    let keeps_right = anc.is_ancestor_of(root_species, right);

    if keeps_left && keeps_right {
        if root_species == anc.lowest_common_ancestor(left, right)
            && !anc.is_comparable(left, right)
        {
            Event::Speciation
        } else {
            Event::Duplication
        }
    } else if keeps_left || keeps_right {
        Event::HorizontalGeneTransfer
    } else {
        Event::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ancestry::build_ancestor_structure;
    use crate::reconciliation::test_fixtures::{example_reconciliation, example_trees};

    #[test]
    fn events_of_example_reconciliation() {
        let (genes, species) = example_trees();
        let ancestry = build_ancestor_structure(&species);
        let input = ReconciliationInput::new(&genes, &species, &ancestry).unwrap();
        let rec = example_reconciliation(&genes, &species);

        let expected = [
            ("1", Event::Duplication),
            ("2", Event::HorizontalGeneTransfer),
            ("3", Event::Speciation),
            ("4", Event::Duplication),
            ("5", Event::Speciation),
            ("6", Event::Duplication),
            ("7", Event::Speciation),
            ("8", Event::Speciation),
            ("9", Event::Speciation),
            ("10", Event::Duplication),
            ("11", Event::Duplication),
            ("12", Event::Speciation),
            ("13", Event::HorizontalGeneTransfer),
            ("14", Event::Duplication),
            ("x_1", Event::Leaf),
            ("t_2", Event::Leaf),
        ];

        for (name, event) in expected {
            let gene = genes.find_by_name(name).unwrap();
            assert_eq!(classify_event(&input, &rec, gene), event, "gene {name}");
        }
    }

    #[test]
    fn leaf_on_wrong_species_is_invalid() {
        let (genes, species) = example_trees();
        let ancestry = build_ancestor_structure(&species);
        let input = ReconciliationInput::new(&genes, &species, &ancestry).unwrap();
        let mut rec = example_reconciliation(&genes, &species);

        let x1 = genes.find_by_name("x_1").unwrap();
        rec.insert(x1, species.find_by_name("Y").unwrap());
        assert_eq!(classify_event(&input, &rec, x1), Event::Invalid);

        rec.remove(&x1);
        assert_eq!(classify_event(&input, &rec, x1), Event::Invalid);
        assert_eq!(
            classify_event(&input, &rec, genes.find_by_name("3").unwrap()),
            Event::Invalid
        );
    }

    #[test]
    fn child_above_parent_is_invalid() {
        let (genes, species) = example_trees();
        let ancestry = build_ancestor_structure(&species);
        let input = ReconciliationInput::new(&genes, &species, &ancestry).unwrap();
        let mut rec = example_reconciliation(&genes, &species);

        // Gene 8 placed below the image XY of its child 9.
        let eight = genes.find_by_name("8").unwrap();
        rec.insert(eight, species.find_by_name("X").unwrap());
        assert_eq!(classify_event(&input, &rec, eight), Event::Invalid);
    }

    #[test]
    fn unrelated_parent_is_invalid() {
        let (genes, species) = example_trees();
        let ancestry = build_ancestor_structure(&species);
        let input = ReconciliationInput::new(&genes, &species, &ancestry).unwrap();
        let mut rec = example_reconciliation(&genes, &species);

        let seven = genes.find_by_name("7").unwrap();
        rec.insert(seven, species.find_by_name("WT").unwrap());
        assert_eq!(classify_event(&input, &rec, seven), Event::Invalid);
    }
}
