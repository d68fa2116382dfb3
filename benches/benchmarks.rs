use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dtlrec::reconciliation::{reconcile_dtl, reconcile_lca, ReconciliationInput};
use dtlrec::{build_ancestor_structure, CostVector, NodeId, Tree};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Random binary tree with `leaves` leaves, grown by splitting leaves.
fn random_shape(rng: &mut SmallRng, leaves: usize) -> Tree {
    let mut tree = Tree::new("");
    let mut frontier: Vec<NodeId> = vec![tree.root()];
    while frontier.len() < leaves {
        let node = frontier.swap_remove(rng.gen_range(0..frontier.len()));
        frontier.push(tree.add_node(node, ""));
        frontier.push(tree.add_node(node, ""));
    }
    tree
}

/// Species tree with `species_leaves` leaves and a gene tree with
/// `gene_leaves` leaves scattered over it.
fn tree_pair(seed: u64, species_leaves: usize, gene_leaves: usize) -> (Tree, Tree) {
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut species = random_shape(&mut rng, species_leaves);
    for node in 0..species.len() as NodeId {
        let name = format!("S{node}");
        species.name[node as usize] = name;
    }
    let homes: Vec<NodeId> = species.leaves().collect();

    let mut genes = random_shape(&mut rng, gene_leaves);
    for node in 0..genes.len() as NodeId {
        if genes.is_leaf(node) {
            let home = homes[rng.gen_range(0..homes.len())];
            let name = format!("s{home}_{node}");
            genes.name[node as usize] = name;
        }
    }
    genes.label_species_from_names();

    (genes, species)
}

fn bench_ancestor_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("ancestor_queries");
    group.sample_size(10);

    let (_, species) = tree_pair(42, 1_000, 1);

    group.bench_function("build_1k_leaves", |b| {
        b.iter(|| build_ancestor_structure(black_box(&species)));
    });

    let anc = build_ancestor_structure(&species);
    let n = species.len() as NodeId;
    group.bench_function("all_pairs_lca_1k_leaves", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            for a in 0..n {
                for d in 0..n {
                    acc += u64::from(anc.lowest_common_ancestor(black_box(a), black_box(d)));
                }
            }
            acc
        });
    });

    group.finish();
}

fn bench_reconcile_lca(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile_lca");
    group.sample_size(10);

    let (genes, species) = tree_pair(42, 1_000, 10_000);
    let anc = build_ancestor_structure(&species);
    let input = ReconciliationInput::new(&genes, &species, &anc).unwrap();

    group.bench_function("10k_genes_1k_species", |b| {
        b.iter(|| reconcile_lca(black_box(&input)).unwrap());
    });

    group.finish();
}

fn bench_reconcile_dtl(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile_dtl");
    group.sample_size(10);

    for (species_leaves, gene_leaves) in [(16, 32), (32, 64), (64, 128)] {
        let (genes, species) = tree_pair(42, species_leaves, gene_leaves);
        let anc = build_ancestor_structure(&species);
        let input = ReconciliationInput::new(&genes, &species, &anc).unwrap();
        let costs = CostVector::default().with_duplication(2u64).with_transfer(3u64);

        group.bench_function(format!("{gene_leaves}_genes_{species_leaves}_species"), |b| {
            b.iter(|| reconcile_dtl(black_box(&input), black_box(&costs)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_ancestor_queries,
    bench_reconcile_lca,
    bench_reconcile_dtl
);
criterion_main!(benches);
