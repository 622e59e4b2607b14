use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use isocrab::{Algorithm, Atom, Bond, GraphCache, MatchConfig, Mol, Pattern};
use petgraph::graph::NodeIndex;

const ALGORITHMS: [(&str, Algorithm); 3] = [
    ("vf", Algorithm::Vf),
    ("ullmann", Algorithm::Ullmann),
    ("df", Algorithm::DepthFirst),
];

fn ring(n: usize, aromatic: bool) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    for _ in 0..n {
        mol.add_atom(if aromatic {
            Atom::aromatic(6)
        } else {
            Atom::element(6)
        });
    }
    for i in 0..n {
        let bond = if aromatic { Bond::aromatic() } else { Bond::default() };
        mol.add_bond(NodeIndex::new(i), NodeIndex::new((i + 1) % n), bond);
    }
    mol
}

fn chain(n: usize) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    for _ in 0..n {
        mol.add_atom(Atom::element(6));
    }
    for i in 1..n {
        mol.add_bond(NodeIndex::new(i - 1), NodeIndex::new(i), Bond::default());
    }
    mol
}

/// Linear acene of `rings` fused aromatic rings (naphthalene, anthracene,
/// ...).
fn acene(rings: usize) -> Mol<Atom, Bond> {
    let mut mol = Mol::new();
    let n = 4 * rings + 2;
    for _ in 0..n {
        mol.add_atom(Atom::aromatic(6));
    }
    // top edge 0..=2r, bottom edge 2r+1..n, rungs at even positions
    let top = 2 * rings + 1;
    for i in 1..top {
        mol.add_bond(NodeIndex::new(i - 1), NodeIndex::new(i), Bond::aromatic());
        mol.add_bond(NodeIndex::new(top + i - 1), NodeIndex::new(top + i), Bond::aromatic());
    }
    for i in (0..top).step_by(2) {
        mol.add_bond(NodeIndex::new(i), NodeIndex::new(top + i), Bond::aromatic());
    }
    mol
}

fn bench_substructure(c: &mut Criterion) {
    let benzene = ring(6, true);
    let pentacene = acene(5);

    let mut group = c.benchmark_group("benzene_in_pentacene");
    for (name, algorithm) in ALGORITHMS {
        let config = MatchConfig::substructure().with_algorithm(algorithm);
        let pattern = Pattern::with_config(&benzene, config).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                black_box(
                    pattern
                        .match_all(black_box(&pentacene))
                        .unwrap()
                        .count()
                        .unwrap(),
                )
            })
        });
    }
    group.finish();
}

fn bench_first_match(c: &mut Criterion) {
    let query = chain(8);
    let target = ring(40, false);

    let mut group = c.benchmark_group("first_octane_in_ring40");
    for (name, algorithm) in ALGORITHMS {
        let config = MatchConfig::substructure().with_algorithm(algorithm);
        let pattern = Pattern::with_config(&query, config).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| black_box(pattern.find_match(black_box(&target)).unwrap()))
        });
    }
    group.finish();
}

fn bench_identical(c: &mut Criterion) {
    let anthracene = acene(3);

    let mut group = c.benchmark_group("anthracene_automorphisms");
    for (name, algorithm) in ALGORITHMS {
        let config = MatchConfig::identical().with_algorithm(algorithm);
        let pattern = Pattern::with_config(&anthracene, config).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                black_box(
                    pattern
                        .match_all(black_box(&anthracene))
                        .unwrap()
                        .count()
                        .unwrap(),
                )
            })
        });
    }
    group.finish();
}

fn bench_cached_target(c: &mut Criterion) {
    let query = chain(3);
    let target = ring(40, false);
    let pattern = Pattern::find_substructure(&query).unwrap();

    c.bench_function("unique_propane_in_ring40_uncached", |b| {
        b.iter(|| {
            black_box(
                pattern
                    .match_all(black_box(&target))
                    .unwrap()
                    .unique_atoms()
                    .count()
                    .unwrap(),
            )
        })
    });

    let mut cache = GraphCache::new(Duration::from_secs(60));
    c.bench_function("unique_propane_in_ring40_cached", |b| {
        b.iter(|| {
            black_box(
                pattern
                    .match_all_cached(black_box(&target), &mut cache)
                    .unwrap()
                    .unique_atoms()
                    .count()
                    .unwrap(),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_substructure,
    bench_first_match,
    bench_identical,
    bench_cached_target,
);
criterion_main!(benches);
