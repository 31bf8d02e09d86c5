//! End-to-end behavior of the HNSW index through its public API.

use skein_hnsw::{EdgeMode, FixedLevelSampler, HnswConfig, HnswIndex, SharedHnswIndex};
use skein_vector::euclidean_distance;
use std::collections::HashSet;

fn spiral(n: usize) -> Vec<Vec<f32>> {
    (0..n)
        .map(|i| {
            let t = i as f32 * 0.37;
            vec![t.cos() * (1.0 + t), t.sin() * (1.0 + t)]
        })
        .collect()
}

fn build(config: HnswConfig, points: &[Vec<f32>]) -> HnswIndex {
    let mut index = HnswIndex::new(points[0].len(), config).unwrap();
    for p in points {
        index.insert(p).unwrap();
    }
    index
}

#[test]
fn test_euclidean_three_four_five() {
    assert_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
}

#[test]
fn test_three_points_single_layer() {
    let mut index = HnswIndex::new(2, HnswConfig::default().with_m(2))
        .unwrap()
        .with_level_sampler(FixedLevelSampler::ground());

    for p in [[1.0, 2.0], [2.0, 3.0], [3.0, 1.0]] {
        index.insert(&p).unwrap();
    }

    for id in 0..3 {
        assert!(index.neighbors(id, 0).unwrap().len() <= 2);
    }

    let results = index.k_nearest(&[2.0, 2.0], None, 2).unwrap();
    let ids: Vec<_> = results.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![0, 1]);
    assert_eq!(results[0].distance, 1.0);
    assert_eq!(results[1].distance, 1.0);
}

#[test]
fn test_single_point_is_entry() {
    for level in 0..3 {
        let mut index = HnswIndex::new(3, HnswConfig::default())
            .unwrap()
            .with_level_sampler(FixedLevelSampler::new(vec![level]));
        let id = index.insert(&[1.0, 2.0, 3.0]).unwrap();

        assert_eq!(index.entry_point(), Some(id));
        assert_eq!(index.max_level(), level);
        assert_eq!(index.level_of(id).unwrap(), level);
    }

    // Same holds with a randomly sampled level
    let mut index = HnswIndex::new(1, HnswConfig::default().with_seed(3)).unwrap();
    let id = index.insert(&[0.5]).unwrap();
    assert_eq!(index.entry_point(), Some(id));
    assert_eq!(index.max_level(), index.level_of(id).unwrap());
}

#[test]
fn test_k_larger_than_index() {
    let mut index = HnswIndex::new(2, HnswConfig::default())
        .unwrap()
        .with_level_sampler(FixedLevelSampler::ground());
    for p in [[1.0, 2.0], [2.0, 3.0], [3.0, 1.0]] {
        index.insert(&p).unwrap();
    }
    assert_eq!(index.k_nearest(&[0.0, 0.0], None, 10).unwrap().len(), 3);

    assert_eq!(index.k_nearest(&[2.0, 2.0], None, usize::MAX).unwrap().len(), 3);
    assert_eq!(index.k_nearest(&[2.0, 2.0], None, 1 << 60).unwrap().len(), 3);

    let config = HnswConfig::new()
        .with_m(8)
        .with_max_layers(1)
        .with_ef_construction(8);
    let index = build(config, &spiral(6));
    assert_eq!(index.k_nearest(&[0.0, 0.0], None, 20).unwrap().len(), 6);
}

#[test]
fn test_repeated_queries_are_identical() {
    let index = build(HnswConfig::default().with_seed(21), &spiral(80));

    let first = index.k_nearest(&[1.5, -2.0], None, 5).unwrap();
    for _ in 0..10 {
        assert_eq!(index.k_nearest(&[1.5, -2.0], None, 5).unwrap(), first);
    }
}

#[test]
fn test_same_seed_builds_same_graph() {
    let points = spiral(60);
    let a = build(HnswConfig::default().with_seed(99), &points);
    let b = build(HnswConfig::default().with_seed(99), &points);

    assert_eq!(a.dump().to_string(), b.dump().to_string());
    assert_eq!(a.stats(), b.stats());
    assert_eq!(
        a.k_nearest(&[0.0, 0.0], None, 4).unwrap(),
        b.k_nearest(&[0.0, 0.0], None, 4).unwrap()
    );
}

#[test]
fn test_degree_bound_on_every_layer() {
    for m in [1, 2, 5] {
        let config = HnswConfig::default()
            .with_m(m)
            .with_ef_construction(m + 2)
            .with_seed(m as u64);
        let index = build(config, &spiral(120));

        for layer in 0..index.config().max_layers {
            for id in 0..index.len() as u32 {
                let degree = index.neighbors(id, layer).unwrap().len();
                assert!(degree <= m, "node {id} has {degree} neighbors on layer {layer}");
            }
        }
    }
}

#[test]
fn test_layer_membership_is_contiguous() {
    let index = build(HnswConfig::default().with_seed(8), &spiral(150));
    let stats = index.stats();
    let levels: Vec<_> = (0..index.len() as u32)
        .map(|id| index.level_of(id).unwrap())
        .collect();

    for layer_stats in &stats.layers {
        let expected = levels.iter().filter(|&&l| l >= layer_stats.layer).count();
        assert_eq!(layer_stats.nodes, expected, "layer {}", layer_stats.layer);
    }
    assert_eq!(stats.layers[0].nodes, index.len());
}

#[test]
fn test_edge_sources_belong_to_their_layer() {
    let index = build(HnswConfig::default().with_seed(4), &spiral(100));
    for layer in 0..=index.max_level() {
        for (from, to) in index.snapshot_edges(layer) {
            assert!(index.level_of(from).unwrap() >= layer);
            assert_ne!(from, to);
        }
    }
}

#[test]
fn test_symmetric_mode_edges_have_both_ends_present() {
    for seed in 0..5 {
        let config = HnswConfig::default()
            .with_m(3)
            .with_ef_construction(4)
            .with_edge_mode(EdgeMode::Symmetric)
            .with_seed(seed);
        let index = build(config, &spiral(100));

        for layer in 1..=index.max_level() {
            for (from, to) in index.snapshot_edges(layer) {
                assert!(index.level_of(from).unwrap() >= layer);
                assert!(index.level_of(to).unwrap() >= layer);
            }
        }
    }
}

#[test]
fn test_results_exclude_self_and_have_no_duplicates() {
    let index = build(HnswConfig::default().with_m(4).with_seed(17), &spiral(60));

    for id in 0..index.len() as u32 {
        let results = index.k_nearest_to(id, 6).unwrap();
        let ids: HashSet<_> = results.iter().map(|r| r.id).collect();

        assert!(!ids.contains(&id));
        assert_eq!(ids.len(), results.len());
        assert!(results.windows(2).all(|w| w[0].distance <= w[1].distance));
    }
}

#[test]
fn test_shared_index_matches_owned() {
    let points = spiral(40);
    let owned = build(HnswConfig::default().with_seed(12), &points);

    let shared: SharedHnswIndex = HnswIndex::new(2, HnswConfig::default().with_seed(12))
        .unwrap()
        .into();
    for p in &points {
        shared.insert(p).unwrap();
    }

    assert_eq!(shared.stats(), owned.stats());
    assert_eq!(shared.snapshot_edges(0), owned.snapshot_edges(0));
    assert_eq!(
        shared.k_nearest(&[3.0, 3.0], None, 3).unwrap(),
        owned.k_nearest(&[3.0, 3.0], None, 3).unwrap()
    );
}
