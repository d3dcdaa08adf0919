//! Bagged regression trees
//!
//! A small bootstrap-aggregated ensemble of variance-reduction regression
//! trees. The feature set is tiny (4 features) and training sets are tens
//! of samples, so exact split search over every candidate threshold is
//! cheap and the fit completes in well under a second.
//!
//! Trees are stored as flat node arrays for compact serde output; the
//! whole forest round-trips through the JSON checkpoint.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::types::NUM_FEATURES;

/// Forest fitting hyperparameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForestConfig {
    /// Number of bootstrap trees.
    pub trees: usize,
    /// Maximum depth of each tree (root is depth 0).
    pub max_depth: usize,
    /// Minimum samples on each side of a split.
    pub min_leaf: usize,
    /// Bootstrap resampling seed.
    pub seed: u64,
}

/// One node of a flat-array regression tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A single regression tree over the engine feature vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    fn predict(&self, features: &[f64; NUM_FEATURES]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Bootstrap-aggregated regression forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionForest {
    config: ForestConfig,
    trees: Vec<RegressionTree>,
}

impl RegressionForest {
    /// Fit a forest over per-sample feature rows and targets.
    ///
    /// Deterministic for a fixed config seed and sample order. Caller
    /// guarantees `features` is non-empty and the same length as
    /// `targets` (the regressor enforces the minimum sample count).
    pub fn fit(
        features: &[[f64; NUM_FEATURES]],
        targets: &[f64],
        config: ForestConfig,
    ) -> RegressionForest {
        debug_assert_eq!(features.len(), targets.len());
        debug_assert!(!features.is_empty());

        let mut rng = StdRng::seed_from_u64(config.seed);
        let n = features.len();

        let trees = (0..config.trees)
            .map(|_| {
                let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                grow_tree(features, targets, &indices, &config)
            })
            .collect();

        RegressionForest { config, trees }
    }

    /// Ensemble prediction: unweighted mean over all trees.
    pub fn predict(&self, features: &[f64; NUM_FEATURES]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict(features)).sum();
        sum / self.trees.len() as f64
    }

    /// Hyperparameters the forest was fitted with.
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Number of fitted trees.
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }
}

/// Grow one tree over a bootstrap index sample.
fn grow_tree(
    features: &[[f64; NUM_FEATURES]],
    targets: &[f64],
    indices: &[usize],
    config: &ForestConfig,
) -> RegressionTree {
    let mut nodes = Vec::new();
    grow_node(features, targets, indices, 0, config, &mut nodes);
    RegressionTree { nodes }
}

/// Recursively grow a subtree; returns the index of the created node.
fn grow_node(
    features: &[[f64; NUM_FEATURES]],
    targets: &[f64],
    indices: &[usize],
    depth: usize,
    config: &ForestConfig,
    nodes: &mut Vec<Node>,
) -> usize {
    let mean = mean_target(targets, indices);

    if depth >= config.max_depth || indices.len() < 2 * config.min_leaf {
        nodes.push(Node::Leaf { value: mean });
        return nodes.len() - 1;
    }

    let split = match best_split(features, targets, indices, config.min_leaf) {
        Some(s) => s,
        // Pure or unsplittable node.
        None => {
            nodes.push(Node::Leaf { value: mean });
            return nodes.len() - 1;
        }
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .copied()
        .partition(|&i| features[i][split.feature] <= split.threshold);

    // Reserve the split node's slot before growing children.
    let node_idx = nodes.len();
    nodes.push(Node::Leaf { value: mean });
    let left = grow_node(features, targets, &left_idx, depth + 1, config, nodes);
    let right = grow_node(features, targets, &right_idx, depth + 1, config, nodes);
    nodes[node_idx] = Node::Split {
        feature: split.feature,
        threshold: split.threshold,
        left,
        right,
    };
    node_idx
}

struct Split {
    feature: usize,
    threshold: f64,
}

/// Exhaustive split search: every midpoint between distinct consecutive
/// feature values, scored by sum-of-squared-error reduction.
fn best_split(
    features: &[[f64; NUM_FEATURES]],
    targets: &[f64],
    indices: &[usize],
    min_leaf: usize,
) -> Option<Split> {
    let parent_sse = sse(targets, indices);
    if parent_sse < 1e-12 {
        return None;
    }

    let mut best: Option<(f64, Split)> = None;

    for feature in 0..NUM_FEATURES {
        let mut values: Vec<f64> = indices.iter().map(|&i| features[i][feature]).collect();
        values.sort_by(|a, b| a.partial_cmp(b).expect("finite feature values"));
        values.dedup();

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;

            let left: Vec<usize> = indices
                .iter()
                .copied()
                .filter(|&i| features[i][feature] <= threshold)
                .collect();
            if left.len() < min_leaf || indices.len() - left.len() < min_leaf {
                continue;
            }
            let right: Vec<usize> = indices
                .iter()
                .copied()
                .filter(|&i| features[i][feature] > threshold)
                .collect();

            let child_sse = sse(targets, &left) + sse(targets, &right);
            let reduction = parent_sse - child_sse;

            match &best {
                Some((best_reduction, _)) if reduction <= *best_reduction => {}
                _ => best = Some((reduction, Split { feature, threshold })),
            }
        }
    }

    best.filter(|(reduction, _)| *reduction > 1e-12)
        .map(|(_, split)| split)
}

fn mean_target(targets: &[f64], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    indices.iter().map(|&i| targets[i]).sum::<f64>() / indices.len() as f64
}

fn sse(targets: &[f64], indices: &[usize]) -> f64 {
    let mean = mean_target(targets, indices);
    indices
        .iter()
        .map(|&i| {
            let d = targets[i] - mean;
            d * d
        })
        .sum()
}
