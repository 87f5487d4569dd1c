// ABOUTME: Standard scaler and a deterministic random forest of gini CART trees
// ABOUTME: Bootstrap sampling and per-split feature subsetting, trees fitted in parallel with rayon
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulseboard Contributors

//! Classifier internals for the risk engine.
//!
//! The forest is a plain binary-classification ensemble: each tree trains
//! on a bootstrap resample and considers a random sqrt-sized feature subset
//! at every split. Tree RNGs are derived from the caller's seed plus the
//! tree index, so a fitted forest is reproducible regardless of how rayon
//! schedules the work.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Depth cap for individual trees
const MAX_DEPTH: usize = 8;

/// Nodes with fewer samples than this become leaves
const MIN_SAMPLES_SPLIT: usize = 4;

/// Minimum gini gain for a split to be accepted
const MIN_GAIN: f64 = 1e-12;

/// Per-column zero-mean unit-variance scaler
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Fit column means and standard deviations.
    ///
    /// Constant columns keep a standard deviation of 1.0 so transforming
    /// never divides by zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::float_cmp)]
    pub fn fit(rows: &[[f64; 15]]) -> Self {
        let n_cols = 15;
        let n = rows.len().max(1) as f64;

        let mut means = vec![0.0; n_cols];
        for row in rows {
            for (m, v) in means.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut means {
            *m /= n;
        }

        let mut stds = vec![0.0; n_cols];
        for row in rows {
            for ((s, v), m) in stds.iter_mut().zip(row).zip(&means) {
                let d = v - m;
                *s += d * d;
            }
        }
        for s in &mut stds {
            *s = (*s / n).sqrt();
            if *s == 0.0 {
                *s = 1.0;
            }
        }

        Self { means, stds }
    }

    /// Scale one feature row
    #[must_use]
    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(&self.means)
            .zip(&self.stds)
            .map(|((v, m), s)| (v - m) / s)
            .collect()
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        probability: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone)]
struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    fn predict(&self, features: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { probability } => return *probability,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Bagged ensemble of gini CART trees for binary classification
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit `n_trees` trees on bootstrap resamples of `rows`.
    ///
    /// Deterministic for a fixed `seed`; trees are fitted in parallel.
    #[must_use]
    pub fn fit(rows: &[Vec<f64>], labels: &[bool], n_trees: usize, seed: u64) -> Self {
        let trees = (0..n_trees)
            .into_par_iter()
            .map(|tree_index| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(tree_index as u64));
                fit_tree(rows, labels, &mut rng)
            })
            .collect();
        Self { trees }
    }

    /// Positive-class probability, averaged over all trees
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn predict_proba(&self, features: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let total: f64 = self.trees.iter().map(|t| t.predict(features)).sum();
        total / self.trees.len() as f64
    }
}

fn fit_tree(rows: &[Vec<f64>], labels: &[bool], rng: &mut ChaCha8Rng) -> DecisionTree {
    let n = rows.len();
    let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();

    let mut nodes = Vec::new();
    grow(rows, labels, &sample, 0, rng, &mut nodes);
    DecisionTree { nodes }
}

/// Grow a subtree over `indices`, returning its root node index
#[allow(clippy::float_cmp)]
fn grow(
    rows: &[Vec<f64>],
    labels: &[bool],
    indices: &[usize],
    depth: usize,
    rng: &mut ChaCha8Rng,
    nodes: &mut Vec<Node>,
) -> usize {
    let probability = positive_fraction(labels, indices);
    let is_pure = probability == 0.0 || probability == 1.0;

    if depth >= MAX_DEPTH || indices.len() < MIN_SAMPLES_SPLIT || is_pure {
        nodes.push(Node::Leaf { probability });
        return nodes.len() - 1;
    }

    let Some(split) = best_split(rows, labels, indices, rng) else {
        nodes.push(Node::Leaf { probability });
        return nodes.len() - 1;
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .partition(|&&i| rows[i][split.feature] <= split.threshold);

    // Reserve this node's slot before recursing so child indices are stable.
    nodes.push(Node::Leaf { probability });
    let slot = nodes.len() - 1;
    let left = grow(rows, labels, &left_idx, depth + 1, rng, nodes);
    let right = grow(rows, labels, &right_idx, depth + 1, rng, nodes);
    nodes[slot] = Node::Split {
        feature: split.feature,
        threshold: split.threshold,
        left,
        right,
    };
    slot
}

struct SplitChoice {
    feature: usize,
    threshold: f64,
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn best_split(
    rows: &[Vec<f64>],
    labels: &[bool],
    indices: &[usize],
    rng: &mut ChaCha8Rng,
) -> Option<SplitChoice> {
    let n_features = rows.first().map_or(0, Vec::len);
    if n_features == 0 {
        return None;
    }
    let subset_size = ((n_features as f64).sqrt().floor() as usize).max(1);

    let mut candidates: Vec<usize> = (0..n_features).collect();
    // Partial Fisher-Yates: the first subset_size entries become the subset.
    for i in 0..subset_size {
        let j = rng.gen_range(i..n_features);
        candidates.swap(i, j);
    }

    let total = indices.len() as f64;
    let total_pos = indices.iter().filter(|&&i| labels[i]).count() as f64;
    let base_impurity = gini(total_pos, total);

    let mut best: Option<(f64, SplitChoice)> = None;
    for &feature in &candidates[..subset_size] {
        let mut column: Vec<(f64, bool)> = indices
            .iter()
            .map(|&i| (rows[i][feature], labels[i]))
            .collect();
        column.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left_count = 0.0;
        let mut left_pos = 0.0;
        for window in 0..column.len() - 1 {
            left_count += 1.0;
            if column[window].1 {
                left_pos += 1.0;
            }
            if column[window].0 == column[window + 1].0 {
                continue;
            }

            let right_count = total - left_count;
            let right_pos = total_pos - left_pos;
            let weighted = (left_count * gini(left_pos, left_count)
                + right_count * gini(right_pos, right_count))
                / total;
            let gain = base_impurity - weighted;
            if gain > MIN_GAIN && best.as_ref().is_none_or(|(g, _)| gain > *g) {
                let threshold = (column[window].0 + column[window + 1].0) / 2.0;
                best = Some((gain, SplitChoice { feature, threshold }));
            }
        }
    }

    best.map(|(_, choice)| choice)
}

fn gini(positives: f64, count: f64) -> f64 {
    if count <= 0.0 {
        return 0.0;
    }
    let p = positives / count;
    2.0 * p * (1.0 - p)
}

#[allow(clippy::cast_precision_loss)]
fn positive_fraction(labels: &[bool], indices: &[usize]) -> f64 {
    if indices.is_empty() {
        return 0.0;
    }
    let positives = indices.iter().filter(|&&i| labels[i]).count();
    positives as f64 / indices.len() as f64
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn separable_data() -> (Vec<Vec<f64>>, Vec<bool>) {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..100 {
            let x = f64::from(i) / 10.0;
            rows.push(vec![x, 1.0]);
            labels.push(x > 5.0);
        }
        (rows, labels)
    }

    #[test]
    fn scaler_centers_and_scales() {
        let rows = vec![[1.0; 15], [3.0; 15]];
        let scaler = StandardScaler::fit(&rows);
        let scaled = scaler.transform(&[2.0; 15]);
        for v in scaled {
            assert!(v.abs() < 1e-9);
        }
    }

    #[test]
    fn scaler_handles_constant_columns() {
        let rows = vec![[5.0; 15]; 10];
        let scaler = StandardScaler::fit(&rows);
        let scaled = scaler.transform(&[5.0; 15]);
        assert!(scaled.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn forest_learns_a_separable_boundary() {
        let (rows, labels) = separable_data();
        let forest = RandomForest::fit(&rows, &labels, 25, 1);
        assert!(forest.predict_proba(&[9.0, 1.0]) > 0.8);
        assert!(forest.predict_proba(&[1.0, 1.0]) < 0.2);
    }

    #[test]
    fn fitting_is_deterministic_for_a_seed() {
        let (rows, labels) = separable_data();
        let a = RandomForest::fit(&rows, &labels, 10, 3);
        let b = RandomForest::fit(&rows, &labels, 10, 3);
        for x in [0.5_f64, 2.5, 4.9, 5.1, 7.5] {
            assert!((a.predict_proba(&[x, 1.0]) - b.predict_proba(&[x, 1.0])).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn probabilities_stay_in_range() {
        let (rows, labels) = separable_data();
        let forest = RandomForest::fit(&rows, &labels, 10, 5);
        for x in 0..100 {
            let p = forest.predict_proba(&[f64::from(x) / 10.0, 1.0]);
            assert!((0.0..=1.0).contains(&p));
        }
    }
}
