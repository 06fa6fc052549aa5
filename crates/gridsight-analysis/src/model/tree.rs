//! A single isolation tree.

use rand::Rng;

use gridsight_core::constants::EULER_GAMMA;

use crate::features::FeatureMatrix;

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        size: usize,
    },
}

/// Randomly partitions a row sample until each row is isolated or the
/// depth limit is hit. Rows with `x[feature] <= threshold` go left.
#[derive(Debug, Clone)]
pub struct IsolationTree {
    nodes: Vec<Node>,
}

impl IsolationTree {
    /// Grow a tree over the rows named by `sample`. The slice is reordered.
    pub fn build<R: Rng>(
        matrix: &FeatureMatrix,
        sample: &mut [usize],
        max_depth: usize,
        rng: &mut R,
    ) -> Self {
        let mut nodes = Vec::new();
        grow(&mut nodes, matrix, sample, 0, max_depth, rng);
        Self { nodes }
    }

    /// Edges from the root to the row's leaf, plus the expected remaining
    /// depth of an unsplit leaf of that size.
    pub fn path_length(&self, row: &[f64]) -> f64 {
        let mut node = 0;
        let mut depth = 0.0;
        loop {
            match &self.nodes[node] {
                Node::Leaf { size } => return depth + average_path_length(*size),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row.get(*feature).copied().unwrap_or(f64::NAN);
                    node = if value <= *threshold { *left } else { *right };
                    depth += 1.0;
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

fn grow<R: Rng>(
    nodes: &mut Vec<Node>,
    matrix: &FeatureMatrix,
    sample: &mut [usize],
    depth: usize,
    max_depth: usize,
    rng: &mut R,
) -> usize {
    let id = nodes.len();
    nodes.push(Node::Leaf { size: sample.len() });
    if depth >= max_depth || sample.len() <= 1 {
        return id;
    }

    // Only features that still vary inside this node can split it.
    let mut candidates: Vec<(usize, f64, f64)> = Vec::new();
    for feature in 0..matrix.feature_count() {
        let (lo, hi) = sample.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &i| {
            let v = matrix.value(i, feature).unwrap_or(f64::NAN);
            (lo.min(v), hi.max(v))
        });
        if hi > lo {
            candidates.push((feature, lo, hi));
        }
    }
    if candidates.is_empty() {
        return id;
    }

    let (feature, lo, hi) = candidates[rng.gen_range(0..candidates.len())];
    let threshold = split_threshold(lo, hi, rng);
    let mid = partition(sample, |i| {
        matrix.value(i, feature).map_or(false, |v| v <= threshold)
    });

    let (left_rows, right_rows) = sample.split_at_mut(mid);
    let left = grow(nodes, matrix, left_rows, depth + 1, max_depth, rng);
    let right = grow(nodes, matrix, right_rows, depth + 1, max_depth, rng);
    nodes[id] = Node::Split {
        feature,
        threshold,
        left,
        right,
    };
    id
}

/// Uniform draw in `[lo, hi]`. Columns spanning more than `f64::MAX`
/// interpolate between the bounds instead of sampling the overflowing width.
fn split_threshold<R: Rng>(lo: f64, hi: f64, rng: &mut R) -> f64 {
    if (hi - lo).is_finite() {
        return rng.gen_range(lo..hi);
    }
    let t: f64 = rng.gen();
    (lo * (1.0 - t) + hi * t).clamp(lo, hi)
}

/// Move every element satisfying `goes_left` to the front. Returns the
/// number of such elements.
fn partition(rows: &mut [usize], goes_left: impl Fn(usize) -> bool) -> usize {
    let mut mid = 0;
    for k in 0..rows.len() {
        if goes_left(rows[k]) {
            rows.swap(mid, k);
            mid += 1;
        }
    }
    mid
}

/// Average path length of an unsuccessful BST search over `n` items,
/// `c(n)`. Normalizes isolation depths.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}
