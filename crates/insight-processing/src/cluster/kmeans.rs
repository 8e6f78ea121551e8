//! Seeded k-means clustering.

use rand::prelude::*;
use tracing::debug;

/// Iterative centroid-based clustering with deterministic initialization.
///
/// Centroids start at `k` distinct rows chosen by a seeded RNG, then the
/// usual assign/recompute loop runs until assignments stop changing or the
/// iteration cap is reached. Equidistant ties resolve to the lowest-indexed
/// centroid. Same seed, same input, same labels.
pub struct KMeans {
    k: usize,
    seed: u64,
    max_iterations: usize,
}

impl KMeans {
    pub fn new(k: usize, seed: u64, max_iterations: usize) -> Self {
        Self {
            k: k.max(1),
            seed,
            max_iterations: max_iterations.max(1),
        }
    }

    /// Assign every row of `data` (row-major) to a cluster in `0..k`.
    pub fn fit(&self, data: &[Vec<f64>]) -> Vec<u32> {
        let n_rows = data.len();
        if n_rows == 0 {
            return Vec::new();
        }

        let mut centroids = self.initial_centroids(data);
        let mut labels = vec![0u32; n_rows];

        for iteration in 0..self.max_iterations {
            let new_labels: Vec<u32> = data
                .iter()
                .map(|row| nearest_centroid(row, &centroids))
                .collect();

            let converged = iteration > 0 && new_labels == labels;
            labels = new_labels;
            if converged {
                debug!("K-means converged after {} iterations", iteration);
                break;
            }

            self.recompute_centroids(data, &labels, &mut centroids);
        }

        labels
    }

    /// Pick `k` distinct starting rows with the seeded RNG; when the data
    /// has fewer rows than clusters, cycle through the rows so every
    /// centroid is initialized.
    fn initial_centroids(&self, data: &[Vec<f64>]) -> Vec<Vec<f64>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let indices: Vec<usize> = (0..data.len()).collect();
        let sample_size = self.k.min(data.len());

        let mut chosen: Vec<usize> = indices
            .choose_multiple(&mut rng, sample_size)
            .copied()
            .collect();
        chosen.sort_unstable();

        (0..self.k)
            .map(|i| data[chosen[i % chosen.len()]].clone())
            .collect()
    }

    /// Move each centroid to the mean of its members; a cluster that lost
    /// all members keeps its previous position.
    fn recompute_centroids(&self, data: &[Vec<f64>], labels: &[u32], centroids: &mut [Vec<f64>]) {
        let dims = data[0].len();
        let mut sums = vec![vec![0.0; dims]; self.k];
        let mut counts = vec![0usize; self.k];

        for (row, &label) in data.iter().zip(labels) {
            let cluster = label as usize;
            counts[cluster] += 1;
            for (dim, value) in row.iter().enumerate() {
                sums[cluster][dim] += value;
            }
        }

        for cluster in 0..self.k {
            if counts[cluster] == 0 {
                continue;
            }
            for dim in 0..dims {
                centroids[cluster][dim] = sums[cluster][dim] / counts[cluster] as f64;
            }
        }
    }
}

/// Index of the nearest centroid; strict comparison keeps the lowest index
/// on ties.
fn nearest_centroid(row: &[f64], centroids: &[Vec<f64>]) -> u32 {
    let mut best = 0u32;
    let mut best_distance = f64::INFINITY;

    for (index, centroid) in centroids.iter().enumerate() {
        let distance: f64 = row
            .iter()
            .zip(centroid)
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        if distance < best_distance {
            best_distance = distance;
            best = index as u32;
        }
    }

    best
}
