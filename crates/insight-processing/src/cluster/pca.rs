//! Principal component projection for cluster visualization.
//!
//! Projects the standardized feature matrix onto its top-2 principal
//! components via a Jacobi eigen-decomposition of the covariance matrix.
//! The projection is handed to visualization consumers; it never feeds back
//! into clustering.

const JACOBI_SWEEPS: usize = 100;
const JACOBI_TOLERANCE: f64 = 1e-12;

/// Project each row of a row-major matrix onto the top-2 principal
/// components. Requires at least 2 feature columns.
pub fn project_2d(data: &[Vec<f64>]) -> Vec<[f64; 2]> {
    if data.is_empty() {
        return Vec::new();
    }
    let dims = data[0].len();
    debug_assert!(dims >= 2, "projection needs at least 2 features");

    let covariance = covariance_matrix(data, dims);
    let (eigenvalues, eigenvectors) = jacobi_eigen(covariance);

    // Indices of the two largest eigenvalues
    let mut order: Vec<usize> = (0..dims).collect();
    order.sort_by(|&a, &b| {
        eigenvalues[b]
            .partial_cmp(&eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let first = component(&eigenvectors, order[0], dims);
    let second = component(&eigenvectors, order[1], dims);

    data.iter()
        .map(|row| [dot(row, &first), dot(row, &second)])
        .collect()
}

/// Covariance matrix with the N-1 denominator. Means are subtracted even
/// though standardized input is already centered, so the function stays
/// correct for raw matrices too.
fn covariance_matrix(data: &[Vec<f64>], dims: usize) -> Vec<Vec<f64>> {
    let n = data.len();
    let mut means = vec![0.0; dims];
    for row in data {
        for (dim, value) in row.iter().enumerate() {
            means[dim] += value;
        }
    }
    for mean in &mut means {
        *mean /= n as f64;
    }

    let divisor = if n > 1 { (n - 1) as f64 } else { 1.0 };
    let mut covariance = vec![vec![0.0; dims]; dims];
    for row in data {
        for i in 0..dims {
            let di = row[i] - means[i];
            for j in i..dims {
                covariance[i][j] += di * (row[j] - means[j]);
            }
        }
    }
    for i in 0..dims {
        for j in i..dims {
            covariance[i][j] /= divisor;
            covariance[j][i] = covariance[i][j];
        }
    }

    covariance
}

/// Cyclic Jacobi rotations on a symmetric matrix. Returns the eigenvalues
/// (diagonal after convergence) and the accumulated rotation matrix whose
/// columns are the eigenvectors.
fn jacobi_eigen(mut matrix: Vec<Vec<f64>>) -> (Vec<f64>, Vec<Vec<f64>>) {
    let n = matrix.len();
    let mut vectors = identity(n);

    for _ in 0..JACOBI_SWEEPS {
        let off_diagonal: f64 = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .map(|(i, j)| matrix[i][j] * matrix[i][j])
            .sum();
        if off_diagonal < JACOBI_TOLERANCE {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                if matrix[p][q].abs() < JACOBI_TOLERANCE {
                    continue;
                }

                let theta = (matrix[q][q] - matrix[p][p]) / (2.0 * matrix[p][q]);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let mkp = matrix[k][p];
                    let mkq = matrix[k][q];
                    matrix[k][p] = c * mkp - s * mkq;
                    matrix[k][q] = s * mkp + c * mkq;
                }
                for k in 0..n {
                    let mpk = matrix[p][k];
                    let mqk = matrix[q][k];
                    matrix[p][k] = c * mpk - s * mqk;
                    matrix[q][k] = s * mpk + c * mqk;
                }
                for k in 0..n {
                    let vkp = vectors[k][p];
                    let vkq = vectors[k][q];
                    vectors[k][p] = c * vkp - s * vkq;
                    vectors[k][q] = s * vkp + c * vkq;
                }
            }
        }
    }

    let eigenvalues = (0..n).map(|i| matrix[i][i]).collect();
    (eigenvalues, vectors)
}

/// Extract eigenvector `index` as a column, sign-fixed so the entry with
/// the largest magnitude is positive. Eigenvector signs are otherwise
/// arbitrary and would make the projection flip between runs on different
/// platforms.
fn component(vectors: &[Vec<f64>], index: usize, dims: usize) -> Vec<f64> {
    let mut column: Vec<f64> = (0..dims).map(|k| vectors[k][index]).collect();
    let dominant = column
        .iter()
        .cloned()
        .fold(0.0f64, |acc, v| if v.abs() > acc.abs() { v } else { acc });
    if dominant < 0.0 {
        for value in &mut column {
            *value = -*value;
        }
    }
    column
}

fn identity(n: usize) -> Vec<Vec<f64>> {
    let mut matrix = vec![vec![0.0; n]; n];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[i] = 1.0;
    }
    matrix
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
