//! Principal axes of a point cloud.

use glam::DVec3;
use nalgebra::{Matrix3, SymmetricEigen};

/// Off-diagonal magnitude, relative to the trace, below which a covariance
/// matrix is treated as already diagonal.
const DIAGONAL_TOLERANCE: f64 = 1e-12;

/// Eigenvalues and unit eigenvectors of a symmetric 3x3 matrix.
///
/// The vectors form a right-handed orthonormal basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenDecomposition {
    pub values: [f64; 3],
    pub vectors: [DVec3; 3],
}

impl EigenDecomposition {
    /// True when eigenvalues `i` and `j` are equal up to `relative` of the largest one.
    pub fn is_degenerate_pair(&self, i: usize, j: usize, relative: f64) -> bool {
        let scale = self.values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
        if scale == 0.0 {
            return true;
        }
        (self.values[i] - self.values[j]).abs() <= relative * scale
    }
}

/// Covariance of a point cloud about its mean.
pub fn covariance(points: &[DVec3]) -> Matrix3<f64> {
    let mut cov = Matrix3::zeros();
    if points.is_empty() {
        return cov;
    }
    let mean = points.iter().copied().sum::<DVec3>() / points.len() as f64;
    for p in points {
        let d = *p - mean;
        let d = [d.x, d.y, d.z];
        for r in 0..3 {
            for c in 0..3 {
                cov[(r, c)] += d[r] * d[c];
            }
        }
    }
    cov / points.len() as f64
}

/// Eigen-decompose a symmetric matrix.
///
/// An already diagonal matrix keeps the world axes in x, y, z order.
/// Otherwise the axes are sorted by decreasing eigenvalue, the first two
/// are oriented so their largest component is positive, and the third is
/// their cross product.
pub fn symmetric_eigen(m: &Matrix3<f64>) -> EigenDecomposition {
    let scale = m.trace().abs().max(f64::MIN_POSITIVE);
    let off_diagonal = m[(0, 1)].abs().max(m[(0, 2)].abs()).max(m[(1, 2)].abs());
    if off_diagonal <= DIAGONAL_TOLERANCE * scale {
        return EigenDecomposition {
            values: [m[(0, 0)], m[(1, 1)], m[(2, 2)]],
            vectors: [DVec3::X, DVec3::Y, DVec3::Z],
        };
    }

    let eigen = SymmetricEigen::new(*m);
    let mut pairs: Vec<(f64, DVec3)> = (0..3)
        .map(|i| {
            let c = eigen.eigenvectors.column(i);
            (eigen.eigenvalues[i], DVec3::new(c[0], c[1], c[2]).normalize())
        })
        .collect();
    pairs.sort_by(|a, b| b.0.total_cmp(&a.0));

    let first = orient(pairs[0].1);
    let second = orient(pairs[1].1);
    EigenDecomposition {
        values: [pairs[0].0, pairs[1].0, pairs[2].0],
        vectors: [first, second, first.cross(second)],
    }
}

/// Flip `v` so that its largest-magnitude component is positive.
fn orient(v: DVec3) -> DVec3 {
    let a = v.abs();
    let dominant = if a.x >= a.y && a.x >= a.z {
        v.x
    } else if a.y >= a.z {
        v.y
    } else {
        v.z
    };
    if dominant < 0.0 {
        -v
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_diagonal_fast_path() {
        let m = Matrix3::new(4.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 9.0);
        let e = symmetric_eigen(&m);
        assert_eq!(e.values, [4.0, 1.0, 9.0]);
        assert_eq!(e.vectors, [DVec3::X, DVec3::Y, DVec3::Z]);
    }

    #[test]
    fn test_rotated_matrix() {
        // diag(9, 1, 4) rotated by 45 degrees about z
        let m = Matrix3::new(5.0, 4.0, 0.0, 4.0, 5.0, 0.0, 0.0, 0.0, 4.0);
        let e = symmetric_eigen(&m);
        assert_relative_eq!(e.values[0], 9.0, epsilon = 1e-9);
        assert_relative_eq!(e.values[1], 4.0, epsilon = 1e-9);
        assert_relative_eq!(e.values[2], 1.0, epsilon = 1e-9);
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert!((e.vectors[0] - DVec3::new(s, s, 0.0)).length() < 1e-9);
        assert!((e.vectors[1] - DVec3::Z).length() < 1e-9);
        assert!((e.vectors[2] - DVec3::new(s, -s, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_orthonormal() {
        let m = Matrix3::new(2.0, 0.3, 0.1, 0.3, 1.5, -0.2, 0.1, -0.2, 0.7);
        let e = symmetric_eigen(&m);
        for i in 0..3 {
            assert_relative_eq!(e.vectors[i].length(), 1.0, epsilon = 1e-9);
            for j in (i + 1)..3 {
                assert!(e.vectors[i].dot(e.vectors[j]).abs() < 1e-9);
            }
        }
        assert!((e.vectors[0].cross(e.vectors[1]) - e.vectors[2]).length() < 1e-9);
    }

    #[test]
    fn test_covariance_of_box_corners() {
        let points: Vec<DVec3> = [0.0, 10.0]
            .iter()
            .flat_map(|&x| [0.0, 0.5].map(move |y| (x, y)))
            .flat_map(|(x, y)| [0.0, 2.0].map(move |z| DVec3::new(x, y, z)))
            .collect();
        let cov = covariance(&points);
        assert_relative_eq!(cov[(0, 0)], 25.0);
        assert_relative_eq!(cov[(1, 1)], 0.0625);
        assert_relative_eq!(cov[(2, 2)], 1.0);
        assert_eq!(cov[(0, 1)], 0.0);
    }

    #[test]
    fn test_degenerate_pair() {
        let m = Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 3.0);
        let e = symmetric_eigen(&m);
        assert!(e.is_degenerate_pair(0, 1, 1e-6));
        assert!(!e.is_degenerate_pair(0, 2, 1e-6));
    }
}
