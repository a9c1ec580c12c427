//! Flat row-major kernels used by the network's hot loops.
//!
//! Weight matrices are stored as a single `Vec<f64>` of `rows * cols` values,
//! row `r` occupying `[r * cols, (r + 1) * cols)`.  Every reduction accumulates
//! left to right over the row, so results are reproducible for fixed inputs.

use rand::Rng;

/// `out[r] = sum_c weights[r * cols + c] * x[c]` for every row.
///
/// `out.len()` is the row count; `x.len()` is the column count.
pub fn mat_vec(weights: &[f64], x: &[f64], out: &mut [f64]) {
    let cols = x.len();
    debug_assert_eq!(weights.len(), out.len() * cols);
    for (row, o) in weights.chunks_exact(cols).zip(out.iter_mut()) {
        *o = dot(row, x);
    }
}

/// `out[c] = sum_r v[r] * weights[r * cols + c]`, contracting over rows.
///
/// `v.len()` is the row count; `out.len()` is the column count.
pub fn vec_mat(v: &[f64], weights: &[f64], out: &mut [f64]) {
    let cols = out.len();
    debug_assert_eq!(weights.len(), v.len() * cols);
    out.iter_mut().for_each(|o| *o = 0.0);
    for (&scale, row) in v.iter().zip(weights.chunks_exact(cols)) {
        for (o, &w) in out.iter_mut().zip(row) {
            *o += scale * w;
        }
    }
}

#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).fold(0.0, |acc, (x, y)| acc + x * y)
}

/// Fills `out` with values drawn uniformly from `[-bound, bound]`.
pub fn fill_uniform<R: Rng + ?Sized>(rng: &mut R, bound: f64, out: &mut [f64]) {
    for w in out.iter_mut() {
        *w = rng.gen_range(-bound..=bound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn mat_vec_row_major() {
        // [[1, 2, 3], [4, 5, 6]] · [1, 0, -1]
        let w = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut out = [0.0; 2];
        mat_vec(&w, &[1.0, 0.0, -1.0], &mut out);
        assert_eq!(out, [-2.0, -2.0]);
    }

    #[test]
    fn vec_mat_contracts_rows() {
        // [2, -1] · [[1, 2, 3], [4, 5, 6]]
        let w = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut out = [9.0; 3];
        vec_mat(&[2.0, -1.0], &w, &mut out);
        assert_eq!(out, [-2.0, -1.0, 0.0]);
    }

    #[test]
    fn uniform_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut out = vec![0.0; 500];
        fill_uniform(&mut rng, 0.25, &mut out);
        assert!(out.iter().all(|w| (-0.25..=0.25).contains(w)));
        assert!(out.iter().any(|&w| w != out[0]));
    }
}
