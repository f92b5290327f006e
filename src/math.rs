use std::sync::atomic::{AtomicUsize, Ordering};

static MATRIX_OPS: AtomicUsize = AtomicUsize::new(0);

pub fn reset_matrix_ops() {
    MATRIX_OPS.store(0, Ordering::SeqCst);
}

pub fn matrix_ops_count() -> usize {
    MATRIX_OPS.load(Ordering::SeqCst)
}

pub(crate) fn inc_ops() {
    MATRIX_OPS.fetch_add(1, Ordering::SeqCst);
}

#[derive(Clone, Debug)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f32>,
}

impl Matrix {
    pub fn zeros(r: usize, c: usize) -> Self {
        Matrix {
            rows: r,
            cols: c,
            data: vec![0.0; r * c],
        }
    }

    pub fn from_vec(r: usize, c: usize, v: Vec<f32>) -> Self {
        assert_eq!(v.len(), r * c);
        Matrix {
            rows: r,
            cols: c,
            data: v,
        }
    }

    pub fn get(&self, r: usize, c: usize) -> f32 {
        self.data[r * self.cols + c]
    }

    pub fn set(&mut self, r: usize, c: usize, v: f32) {
        self.data[r * self.cols + c] = v;
    }

    pub fn matmul(a: &Matrix, b: &Matrix) -> Matrix {
        inc_ops();
        assert_eq!(a.cols, b.rows);
        let mut out = vec![0.0; a.rows * b.cols];
        for i in 0..a.rows {
            let a_row = &a.data[i * a.cols..(i + 1) * a.cols];
            for k in 0..a.cols {
                let a_val = a_row[k];
                let b_row = &b.data[k * b.cols..(k + 1) * b.cols];
                for j in 0..b.cols {
                    out[i * b.cols + j] += a_val * b_row[j];
                }
            }
        }
        Matrix::from_vec(a.rows, b.cols, out)
    }

    pub fn add(&self, other: &Matrix) -> Matrix {
        inc_ops();
        assert_eq!(self.rows, other.rows);
        assert_eq!(self.cols, other.cols);
        let mut v = vec![0.0; self.data.len()];
        for i in 0..v.len() {
            v[i] = self.data[i] + other.data[i];
        }
        Matrix::from_vec(self.rows, self.cols, v)
    }

    pub fn transpose(&self) -> Matrix {
        inc_ops();
        let mut v = vec![0.0; self.rows * self.cols];
        for i in 0..self.rows {
            for j in 0..self.cols {
                v[j * self.rows + i] = self.get(i, j);
            }
        }
        Matrix::from_vec(self.cols, self.rows, v)
    }
}

/// Binary cross-entropy over a column of logits against a constant target.
///
/// Returns the average loss, the gradient with respect to the logits and the
/// fraction of rows whose thresholded prediction matches `target`.  The
/// gradient uses the fused sigmoid + BCE form `p - y`, so callers pass raw
/// logits, not probabilities.
pub fn binary_cross_entropy(logits: &Matrix, target: f32) -> (f32, Matrix, f32) {
    let mut grad = Matrix::zeros(logits.rows, logits.cols);
    let mut loss = 0.0f32;
    let mut correct = 0.0f32;
    let n = logits.data.len();
    for i in 0..n {
        let p = 1.0 / (1.0 + (-logits.data[i]).exp());
        loss += if target >= 0.5 {
            -(p + 1e-9).ln()
        } else {
            -((1.0 - p) + 1e-9).ln()
        };
        grad.data[i] = (p - target) / n as f32;
        let pred = if p >= 0.5 { 1.0 } else { 0.0 };
        if (pred - target).abs() < 0.5 {
            correct += 1.0;
        }
    }
    if n > 0 {
        loss /= n as f32;
        correct /= n as f32;
    }
    (loss, grad, correct)
}
