use crate::math::Matrix;

// Dense layer with just enough bookkeeping for backprop.  During training it
// stores the last input so the backward pass can form weight gradients, and
// it keeps its own Adam moment estimates so optimizer state persists across
// iterations without a separate registry.
pub struct LinearT {
    pub w: Matrix,
    grad: Matrix,
    m: Matrix,
    v: Matrix,
    t: usize,
    last_x: Matrix,
}

impl LinearT {
    pub fn new(in_dim: usize, out_dim: usize) -> Self {
        let w = Matrix::from_vec(
            in_dim,
            out_dim,
            (0..in_dim * out_dim)
                .map(|_| (rand::random::<f32>() - 0.5) * 0.02)
                .collect(),
        );
        let grad = Matrix::zeros(w.rows, w.cols);
        let m = Matrix::zeros(w.rows, w.cols);
        let v = Matrix::zeros(w.rows, w.cols);
        Self {
            w,
            grad,
            m,
            v,
            t: 0,
            last_x: Matrix::zeros(0, 0),
        }
    }

    /// Inference forward pass; caches nothing.
    pub fn forward(&self, x: &Matrix) -> Matrix {
        Matrix::matmul(x, &self.w)
    }

    /// Training forward pass storing the input for the backward pass.
    pub fn forward_train(&mut self, x: &Matrix) -> Matrix {
        self.last_x = x.clone();
        Matrix::matmul(x, &self.w)
    }

    /// Accumulate weight gradients and return the gradient for the input.
    pub fn backward(&mut self, grad_out: &Matrix) -> Matrix {
        let x_t = self.last_x.transpose();
        let grad_w = Matrix::matmul(&x_t, grad_out);
        self.grad = self.grad.add(&grad_w);
        Matrix::matmul(grad_out, &self.w.transpose())
    }

    pub fn zero_grad(&mut self) {
        self.grad = Matrix::zeros(self.grad.rows, self.grad.cols);
    }

    pub fn adam_step(&mut self, lr: f32, beta1: f32, beta2: f32, eps: f32) {
        self.t += 1;
        for i in 0..self.grad.data.len() {
            let g = self.grad.data[i];
            self.m.data[i] = beta1 * self.m.data[i] + (1.0 - beta1) * g;
            self.v.data[i] = beta2 * self.v.data[i] + (1.0 - beta2) * g * g;
            let m_hat = self.m.data[i] / (1.0 - beta1.powi(self.t as i32));
            let v_hat = self.v.data[i] / (1.0 - beta2.powi(self.t as i32));
            self.w.data[i] -= lr * m_hat / (v_hat.sqrt() + eps);
        }
    }
}
