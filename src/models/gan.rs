use crate::layers::linear::LinearT;
use crate::layers::{leaky_relu, relu, sigmoid};
use crate::math::{self, Matrix};
use crate::optim::Adam;

/// Maps latent vectors to categorical image scores.
///
/// The output carries one sigmoid score per pixel per class.  The scores are
/// deliberately not normalised across classes (sigmoid, not softmax); the
/// palette codec resolves each pixel by argmax when decoding.
pub struct Generator {
    pub fc1: LinearT,
    pub fc2: LinearT,
    mask: Vec<f32>,
    out_cache: Matrix,
}

impl Generator {
    pub fn new(latent_dim: usize, hidden_dim: usize, output_dim: usize) -> Self {
        Self {
            fc1: LinearT::new(latent_dim, hidden_dim),
            fc2: LinearT::new(hidden_dim, output_dim),
            mask: Vec::new(),
            out_cache: Matrix::zeros(0, 0),
        }
    }

    pub fn forward_train(&mut self, z: &Matrix) -> Matrix {
        let mut h = self.fc1.forward_train(z);
        self.mask = relu::forward_matrix(&mut h);
        let mut out = self.fc2.forward_train(&h);
        sigmoid::forward_matrix(&mut out);
        self.out_cache = out.clone();
        out
    }

    /// Inference pass used when the generator is frozen; caches nothing.
    pub fn predict(&self, z: &Matrix) -> Matrix {
        let mut h = self.fc1.forward(z);
        let _ = relu::forward_matrix(&mut h);
        let mut out = self.fc2.forward(&h);
        sigmoid::forward_matrix(&mut out);
        out
    }

    pub fn backward(&mut self, grad_out: &Matrix) {
        let mut g = grad_out.clone();
        sigmoid::backward(&mut g, &self.out_cache);
        let grad_h = self.fc2.backward(&g);
        let mut grad_h_act = grad_h.clone();
        relu::backward(&mut grad_h_act, &self.mask);
        self.fc1.backward(&grad_h_act);
    }

    pub fn zero_grad(&mut self) {
        self.fc1.zero_grad();
        self.fc2.zero_grad();
    }

    pub fn parameters(&mut self) -> Vec<&mut LinearT> {
        vec![&mut self.fc1, &mut self.fc2]
    }
}

/// Maps categorical image scores to a single realism logit.
pub struct Discriminator {
    pub fc1: LinearT,
    pub fc2: LinearT,
    mask: Vec<f32>,
}

impl Discriminator {
    pub fn new(input_dim: usize, hidden_dim: usize) -> Self {
        Self {
            fc1: LinearT::new(input_dim, hidden_dim),
            fc2: LinearT::new(hidden_dim, 1),
            mask: Vec::new(),
        }
    }

    pub fn forward_train(&mut self, x: &Matrix) -> Matrix {
        let mut h = self.fc1.forward_train(x);
        self.mask = leaky_relu::forward_matrix(&mut h);
        self.fc2.forward_train(&h)
    }

    /// Inference pass returning raw logits; caches nothing.
    pub fn predict(&self, x: &Matrix) -> Matrix {
        let mut h = self.fc1.forward(x);
        let _ = leaky_relu::forward_matrix(&mut h);
        self.fc2.forward(&h)
    }

    pub fn backward(&mut self, grad_out: &Matrix) -> Matrix {
        let grad_fc = self.fc2.backward(grad_out);
        let mut grad_h = grad_fc.clone();
        leaky_relu::backward(&mut grad_h, &self.mask);
        self.fc1.backward(&grad_h)
    }

    pub fn zero_grad(&mut self) {
        self.fc1.zero_grad();
        self.fc2.zero_grad();
    }

    pub fn parameters(&mut self) -> Vec<&mut LinearT> {
        vec![&mut self.fc1, &mut self.fc2]
    }
}

/// Generator/discriminator pair with explicit ownership of both models.
///
/// Parameter updates happen through two disjoint optimizer scopes: a
/// discriminator step never touches generator weights and vice versa, so no
/// trainable flag has to be toggled on a shared instance.
pub struct Gan {
    pub generator: Generator,
    pub discriminator: Discriminator,
    pub latent_dim: usize,
}

impl Gan {
    pub fn new(latent_dim: usize, hidden_dim: usize, image_dim: usize) -> Self {
        Self {
            generator: Generator::new(latent_dim, hidden_dim, image_dim),
            discriminator: Discriminator::new(image_dim, hidden_dim),
            latent_dim,
        }
    }

    /// One discriminator optimizer step on `batch` against a constant label.
    ///
    /// Returns `(loss, accuracy)` for the batch.  The generator is not part
    /// of this update; fake batches are produced beforehand with
    /// [`Generator::predict`].
    pub fn discriminator_step(
        &mut self,
        batch: &Matrix,
        label: f32,
        opt: &mut Adam,
    ) -> (f32, f32) {
        self.discriminator.zero_grad();
        let logits = self.discriminator.forward_train(batch);
        let (loss, grad, acc) = math::binary_cross_entropy(&logits, label);
        self.discriminator.backward(&grad);
        opt.step(&mut self.discriminator.parameters());
        (loss, acc)
    }

    /// One generator optimizer step rewarding fooled discriminators.
    ///
    /// The error signal flows through the discriminator (label 1.0 on
    /// generated images) but only generator parameters are stepped.
    pub fn generator_step(&mut self, noise: &Matrix, opt: &mut Adam) -> f32 {
        self.generator.zero_grad();
        self.discriminator.zero_grad();
        let fake = self.generator.forward_train(noise);
        let logits = self.discriminator.forward_train(&fake);
        let (loss, grad, _) = math::binary_cross_entropy(&logits, 1.0);
        let grad_input = self.discriminator.backward(&grad);
        self.generator.backward(&grad_input);
        opt.step(&mut self.generator.parameters());
        loss
    }
}
