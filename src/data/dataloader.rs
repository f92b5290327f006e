use mnist::MnistBuilder;
use rand::rngs::StdRng;
use rand::Rng;

use crate::math::Matrix;
use crate::palette;

/// Trait describing a dataset that can be loaded entirely into memory.
pub trait Dataset {
    /// Type representing a single sample from the dataset.
    type Item: Clone;

    /// Load all samples for the dataset.
    fn load() -> Vec<Self::Item>;
}

/// Loader for the Fashion-MNIST training images.
///
/// Labels are ignored; adversarial training only consumes the images as raw
/// 8-bit intensities.
pub struct FashionMnist;

impl Dataset for FashionMnist {
    type Item = Vec<u8>;

    fn load() -> Vec<Self::Item> {
        let mnist = MnistBuilder::new()
            .use_fashion_data()
            .download_and_extract()
            .finalize();
        mnist
            .trn_img
            .chunks(28 * 28)
            .map(|img| img.to_vec())
            .collect()
    }
}

/// Quantized training set supporting uniform batch sampling with replacement.
///
/// Images are stored as per-pixel class grids; one-hot expansion happens per
/// sampled batch, keeping the resident set small compared to expanding the
/// whole dataset up front.
pub struct TrainSet {
    images: Vec<Vec<usize>>,
    num_classes: usize,
}

impl TrainSet {
    /// Quantize raw 8-bit images into `num_classes` equal-width bins.
    pub fn from_images(images: &[Vec<u8>], num_classes: usize) -> Self {
        let images = images
            .iter()
            .map(|img| {
                img.iter()
                    .map(|&p| palette::quantize(p, num_classes))
                    .collect()
            })
            .collect();
        Self {
            images,
            num_classes,
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Draw `batch_size` images uniformly at random with replacement and
    /// return them as one-hot rows.
    pub fn sample_batch(&self, rng: &mut StdRng, batch_size: usize) -> Matrix {
        let pixels = self.images[0].len();
        let mut batch = Matrix::zeros(batch_size, pixels * self.num_classes);
        for row in 0..batch_size {
            let idx = rng.gen_range(0..self.images.len());
            let onehot = palette::to_onehot(&self.images[idx], self.num_classes);
            let start = row * batch.cols;
            batch.data[start..start + batch.cols].copy_from_slice(&onehot.data);
        }
        batch
    }
}
