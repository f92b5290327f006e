use serde::Deserialize;
use std::fs;

/// Training configuration loaded from a TOML or JSON file.
///
/// Defaults mirror the fixed constants of the original training script.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of training iterations (one discriminator plus one generator
    /// sub-step each; not a full dataset pass).
    pub epochs: usize,
    /// Images per batch.
    pub batch_size: usize,
    /// Render sample sheets every this many epochs, including epoch 0.
    /// A value of 0 disables rendering.
    pub save_interval: usize,
    /// Length of the latent noise vector.
    pub latent_dim: usize,
    /// Number of discrete color classes; must match the palette length.
    pub num_classes: usize,
    /// Side length of the square images.
    pub img_size: usize,
    /// Hidden width of both dense networks.
    pub hidden_dim: usize,
    /// Adam learning rate.
    pub lr: f32,
    /// Adam first-moment decay.
    pub beta1: f32,
    /// Generator checkpoint path.
    pub generator_path: String,
    /// Discriminator checkpoint path.
    pub discriminator_path: String,
    /// Directory receiving the rendered sample sheets.
    pub images_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epochs: 4000,
            batch_size: 32,
            save_interval: 50,
            latent_dim: 100,
            num_classes: 3,
            img_size: 28,
            hidden_dim: 128,
            lr: 0.0002,
            beta1: 0.5,
            generator_path: "generator.json".to_string(),
            discriminator_path: "discriminator.json".to_string(),
            images_dir: "images".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the given path.  Supports TOML or JSON based on
    /// the file extension. Returns `None` if parsing fails.
    pub fn from_path(path: &str) -> Option<Self> {
        let Ok(content) = fs::read_to_string(path) else {
            return None;
        };
        if path.ends_with(".json") {
            serde_json::from_str(&content).ok()
        } else {
            toml::from_str(&content).ok()
        }
    }

    /// Flattened image dimensionality fed to the models.
    pub fn image_dim(&self) -> usize {
        self.img_size * self.img_size * self.num_classes
    }
}
