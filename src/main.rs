use std::env;
use std::path::Path;

use palettegan::config::Config;
use palettegan::models::Gan;
use palettegan::{error, info, train_gan, weights};

fn main() {
    let config = env::args()
        .nth(1)
        .and_then(|p| Config::from_path(&p))
        .unwrap_or_default();

    let mut gan = Gan::new(config.latent_dim, config.hidden_dim, config.image_dim());

    // Resume only when both checkpoints are present; a lone file is ignored
    // so generator and discriminator never come from different runs.
    let gen_exists = Path::new(&config.generator_path).exists();
    let disc_exists = Path::new(&config.discriminator_path).exists();
    if gen_exists && disc_exists {
        if let Err(e) = weights::load_gan(
            &config.generator_path,
            &config.discriminator_path,
            &mut gan,
        ) {
            error!("failed to load checkpoints: {e}");
            std::process::exit(1);
        }
    } else if gen_exists || disc_exists {
        info!("found only one checkpoint file, starting from fresh weights");
    }

    if let Err(e) = train_gan::run(&mut gan, &config) {
        error!("training failed: {e}");
        std::process::exit(1);
    }
}
