use std::io;

use indicatif::ProgressBar;
use rand_distr::{Distribution, StandardNormal};

use crate::config::Config;
use crate::data::{Dataset, FashionMnist, TrainSet};
use crate::logging::{Logger, MetricRecord};
use crate::math::{self, Matrix};
use crate::models::Gan;
use crate::optim::Adam;
use crate::render;
use crate::rng::rng_from_env;
use crate::weights;

/// Load the dataset and run adversarial training.
pub fn run(gan: &mut Gan, config: &Config) -> io::Result<()> {
    let images = FashionMnist::load();
    let train_set = TrainSet::from_images(&images, config.num_classes);
    train(gan, &train_set, config)
}

/// Run the epoch loop with a guaranteed checkpoint save on exit.
///
/// Whether the loop completes or fails, both weight files are written before
/// this returns, so partially trained parameters survive a crash.  The loop
/// error, if any, still propagates to the caller afterwards.
pub fn train(gan: &mut Gan, train_set: &TrainSet, config: &Config) -> io::Result<()> {
    let result = train_loop(gan, train_set, config);
    let saved = weights::save_gan(&config.generator_path, &config.discriminator_path, gan);
    if let Err(e) = &saved {
        crate::error!("failed to save weights: {e}");
    }
    result.and(saved)
}

fn sample_noise(rng: &mut rand::rngs::StdRng, count: usize, latent_dim: usize) -> Matrix {
    let mut noise = Matrix::zeros(count, latent_dim);
    for v in noise.data.iter_mut() {
        *v = StandardNormal.sample(rng);
    }
    noise
}

fn train_loop(gan: &mut Gan, train_set: &TrainSet, config: &Config) -> io::Result<()> {
    if train_set.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "training set is empty",
        ));
    }
    crate::info!(
        "loaded {} images, {} classes per pixel",
        train_set.len(),
        config.num_classes
    );

    let palette = crate::palette::Palette::grayscale(config.num_classes);
    let mut rng = rng_from_env();
    // Disjoint optimizer scopes: one per parameter set, never crossed.
    let mut d_opt = Adam::new(config.lr, config.beta1, 0.999, 1e-8);
    let mut g_opt = Adam::new(config.lr, config.beta1, 0.999, 1e-8);
    let mut logger = match Logger::new(None, None) {
        Ok(l) => Some(l),
        Err(e) => {
            crate::warn!("metrics logging disabled: {e}");
            None
        }
    };

    math::reset_matrix_ops();
    let pb = ProgressBar::new(config.epochs as u64);

    for epoch in 0..config.epochs {
        let real = train_set.sample_batch(&mut rng, config.batch_size);
        let noise = sample_noise(&mut rng, config.batch_size, config.latent_dim);
        let fake = gan.generator.predict(&noise);

        // Two separate discriminator updates: real as ones, generated as
        // zeros.  The reported pair is the mean of the two sub-steps.
        let (d_loss_real, d_acc_real) = gan.discriminator_step(&real, 1.0, &mut d_opt);
        let (d_loss_fake, d_acc_fake) = gan.discriminator_step(&fake, 0.0, &mut d_opt);
        let d_loss = 0.5 * (d_loss_real + d_loss_fake);
        let d_acc = 0.5 * (d_acc_real + d_acc_fake);

        // Generator update reuses the noise batch from the discriminator step.
        let g_loss = gan.generator_step(&noise, &mut g_opt);

        crate::info!(
            "{} [D loss: {:.6}, acc.: {:.2}%] [G loss: {:.6}]",
            epoch,
            d_loss,
            100.0 * d_acc,
            g_loss
        );
        if let Some(l) = &mut logger {
            l.log(&MetricRecord {
                epoch,
                d_loss,
                d_acc,
                g_loss,
                kind: "epoch",
            });
        }
        pb.set_message(format!(
            "epoch {epoch} d_loss {d_loss:.4} g_loss {g_loss:.4}"
        ));
        pb.inc(1);

        if config.save_interval > 0 && epoch % config.save_interval == 0 {
            render::save_grid_sample(
                &gan.generator,
                epoch,
                config.img_size,
                &palette,
                &config.images_dir,
            )?;
            render::save_intensity_sample(
                &gan.generator,
                epoch,
                config.img_size,
                &palette,
                &config.images_dir,
            )?;
        }
    }

    pb.finish_with_message("training done");
    crate::info!("Total matrix ops: {}", math::matrix_ops_count());
    Ok(())
}
