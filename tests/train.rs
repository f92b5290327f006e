use std::path::{Path, PathBuf};

use palettegan::config::Config;
use palettegan::data::TrainSet;
use palettegan::logging::Logger;
use palettegan::models::Gan;
use palettegan::train_gan;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("palettegan_train_{}_{}", tag, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn tiny_config(dir: &Path) -> Config {
    let mut cfg = Config::default();
    cfg.epochs = 2;
    cfg.batch_size = 2;
    cfg.save_interval = 1;
    cfg.latent_dim = 8;
    cfg.num_classes = 3;
    cfg.img_size = 4;
    cfg.hidden_dim = 6;
    cfg.generator_path = dir.join("generator.json").to_str().unwrap().to_string();
    cfg.discriminator_path = dir.join("discriminator.json").to_str().unwrap().to_string();
    cfg.images_dir = dir.join("images").to_str().unwrap().to_string();
    cfg
}

fn tiny_train_set(cfg: &Config) -> TrainSet {
    let pixels = cfg.img_size * cfg.img_size;
    let images: Vec<Vec<u8>> = (0..4u8)
        .map(|i| (0..pixels).map(|p| (p as u8).wrapping_mul(37).wrapping_add(i)).collect())
        .collect();
    TrainSet::from_images(&images, cfg.num_classes)
}

#[test]
fn training_completes_and_writes_checkpoints_and_samples() {
    let dir = temp_dir("ok");
    let cfg = tiny_config(&dir);
    let train_set = tiny_train_set(&cfg);
    let mut gan = Gan::new(cfg.latent_dim, cfg.hidden_dim, cfg.image_dim());

    train_gan::train(&mut gan, &train_set, &cfg).unwrap();

    assert!(Path::new(&cfg.generator_path).exists());
    assert!(Path::new(&cfg.discriminator_path).exists());
    // save_interval 1 renders both sheets for every epoch.
    for epoch in 0..cfg.epochs {
        let grid = format!("{}/fashion_mnist_{}.png", cfg.images_dir, epoch);
        let inten = format!("{}/fashion_mnist_inten_{}.png", cfg.images_dir, epoch);
        assert!(Path::new(&grid).exists(), "missing {grid}");
        assert!(Path::new(&inten).exists(), "missing {inten}");
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn checkpoints_are_saved_even_when_the_loop_fails() {
    let dir = temp_dir("cleanup");
    let mut cfg = tiny_config(&dir);
    // Point the sample directory at an existing file so the first render
    // fails when it tries to create the directory.
    let blocker = dir.join("images_blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    cfg.images_dir = blocker.join("images").to_str().unwrap().to_string();

    let train_set = tiny_train_set(&cfg);
    let mut gan = Gan::new(cfg.latent_dim, cfg.hidden_dim, cfg.image_dim());

    let result = train_gan::train(&mut gan, &train_set, &cfg);
    assert!(result.is_err());
    // The loop aborted at epoch 0, but both weight files were still written.
    assert!(Path::new(&cfg.generator_path).exists());
    assert!(Path::new(&cfg.discriminator_path).exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn empty_train_set_fails_but_still_saves_checkpoints() {
    let dir = temp_dir("empty");
    let cfg = tiny_config(&dir);
    let train_set = TrainSet::from_images(&[], cfg.num_classes);
    let mut gan = Gan::new(cfg.latent_dim, cfg.hidden_dim, cfg.image_dim());

    let result = train_gan::train(&mut gan, &train_set, &cfg);
    assert!(result.is_err());
    assert!(Path::new(&cfg.generator_path).exists());
    assert!(Path::new(&cfg.discriminator_path).exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn zero_save_interval_disables_rendering() {
    let dir = temp_dir("nosamples");
    let mut cfg = tiny_config(&dir);
    cfg.save_interval = 0;
    let train_set = tiny_train_set(&cfg);
    let mut gan = Gan::new(cfg.latent_dim, cfg.hidden_dim, cfg.image_dim());

    train_gan::train(&mut gan, &train_set, &cfg).unwrap();
    assert!(!Path::new(&cfg.images_dir).exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn logger_creation_fails_against_a_file_path() {
    // The training loop downgrades a failed metrics sink to a warning; this
    // pins down the error it handles.
    let dir = temp_dir("logger");
    let blocker = dir.join("runs_blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let log_dir = blocker.join("runs").to_str().unwrap().to_string();
    assert!(Logger::new(Some(log_dir), Some("exp".to_string())).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}
