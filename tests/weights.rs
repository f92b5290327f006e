use std::path::PathBuf;

use palettegan::math::Matrix;
use palettegan::models::Gan;
use palettegan::weights::{load_gan, save_gan};

const LATENT: usize = 8;
const HIDDEN: usize = 6;
const IMAGE: usize = 4 * 4 * 3;

fn temp_paths(tag: &str) -> (PathBuf, String, String) {
    let dir = std::env::temp_dir().join(format!("palettegan_{}_{}", tag, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let gen = dir.join("generator.json").to_str().unwrap().to_string();
    let disc = dir.join("discriminator.json").to_str().unwrap().to_string();
    (dir, gen, disc)
}

fn fixed_noise() -> Matrix {
    Matrix::from_vec(2, LATENT, (0..2 * LATENT).map(|i| i as f32 * 0.1 - 0.5).collect())
}

#[test]
fn save_then_load_roundtrips_bit_for_bit() {
    let (dir, gen_path, disc_path) = temp_paths("roundtrip");
    let gan = Gan::new(LATENT, HIDDEN, IMAGE);
    save_gan(&gen_path, &disc_path, &gan).unwrap();

    let mut restored = Gan::new(LATENT, HIDDEN, IMAGE);
    load_gan(&gen_path, &disc_path, &mut restored).unwrap();

    let noise = fixed_noise();
    let a = gan.generator.predict(&noise);
    let b = restored.generator.predict(&noise);
    assert_eq!(a.data, b.data);

    let img = gan.generator.predict(&noise);
    let da = gan.discriminator.predict(&img);
    let db = restored.discriminator.predict(&img);
    assert_eq!(da.data, db.data);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn load_rejects_shape_mismatch() {
    let (dir, gen_path, disc_path) = temp_paths("mismatch");
    let gan = Gan::new(LATENT, HIDDEN, IMAGE);
    save_gan(&gen_path, &disc_path, &gan).unwrap();

    let mut wider = Gan::new(LATENT, HIDDEN + 2, IMAGE);
    let before = wider.generator.fc1.w.data.clone();
    let err = load_gan(&gen_path, &disc_path, &mut wider).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    // Neither model was touched by the failed load.
    assert_eq!(wider.generator.fc1.w.data, before);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn load_fails_when_files_are_missing() {
    let (dir, gen_path, disc_path) = temp_paths("missing");
    let mut gan = Gan::new(LATENT, HIDDEN, IMAGE);
    assert!(load_gan(&gen_path, &disc_path, &mut gan).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn fresh_models_differ_run_to_run() {
    // Without a checkpoint, startup keeps the random initialisation; two
    // fresh models should not predict identically.
    let a = Gan::new(LATENT, HIDDEN, IMAGE);
    let b = Gan::new(LATENT, HIDDEN, IMAGE);
    let noise = fixed_noise();
    assert_ne!(a.generator.predict(&noise).data, b.generator.predict(&noise).data);
}
