use crate::math::Matrix;
use crate::models::Gan;
use serde::{Deserialize, Serialize};
use std::{fs, io};

#[derive(Serialize, Deserialize)]
pub struct GeneratorJson {
    pub fc1: Vec<Vec<f32>>,
    pub fc2: Vec<Vec<f32>>,
}

#[derive(Serialize, Deserialize)]
pub struct DiscriminatorJson {
    pub fc1: Vec<Vec<f32>>,
    pub fc2: Vec<Vec<f32>>,
}

/// Convert a [`Matrix`] into a 2-D `Vec` for serialisation.
pub fn matrix_to_vec2(m: &Matrix) -> Vec<Vec<f32>> {
    (0..m.rows)
        .map(|r| (0..m.cols).map(|c| m.get(r, c)).collect())
        .collect()
}

/// Convert a 2-D `Vec` back into a [`Matrix`], enforcing the expected shape.
///
/// Checkpoints from a differently sized architecture fail here with
/// `InvalidData` instead of being silently truncated or padded.
pub fn vec2_to_matrix_exact(rows: &[Vec<f32>], exp_rows: usize, exp_cols: usize) -> io::Result<Matrix> {
    if rows.len() != exp_rows || rows.iter().any(|r| r.len() != exp_cols) {
        let got_cols = rows.first().map_or(0, |r| r.len());
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "weight shape mismatch: expected {}x{}, checkpoint holds {}x{}",
                exp_rows,
                exp_cols,
                rows.len(),
                got_cols
            ),
        ));
    }
    let mut mat = Matrix::zeros(exp_rows, exp_cols);
    for (i, row) in rows.iter().enumerate() {
        for (j, &val) in row.iter().enumerate() {
            mat.set(i, j, val);
        }
    }
    Ok(mat)
}

/// Serialize both models' parameters, overwriting unconditionally.
pub fn save_gan(gen_path: &str, disc_path: &str, gan: &Gan) -> io::Result<()> {
    let gen = GeneratorJson {
        fc1: matrix_to_vec2(&gan.generator.fc1.w),
        fc2: matrix_to_vec2(&gan.generator.fc2.w),
    };
    let disc = DiscriminatorJson {
        fc1: matrix_to_vec2(&gan.discriminator.fc1.w),
        fc2: matrix_to_vec2(&gan.discriminator.fc2.w),
    };
    let txt = serde_json::to_string(&gen).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    fs::write(gen_path, txt)?;
    let txt = serde_json::to_string(&disc).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    fs::write(disc_path, txt)?;
    crate::info!("Saved weights to {} and {}", gen_path, disc_path);
    Ok(())
}

/// Restore both models' parameters from disk.
///
/// Both files must exist and match the current architecture shapes; any
/// mismatch surfaces as an `InvalidData` error before either model is
/// modified.
pub fn load_gan(gen_path: &str, disc_path: &str, gan: &mut Gan) -> io::Result<()> {
    let txt = fs::read_to_string(gen_path)?;
    let gen: GeneratorJson = serde_json::from_str(&txt).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let txt = fs::read_to_string(disc_path)?;
    let disc: DiscriminatorJson = serde_json::from_str(&txt).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let g_fc1 = vec2_to_matrix_exact(
        &gen.fc1,
        gan.generator.fc1.w.rows,
        gan.generator.fc1.w.cols,
    )?;
    let g_fc2 = vec2_to_matrix_exact(
        &gen.fc2,
        gan.generator.fc2.w.rows,
        gan.generator.fc2.w.cols,
    )?;
    let d_fc1 = vec2_to_matrix_exact(
        &disc.fc1,
        gan.discriminator.fc1.w.rows,
        gan.discriminator.fc1.w.cols,
    )?;
    let d_fc2 = vec2_to_matrix_exact(
        &disc.fc2,
        gan.discriminator.fc2.w.rows,
        gan.discriminator.fc2.w.cols,
    )?;

    gan.generator.fc1.w = g_fc1;
    gan.generator.fc2.w = g_fc2;
    gan.discriminator.fc1.w = d_fc1;
    gan.discriminator.fc2.w = d_fc2;
    crate::info!("Loaded weights from {} and {}", gen_path, disc_path);
    Ok(())
}
