use std::io;
use std::path::Path;

use rand_distr::{Distribution, StandardNormal};

use crate::math::Matrix;
use crate::models::Generator;
use crate::palette::{self, Palette, PaletteError};
use crate::rng::rng_from_env;

/// Grid sample layout, matching the original 5x5 preview sheet.
pub const GRID_ROWS: usize = 5;
pub const GRID_COLS: usize = 5;
/// Rows in the per-class intensity sheet.
pub const INTENSITY_ROWS: usize = 8;

/// Raw RGB pixel buffer produced by the pure composition steps.
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl Frame {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 3],
        }
    }

    fn put(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let idx = (y * self.width + x) * 3;
        self.pixels[idx..idx + 3].copy_from_slice(&rgb);
    }
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Heat ramp for per-class confidence panels: black through red and orange
/// to white, in the spirit of matplotlib's gist_heat colormap.
fn heat(v: f32) -> [u8; 3] {
    let x = v.clamp(0.0, 1.0);
    [
        to_u8(1.5 * x),
        to_u8(2.0 * x - 1.0),
        to_u8(4.0 * x - 3.0),
    ]
}

fn blit_rgb(frame: &mut Frame, x0: usize, y0: usize, size: usize, rgb: &[[f32; 3]]) {
    for y in 0..size {
        for x in 0..size {
            let [r, g, b] = rgb[y * size + x];
            frame.put(x0 + x, y0 + y, [to_u8(r), to_u8(g), to_u8(b)]);
        }
    }
}

fn blit_heat(frame: &mut Frame, x0: usize, y0: usize, size: usize, scores: &[f32]) {
    for y in 0..size {
        for x in 0..size {
            frame.put(x0 + x, y0 + y, heat(scores[y * size + x]));
        }
    }
}

/// Decode generated score rows into one tiled RGB frame.
///
/// `scores` must hold `rows * cols` images of `img_size * img_size` pixels
/// with `palette.len()` scores each.  Pure transform, no I/O.
pub fn compose_grid(
    scores: &Matrix,
    rows: usize,
    cols: usize,
    img_size: usize,
    palette: &Palette,
) -> Result<Frame, PaletteError> {
    let mut frame = Frame::new(cols * img_size, rows * img_size);
    for i in 0..rows {
        for j in 0..cols {
            let row = i * cols + j;
            let start = row * scores.cols;
            let classes =
                palette::argmax_decode(&scores.data[start..start + scores.cols], palette.len());
            let rgb = palette::decode_to_rgb(&classes, palette)?;
            blit_rgb(&mut frame, j * img_size, i * img_size, img_size, &rgb);
        }
    }
    Ok(frame)
}

/// Decode score rows into a sheet of composite images plus one heat panel
/// per class showing the raw pre-argmax confidence.  Pure transform, no I/O.
pub fn compose_intensity(
    scores: &Matrix,
    rows: usize,
    img_size: usize,
    palette: &Palette,
) -> Result<Frame, PaletteError> {
    let num_classes = palette.len();
    let pixels = img_size * img_size;
    let mut frame = Frame::new((num_classes + 1) * img_size, rows * img_size);
    for i in 0..rows {
        let start = i * scores.cols;
        let img = &scores.data[start..start + scores.cols];
        let classes = palette::argmax_decode(img, num_classes);
        let rgb = palette::decode_to_rgb(&classes, palette)?;
        blit_rgb(&mut frame, 0, i * img_size, img_size, &rgb);
        for chnl in 0..num_classes {
            let channel: Vec<f32> = (0..pixels).map(|p| img[p * num_classes + chnl]).collect();
            blit_heat(
                &mut frame,
                (chnl + 1) * img_size,
                i * img_size,
                img_size,
                &channel,
            );
        }
    }
    Ok(frame)
}

/// Write a composed frame as a PNG file, creating parent directories.
pub fn save_png(path: &str, frame: Frame) -> io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let img = image::RgbImage::from_raw(frame.width as u32, frame.height as u32, frame.pixels)
        .ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "frame buffer size mismatch")
        })?;
    img.save(path)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

fn sample_noise(count: usize, latent_dim: usize) -> Matrix {
    let mut rng = rng_from_env();
    let mut noise = Matrix::zeros(count, latent_dim);
    for v in noise.data.iter_mut() {
        *v = StandardNormal.sample(&mut rng);
    }
    noise
}

/// Render a 5x5 grid of freshly generated samples to
/// `<out_dir>/fashion_mnist_<epoch>.png`.
pub fn save_grid_sample(
    generator: &Generator,
    epoch: usize,
    img_size: usize,
    palette: &Palette,
    out_dir: &str,
) -> io::Result<()> {
    let noise = sample_noise(GRID_ROWS * GRID_COLS, generator.fc1.w.rows);
    let scores = generator.predict(&noise);
    let frame = compose_grid(&scores, GRID_ROWS, GRID_COLS, img_size, palette)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    save_png(&format!("{}/fashion_mnist_{}.png", out_dir, epoch), frame)
}

/// Render composite-plus-heat-map rows to
/// `<out_dir>/fashion_mnist_inten_<epoch>.png`.
pub fn save_intensity_sample(
    generator: &Generator,
    epoch: usize,
    img_size: usize,
    palette: &Palette,
    out_dir: &str,
) -> io::Result<()> {
    let noise = sample_noise(INTENSITY_ROWS * (palette.len() + 1), generator.fc1.w.rows);
    let scores = generator.predict(&noise);
    let frame = compose_intensity(&scores, INTENSITY_ROWS, img_size, palette)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    save_png(
        &format!("{}/fashion_mnist_inten_{}.png", out_dir, epoch),
        frame,
    )
}
