use crate::math::Matrix;
use std::fmt;

/// Ordered lookup table mapping a pixel class index to an RGB color.
///
/// Class `i` of the one-hot representation decodes exactly to `colors[i]`.
/// The number of entries must agree with the class count used for
/// quantization and with the generator output channel count; mixing them up
/// corrupts decoding, so [`decode_to_rgb`] checks indices explicitly.
#[derive(Clone, Debug)]
pub struct Palette {
    pub colors: Vec<[f32; 3]>,
}

impl Palette {
    pub fn new(colors: Vec<[f32; 3]>) -> Self {
        Self { colors }
    }

    /// Evenly spaced grayscale palette, the encoding the dataset quantizer
    /// assumes: class 0 is black, the last class is white.
    pub fn grayscale(num_classes: usize) -> Self {
        let colors = (0..num_classes)
            .map(|i| {
                let v = if num_classes > 1 {
                    i as f32 / (num_classes - 1) as f32
                } else {
                    0.0
                };
                [v, v, v]
            })
            .collect();
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[derive(Debug, PartialEq)]
pub enum PaletteError {
    ClassOutOfRange { class: usize, palette_len: usize },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::ClassOutOfRange { class, palette_len } => write!(
                f,
                "Class index {} is out of range for a palette of {} colors",
                class, palette_len
            ),
        }
    }
}

impl std::error::Error for PaletteError {}

/// Quantize an 8-bit intensity into one of `num_classes` equal-width bins.
///
/// Equivalent to `floor(v / (256 / num_classes))` and always lands in
/// `[0, num_classes - 1]` for valid 8-bit input; monotonic in `v`.
pub fn quantize(intensity: u8, num_classes: usize) -> usize {
    intensity as usize * num_classes / 256
}

/// One-hot encode a grid of class indices into a single matrix row.
///
/// The layout matches the generator output: pixels in row-major order, each
/// followed by its `num_classes` scores, giving `pixels * num_classes`
/// features per image.
pub fn to_onehot(classes: &[usize], num_classes: usize) -> Matrix {
    let mut m = Matrix::zeros(1, classes.len() * num_classes);
    for (i, &c) in classes.iter().enumerate() {
        m.data[i * num_classes + c] = 1.0;
    }
    m
}

/// Recover per-pixel class indices from a categorical score grid.
///
/// `scores` holds `num_classes` values per pixel.  Generated images carry
/// independent sigmoid scores, not a probability simplex, so the inverse of
/// the one-hot encoding is a plain argmax with ties broken toward the
/// lowest index.
pub fn argmax_decode(scores: &[f32], num_classes: usize) -> Vec<usize> {
    scores
        .chunks(num_classes)
        .map(|chunk| {
            let mut best = 0usize;
            let mut best_val = f32::NEG_INFINITY;
            for (i, &v) in chunk.iter().enumerate() {
                if v > best_val {
                    best_val = v;
                    best = i;
                }
            }
            best
        })
        .collect()
}

/// Look up the RGB color of every class index in the grid.
///
/// # Errors
/// Returns [`PaletteError::ClassOutOfRange`] if any index has no palette
/// entry, which happens when the class count used for encoding disagrees
/// with the palette length.
pub fn decode_to_rgb(classes: &[usize], palette: &Palette) -> Result<Vec<[f32; 3]>, PaletteError> {
    classes
        .iter()
        .map(|&c| {
            palette
                .colors
                .get(c)
                .copied()
                .ok_or(PaletteError::ClassOutOfRange {
                    class: c,
                    palette_len: palette.len(),
                })
        })
        .collect()
}
