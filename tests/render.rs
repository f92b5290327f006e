use palettegan::math::Matrix;
use palettegan::palette::{self, Palette};
use palettegan::render;

const SIZE: usize = 4;
const K: usize = 3;

fn onehot_image(class: usize) -> Vec<f32> {
    let classes = vec![class; SIZE * SIZE];
    palette::to_onehot(&classes, K).data
}

#[test]
fn compose_grid_tiles_images() {
    let rows = 2;
    let cols = 3;
    let mut data = Vec::new();
    for i in 0..rows * cols {
        data.extend(onehot_image(i % K));
    }
    let scores = Matrix::from_vec(rows * cols, SIZE * SIZE * K, data);
    let pal = Palette::grayscale(K);

    let frame = render::compose_grid(&scores, rows, cols, SIZE, &pal).unwrap();
    assert_eq!(frame.width, cols * SIZE);
    assert_eq!(frame.height, rows * SIZE);
    assert_eq!(frame.pixels.len(), frame.width * frame.height * 3);

    // Every pixel must be one of the three grayscale palette values.
    for px in frame.pixels.chunks(3) {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert!(matches!(px[0], 0 | 128 | 255), "unexpected value {}", px[0]);
    }

    // First tile is all class 0 (black), second all class 1 (mid gray).
    assert_eq!(frame.pixels[0], 0);
    let second_tile_x = SIZE;
    let idx = second_tile_x * 3;
    assert_eq!(frame.pixels[idx], 128);
}

#[test]
fn compose_intensity_adds_one_panel_per_class() {
    let rows = 2;
    let mut data = Vec::new();
    for i in 0..rows {
        data.extend(onehot_image(i));
    }
    let scores = Matrix::from_vec(rows, SIZE * SIZE * K, data);
    let pal = Palette::grayscale(K);

    let frame = render::compose_intensity(&scores, rows, SIZE, &pal).unwrap();
    assert_eq!(frame.width, (K + 1) * SIZE);
    assert_eq!(frame.height, rows * SIZE);

    // Row 0 is all class 0: the composite panel is black and the class-0
    // heat panel is saturated white (score 1.0), the other panels black.
    let composite = frame.pixels[0];
    assert_eq!(composite, 0);
    let heat0_idx = SIZE * 3;
    assert_eq!(&frame.pixels[heat0_idx..heat0_idx + 3], &[255, 255, 255]);
    let heat1_idx = 2 * SIZE * 3;
    assert_eq!(&frame.pixels[heat1_idx..heat1_idx + 3], &[0, 0, 0]);
}

#[test]
fn save_png_writes_file() {
    let dir = std::env::temp_dir().join(format!("palettegan_render_{}", std::process::id()));
    let path = dir.join("grid.png");
    let frame = render::compose_grid(
        &Matrix::from_vec(1, SIZE * SIZE * K, onehot_image(1)),
        1,
        1,
        SIZE,
        &Palette::grayscale(K),
    )
    .unwrap();
    render::save_png(path.to_str().unwrap(), frame).unwrap();
    assert!(path.exists());
    let _ = std::fs::remove_dir_all(&dir);
}
