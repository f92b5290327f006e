pub mod config;
pub mod data;
pub mod layers;
pub mod logging;
pub mod math;
pub mod models;
pub mod optim;
pub mod palette;
pub mod render;
pub mod rng;
pub mod train_gan;
pub mod util;
pub mod weights;
