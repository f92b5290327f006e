pub mod dataloader;

pub use dataloader::{Dataset, FashionMnist, TrainSet};
