pub mod gan;

pub use gan::{Discriminator, Gan, Generator};
