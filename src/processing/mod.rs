pub mod export;
pub mod sampling;
