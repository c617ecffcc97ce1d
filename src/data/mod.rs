pub mod catalog;
pub mod glass;
