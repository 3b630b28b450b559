//! Document types consumed and produced by the engines

pub mod deal;
pub mod errors;
pub mod offer;
