//! Raster output serialization

pub mod ppm;
