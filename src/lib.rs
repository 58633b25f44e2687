//! rot3d: configuration and the conversion probe built on `rot3d_math`

pub mod config;
pub mod probe;
