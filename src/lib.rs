#![forbid(unsafe_code)]

pub use pointmob_core::*;
