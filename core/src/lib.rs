pub mod datamap;
pub mod determinism;

pub mod error;
