// Domain layer: job posting models, the title classifier and ports (interfaces).
// No dependencies beyond std/serde/regex.

pub mod classifier;
pub mod model;
pub mod ports;
