//! One module per upgrade step. Each exposes `rules()`, the ordered rule
//! list that takes a project from the previous version to the one in its name.

pub mod to_1_15_0;
pub mod to_1_15_2;
pub mod to_1_16_0;
