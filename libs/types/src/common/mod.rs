//! Common value types: grid prices, identifiers and their errors

pub mod errors;
pub mod fixed_point;
pub mod identifiers;
