//! Small shared helpers

pub mod comparison;
