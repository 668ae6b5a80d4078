//! Infrastructure layer

pub mod observability;
pub mod persistence;
