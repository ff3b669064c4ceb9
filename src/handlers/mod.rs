//! HTTP handlers for the product resource.

pub mod product;
pub use product::*;
