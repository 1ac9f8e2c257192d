//! Record types and request primitives.

pub mod card;
pub mod pagination;
