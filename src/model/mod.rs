//! Domain records: [`Customer`], [`Product`] and [`Order`], their typed IDs and
//! their create/update payloads.

pub mod customer;
pub mod order;
pub mod product;

pub use customer::*;
pub use order::*;
pub use product::*;
