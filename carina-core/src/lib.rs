//! Carina Core
//!
//! Core library shared by providers: the resource model, attribute
//! schemas, and the `Provider` trait that lifecycle handlers implement.

pub mod provider;
pub mod resource;
pub mod schema;
