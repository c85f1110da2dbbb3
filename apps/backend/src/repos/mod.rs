//! Store traits for the domain layer.
//!
//! Each method is one atomic store operation. Adapters live in
//! `crate::adapters` (`memory` for tests and local runs, `*_mongo` for
//! production).

pub mod posts;
pub mod profiles;
pub mod users;
