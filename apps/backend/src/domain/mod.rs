//! Domain layer: identity, profile and post records shared by stores,
//! services and routes.

pub mod posts;
pub mod profiles;
pub mod users;
