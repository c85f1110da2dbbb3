//! In-process store adapters backed by `parking_lot` locks.
//!
//! Used by the test suites and by `BACKEND_STORE=memory` local runs. Each
//! trait method takes its lock once, so every operation is atomic just like
//! its Mongo counterpart.

mod posts;
mod profiles;
mod users;

pub use posts::MemoryPostStore;
pub use profiles::MemoryProfileStore;
pub use users::MemoryUserStore;

fn new_id() -> String {
    ulid::Ulid::new().to_string()
}
