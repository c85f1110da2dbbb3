//! Infrastructure layer - store bootstrap, state assembly and error mapping.

pub mod db_errors;
pub mod mongo;
pub mod state;
