//! SeaORM entity definitions for the orgmirror database schema.

pub mod host_type;
pub mod organization;
pub mod prelude;
pub mod repository;
