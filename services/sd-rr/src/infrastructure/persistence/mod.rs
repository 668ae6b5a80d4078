//! Persistence implementations

mod converters;
mod memory;
mod migrations;
mod postgres;
mod rows;

pub use memory::InMemoryReturRepository;
pub use migrations::migrations;
pub use postgres::PostgresReturRepository;
