mod mem;
mod postgres;

pub use mem::MemBackend;
pub use postgres::PgBackend;
