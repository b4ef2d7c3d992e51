//! Database connection string adapters.

mod connstring;

pub use connstring::ConnectionStringAdapter;
