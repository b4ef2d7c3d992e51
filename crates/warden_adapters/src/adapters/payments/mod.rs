//! Payment processor adapters.

mod stripe;

pub use stripe::StripeAdapter;
