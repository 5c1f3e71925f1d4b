//! Feed builders
//!
//! Each builder turns a config section and the instrument universe into the
//! full, ordered set of rows for one output file. Builders that need
//! randomness take it as a [`RandomSource`](crate::randomness::RandomSource).

pub mod inquiries;
pub mod market_data;
pub mod prices;
pub mod trades;

pub use inquiries::build_inquiries;
pub use market_data::build_market_data;
pub use prices::build_prices;
pub use trades::build_trades;
