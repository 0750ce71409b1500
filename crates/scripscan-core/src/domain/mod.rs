mod models;
mod symbol;

pub use models::{LiveQuote, MarketSnapshot};
pub use symbol::Symbol;
