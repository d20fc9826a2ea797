//! Domain records for synthesized market data.

pub mod bar;
pub mod option;

pub use bar::{FuturesBar, SpotBar};
pub use option::{OptionQuote, OptionType};
