//! Option chain quotes.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Option right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Right to buy.
    Call,
    /// Right to sell.
    Put,
}

impl OptionType {
    /// Both rights, in the order rows are emitted for each strike.
    pub const ALL: [OptionType; 2] = [OptionType::Call, OptionType::Put];

    /// Exchange label used in the options file (`CE` / `PE`).
    pub fn label(&self) -> &'static str {
        match self {
            OptionType::Call => "CE",
            OptionType::Put => "PE",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One synthesized quote for a (timestamp, strike, right) combination.
///
/// `ltp` is rounded to 2 decimals and `iv` to 3 decimals when generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    pub datetime: NaiveDateTime,
    pub strike: i64,
    pub option_type: OptionType,
    pub ltp: f64,
    pub iv: f64,
    pub open_interest: u64,
    pub volume: u64,
    pub expiry: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_exchange_suffixes() {
        assert_eq!(OptionType::Call.label(), "CE");
        assert_eq!(OptionType::Put.label(), "PE");
        assert_eq!(OptionType::Put.to_string(), "PE");
    }

    #[test]
    fn call_precedes_put() {
        assert_eq!(OptionType::ALL, [OptionType::Call, OptionType::Put]);
    }
}
