use once_cell::sync::Lazy;
use regex::Regex;

use super::raw::RawNumber;

static AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?\d[\d,]*(?:\.\d+)?").expect("amount pattern"));
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]{3}").expect("currency pattern"));

/// Amount and currency extracted from a revenue cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    pub amount: f64,
    pub currency: Option<String>,
}

/// Extract the first amount and currency from strings like `PriceInUSD=3.00`,
/// `$3.00`, `3,000.50 EUR` or `2.5`. Thousands separators are dropped.
pub fn parse_price(input: &str) -> Option<Price> {
    let s = input.trim();
    let m = AMOUNT.find(s)?;
    let amount = m.as_str().replace(',', "").parse::<f64>().ok()?;

    let currency = CODE
        .find(s)
        .map(|c| c.as_str().to_string())
        .or_else(|| currency_from_symbol(s).map(str::to_string));

    Some(Price { amount, currency })
}

fn currency_from_symbol(s: &str) -> Option<&'static str> {
    s.chars().find_map(|c| match c {
        '$' => Some("USD"),
        '€' => Some("EUR"),
        '£' => Some("GBP"),
        '¥' => Some("JPY"),
        _ => None,
    })
}

impl RawNumber {
    /// Interpret the cell as a price; plain numbers carry no currency.
    pub fn as_price(&self) -> Option<Price> {
        match self {
            RawNumber::Number(n) => Some(Price {
                amount: *n,
                currency: None,
            }),
            RawNumber::Text(s) => parse_price(s),
        }
    }
}
