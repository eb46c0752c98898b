use serde::Deserialize;

/// Spin row as exported by the source system, before typing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSpin {
    #[serde(alias = "hour")]
    pub date: String,
    #[serde(alias = "userId")]
    pub user_id: String,
    pub country: String,
    pub total_spins: RawNumber,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPurchase {
    pub transaction_id: String,
    #[serde(alias = "timestamp")]
    pub date: String,
    #[serde(alias = "userId")]
    pub user_id: String,
    /// Either a plain number or a price string such as `PriceInUSD=3.00`
    pub revenue: RawNumber,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Numeric cell that may have been exported as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawNumber::Number(n) => Some(*n),
            RawNumber::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl From<f64> for RawNumber {
    fn from(n: f64) -> Self {
        RawNumber::Number(n)
    }
}

impl From<&str> for RawNumber {
    fn from(s: &str) -> Self {
        RawNumber::Text(s.to_string())
    }
}
