use thiserror::Error;

#[derive(Error, Debug)]
pub enum FxError {
    #[error("Exchange rate not found for {0}/{1}")]
    RateNotFound(String, String),

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    #[error("Rate provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Rate store error: {0}")]
    StoreError(String),
}
