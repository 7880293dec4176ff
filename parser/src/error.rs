use std::io::Error as IoError;
use thiserror::Error;

/// Ошибки при парсинге выписки и записи результата
#[derive(Debug, Error)]
pub enum ParseError {
    // логические ошибки, из них получаются предупреждения

    /// ошибка при парсинге даты `DD.MM.YY`
    #[error("invalid date: {0}")]
    InvalidDate(String),
    /// ошибка при парсинге денежной суммы `1.234,56`
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    // обёртки

    /// обёртка std::io::Error
    #[error("io error: {0}")]
    Io(#[from] IoError),
    /// обёртка csv::Error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// обёртка serde_json::Error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
