use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::german::format_minor_units;

/// Ключ метаданных: дата чека (первая дата в строке операции), ISO
pub const RECEIPT_DATE_KEY: &str = "receipt_date";
/// Ключ метаданных: пометка внутреннего перевода (погашение долга по карте)
pub const IS_TRANSFER_KEY: &str = "is_transfer";

/// Идентификатор банка в метаданных результата
pub const BANK_ID: &str = "dkb";

/// Направление операции (Дебет/Кредит)
///
/// Определяется только знаком в конце строки: `-` - дебет, `+` - кредит.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Дебет (списание)
    Debit,
    /// Кредит (зачисление)
    Credit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Credit => f.pad("credit"),
            Direction::Debit => f.pad("debit"),
        }
    }
}

/// Одна операция, найденная в тексте выписки.
///
/// `raw_vendor` хранит текст продавца как есть (после trim),
/// `description` - место/город из эвристики или фиксированная подпись.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    /// дата проводки
    pub date: NaiveDate,
    /// денежная сумма (в центах), всегда неотрицательная
    pub amount: u64,
    /// направление операции
    pub direction: Direction,
    /// исходный текст продавца/типа операции
    pub raw_vendor: String,
    /// место или подпись, может быть пустой строкой
    pub description: String,
    /// дополнительные поля: `receipt_date`, `is_transfer`
    pub metadata: BTreeMap<String, String>,
}

impl ParsedTransaction {
    /// Помечена ли операция как внутренний перевод
    pub fn is_transfer(&self) -> bool {
        self.metadata.get(IS_TRANSFER_KEY).map(String::as_str) == Some("true")
    }

    /// Дата чека, если есть
    pub fn receipt_date(&self) -> Option<&str> {
        self.metadata.get(RECEIPT_DATE_KEY).map(String::as_str)
    }
}

impl fmt::Display for ParsedTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let receipt = self.receipt_date().unwrap_or("");
        let transfer = if self.is_transfer() { "transfer" } else { "" };

        write!(
            f,
            "{:<10} {:<10} {:<6} {:>12} {} | {} {}",
            self.date,
            receipt,
            self.direction,
            format_minor_units(self.amount, ','),
            self.raw_vendor,
            self.description,
            transfer,
        )
    }
}

/// Предупреждение о строке, которую не удалось разобрать
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    /// номер строки; в плоском тексте без переносов всегда 0
    pub line: usize,
    /// описание ошибки
    pub message: String,
    /// весь совпавший фрагмент текста
    pub raw: String,
}

/// Фиксированные метаданные результата
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseMetadata {
    pub bank: String,
    pub pages_parsed: u32,
    pub raw_lines: u32,
}

impl Default for ParseMetadata {
    fn default() -> Self {
        ParseMetadata {
            bank: BANK_ID.to_string(),
            pages_parsed: 1,
            raw_lines: 1,
        }
    }
}

/// Результат разбора одной выписки.
///
/// Операции отсортированы по дате проводки, предупреждения - в порядке обнаружения.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub transactions: Vec<ParsedTransaction>,
    pub warnings: Vec<ParseWarning>,
    pub metadata: ParseMetadata,
}

impl ParseResult {
    /// Есть ли пропущенные из-за ошибок строки
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
