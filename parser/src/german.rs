//! Хелперы для немецких форматов сумм (`1.234,56`) и дат (`DD.MM.YY`).

use crate::error::ParseError;
use chrono::NaiveDate;

/// Парсит немецкую сумму `1.234,56` в центы.
///
/// Точка - разделитель тысяч (группы строго по 3 цифры), запятая - десятичный
/// разделитель, после неё ровно две цифры.
pub fn parse_german_amount(raw: &str) -> Result<u64, ParseError> {
    let cleaned = raw.trim();

    if cleaned.is_empty() {
        return Err(ParseError::InvalidAmount("empty amount".into()));
    }

    let (int_part, dec_part) = cleaned
        .split_once(',')
        .ok_or_else(|| ParseError::InvalidAmount(format!("missing decimal comma: {cleaned}")))?;

    if dec_part.len() != 2 || !dec_part.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::InvalidAmount(format!(
            "expected exactly two fractional digits: {cleaned}"
        )));
    }

    let digits = join_thousands_groups(int_part).ok_or_else(|| {
        ParseError::InvalidAmount(format!("malformed thousands grouping: {cleaned}"))
    })?;

    let units: u64 = digits
        .parse()
        .map_err(|_| ParseError::InvalidAmount(format!("amount out of range: {cleaned}")))?;
    // dec_part уже проверен: две ASCII-цифры
    let cents: u64 = dec_part
        .parse()
        .map_err(|_| ParseError::InvalidAmount(format!("invalid fractional part: {cleaned}")))?;

    units
        .checked_mul(100)
        .and_then(|v| v.checked_add(cents))
        .ok_or_else(|| ParseError::InvalidAmount(format!("amount out of range: {cleaned}")))
}

/// Убирает точки-разделители тысяч, проверяя группировку.
///
/// `1234` и `1.234` валидны, `12.34` и `.5` - нет.
fn join_thousands_groups(int_part: &str) -> Option<String> {
    let mut groups = int_part.split('.');
    let head = groups.next()?;

    if head.is_empty() || !head.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut digits = head.to_string();
    let mut grouped = false;

    for group in groups {
        if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        grouped = true;
        digits.push_str(group);
    }

    if grouped && head.len() > 3 {
        return None;
    }

    Some(digits)
}

/// Парсит дату `DD.MM.YY`.
///
/// Двузначный год всегда относится к 2000-м.
pub fn parse_german_short_date(raw: &str) -> Result<NaiveDate, ParseError> {
    let s = raw.trim();
    let parts: Vec<&str> = s.split('.').collect();

    let well_formed = parts.len() == 3
        && parts
            .iter()
            .all(|p| p.len() == 2 && p.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return Err(ParseError::InvalidDate(format!("expected DD.MM.YY: '{s}'")));
    }

    let dd: u32 = parts[0]
        .parse()
        .map_err(|_| ParseError::InvalidDate(format!("invalid day: '{s}'")))?;
    let mm: u32 = parts[1]
        .parse()
        .map_err(|_| ParseError::InvalidDate(format!("invalid month: '{s}'")))?;
    let yy: i32 = parts[2]
        .parse()
        .map_err(|_| ParseError::InvalidDate(format!("invalid year: '{s}'")))?;

    let year = 2000 + yy;

    NaiveDate::from_ymd_opt(year, mm, dd).ok_or_else(|| {
        ParseError::InvalidDate(format!("invalid DD.MM.YY date components: '{s}'"))
    })
}

/// Дата в формате ISO 8601 (`YYYY-MM-DD`)
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Форматирует целочисленное значение (центы) в человекочитаемый формат
pub fn format_minor_units<T>(value: T, decimal_separator: char) -> String
where
    T: Into<i128>,
{
    let v: i128 = value.into();
    let v = v.unsigned_abs();
    let units = v / 100;
    let frac = v % 100;

    format!("{units}{decimal_separator}{frac:02}")
}
