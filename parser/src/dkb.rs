//! Разбор текста кредитно-карточной выписки DKB.
//!
//! Текст приходит одной строкой без переносов (см. [`flatten_text`]).
//! Операции ищутся двумя независимыми регулярками:
//! - `DD.MM.YY DD.MM.YY <продавец> 1.234,56 -` - покупка с датой чека и датой проводки;
//! - `DD.MM.YY <метка> 1.234,56 -` - служебные строки (комиссия, погашение, сальдо).

use std::collections::BTreeMap;
use std::io::Read;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::german::{format_iso_date, parse_german_amount, parse_german_short_date};
use crate::model::{
    Direction, IS_TRANSFER_KEY, ParseMetadata, ParseResult, ParseWarning, ParsedTransaction,
    RECEIPT_DATE_KEY,
};
use crate::normalize::flatten_text;
use crate::vendor::split_vendor;

static TWO_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?P<receipt>[0-9]{2}\.[0-9]{2}\.[0-9]{2})\s+",
        r"(?P<booking>[0-9]{2}\.[0-9]{2}\.[0-9]{2})\s+",
        r"(?P<vendor>.+?)\s+",
        r"(?P<amount>[0-9.]+,[0-9]{2})\s*",
        r"(?P<sign>[-+])",
    ))
    .unwrap()
});

static SINGLE_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?P<date>[0-9]{2}\.[0-9]{2}\.[0-9]{2})\s+",
        r"(?P<label>Saldo letzte Abrechnung|Lastschrift|monatlicher Kartenpreis|Neuer Saldo)\s+",
        r"(?P<amount>[0-9.]+,[0-9]{2})\s*",
        r"(?P<sign>[-+])",
    ))
    .unwrap()
});

/// Шапка/подвал выписки, которые ленивая регулярка может захватить как продавца
const NOISE_MARKERS: [&str; 6] = [
    "Saldo letzte Abrechnung",
    "Neuer Saldo",
    "Übertrag von Seite",
    "Zwischensumme von Seite",
    "Kontaktdaten",
    "Abrechnungsnummer",
];

const LABEL_PREVIOUS_BALANCE: &str = "Saldo letzte Abrechnung";
const LABEL_NEW_BALANCE: &str = "Neuer Saldo";
const LABEL_DIRECT_DEBIT: &str = "Lastschrift";
const LABEL_CARD_FEE: &str = "monatlicher Kartenpreis";

const CARD_FEE_DESCRIPTION: &str = "Monthly card fee";
const FALLBACK_WARNING: &str = "failed to parse entry";

/// Признаки выписки DKB в тексте
const DKB_MARKERS: [&str; 4] = ["DKB", "Deutsche Kreditbank", "Kreditkarte", "Kartenpreis"];

/// Текст выписки DKB, уже склеенный в одну строку
#[derive(Debug, Clone)]
pub struct DkbStatement {
    text: String,
}

impl DkbStatement {
    /// Читает извлечённый из PDF текст и склеивает его в одну строку
    pub fn parse<R: Read>(mut reader: R) -> Result<Self, ParseError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;

        Ok(DkbStatement::from_text(&raw))
    }

    /// Go to [`DkbStatement`]
    pub fn from_text(raw: &str) -> Self {
        DkbStatement {
            text: flatten_text(raw),
        }
    }

    /// Склеенный текст выписки
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Похож ли текст на кредитно-карточную выписку DKB
    pub fn looks_like_dkb(&self) -> bool {
        looks_like_dkb_statement(&self.text)
    }
}

impl From<DkbStatement> for ParseResult {
    fn from(statement: DkbStatement) -> Self {
        parse_dkb_statement(&statement.text)
    }
}

/// Похож ли текст на кредитно-карточную выписку DKB
pub fn looks_like_dkb_statement(text: &str) -> bool {
    DKB_MARKERS.iter().any(|m| text.contains(m))
}

/// Разбирает текст выписки (без переносов строк) в список операций.
///
/// Чистая функция: битые строки не прерывают разбор, а попадают в `warnings`.
pub fn parse_dkb_statement(text: &str) -> ParseResult {
    let mut transactions = Vec::new();
    let mut warnings = Vec::new();

    collect_two_date_entries(text, &mut transactions, &mut warnings);
    collect_single_date_entries(text, &mut transactions, &mut warnings);

    // ISO-даты фиксированной ширины: порядок строк совпадает с хронологическим
    transactions.sort_by_key(|tx: &ParsedTransaction| tx.date);

    debug!(
        transactions = transactions.len(),
        warnings = warnings.len(),
        "parsed DKB statement"
    );

    ParseResult {
        transactions,
        warnings,
        metadata: ParseMetadata::default(),
    }
}

fn collect_two_date_entries(
    text: &str,
    transactions: &mut Vec<ParsedTransaction>,
    warnings: &mut Vec<ParseWarning>,
) {
    for caps in TWO_DATE_RE.captures_iter(text) {
        let raw = matched_text(&caps);
        let vendor = caps["vendor"].trim();

        if NOISE_MARKERS.iter().any(|m| vendor.contains(m)) {
            debug!(vendor, "skipping statement header/footer row");
            continue;
        }

        match two_date_transaction(&caps, vendor) {
            Ok(tx) => transactions.push(tx),
            Err(err) => warnings.push(warning_for(err, raw)),
        }
    }
}

fn two_date_transaction(
    caps: &Captures<'_>,
    vendor: &str,
) -> Result<ParsedTransaction, ParseError> {
    let booking_date = parse_german_short_date(&caps["booking"])?;
    let receipt_date = parse_german_short_date(&caps["receipt"])?;
    let amount = parse_german_amount(&caps["amount"])?;
    let direction = direction_for_sign(&caps["sign"]);

    let mut metadata = BTreeMap::new();
    metadata.insert(RECEIPT_DATE_KEY.to_string(), format_iso_date(receipt_date));

    // зачисление "Lastschrift" - погашение долга по карте, а не доход
    if vendor == LABEL_DIRECT_DEBIT && direction == Direction::Credit {
        metadata.insert(IS_TRANSFER_KEY.to_string(), "true".to_string());
    }

    // имя из эвристики не используется: в raw_vendor остаётся исходный текст
    let location = split_vendor(vendor).location;

    Ok(ParsedTransaction {
        date: booking_date,
        amount,
        direction,
        raw_vendor: vendor.to_string(),
        description: location.unwrap_or_default(),
        metadata,
    })
}

fn collect_single_date_entries(
    text: &str,
    transactions: &mut Vec<ParsedTransaction>,
    warnings: &mut Vec<ParseWarning>,
) {
    for caps in SINGLE_DATE_RE.captures_iter(text) {
        let raw = matched_text(&caps);
        let label = &caps["label"];

        match label {
            LABEL_PREVIOUS_BALANCE | LABEL_NEW_BALANCE => {
                debug!(label, "skipping balance row");
                continue;
            }
            // уже попадает в выборку как операция с двумя датами
            LABEL_DIRECT_DEBIT => {
                debug!(raw, "skipping single-date direct debit row");
                continue;
            }
            LABEL_CARD_FEE => {}
            _ => {
                debug!(label, "skipping unknown single-date label");
                continue;
            }
        }

        match card_fee_transaction(&caps, label) {
            Ok(tx) => transactions.push(tx),
            Err(err) => warnings.push(warning_for(err, raw)),
        }
    }
}

fn card_fee_transaction(
    caps: &Captures<'_>,
    label: &str,
) -> Result<ParsedTransaction, ParseError> {
    let date = parse_german_short_date(&caps["date"])?;
    let amount = parse_german_amount(&caps["amount"])?;

    Ok(ParsedTransaction {
        date,
        amount,
        direction: direction_for_sign(&caps["sign"]),
        raw_vendor: label.to_string(),
        description: CARD_FEE_DESCRIPTION.to_string(),
        metadata: BTreeMap::new(),
    })
}

fn direction_for_sign(sign: &str) -> Direction {
    match sign {
        "+" => Direction::Credit,
        _ => Direction::Debit,
    }
}

fn matched_text<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(0).map_or("", |m| m.as_str())
}

fn warning_for(err: ParseError, raw: &str) -> ParseWarning {
    let mut message = err.to_string();
    if message.is_empty() {
        message = FALLBACK_WARNING.to_string();
    }

    warn!(raw, %message, "skipping malformed statement entry");

    ParseWarning {
        line: 0,
        message,
        raw: raw.to_string(),
    }
}
