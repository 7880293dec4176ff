use std::io::Write;

use csv::WriterBuilder;

use crate::error::ParseError;
use crate::german::{format_iso_date, format_minor_units};
use crate::model::{IS_TRANSFER_KEY, ParseResult, RECEIPT_DATE_KEY};

const CSV_HEADERS: [&str; 7] = [
    "date",
    "amount",
    "direction",
    "raw_vendor",
    "description",
    RECEIPT_DATE_KEY,
    IS_TRANSFER_KEY,
];

impl ParseResult {
    /// Записывает результат целиком (операции, предупреждения, метаданные) в JSON
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<(), ParseError> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        Ok(())
    }

    /// Записывает операции в CSV, по строке на операцию.
    ///
    /// Предупреждения в CSV не попадают.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ParseError> {
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

        wtr.write_record(CSV_HEADERS)?;

        for tx in &self.transactions {
            let receipt_date = tx.receipt_date().unwrap_or_default();
            let is_transfer = if tx.is_transfer() { "true" } else { "" };

            wtr.write_record([
                format_iso_date(tx.date).as_str(),
                format_minor_units(tx.amount, '.').as_str(),
                tx.direction.to_string().as_str(),
                tx.raw_vendor.as_str(),
                tx.description.as_str(),
                receipt_date,
                is_transfer,
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Человекочитаемая таблица операций
    pub fn write_table<W: Write>(&self, mut writer: W) -> Result<(), ParseError> {
        for tx in &self.transactions {
            writeln!(writer, "{tx}")?;
        }
        Ok(())
    }
}
