use chrono::NaiveDate;
use dkb_parser::{Direction, IS_TRANSFER_KEY, RECEIPT_DATE_KEY, parse_dkb_statement};

fn iso(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

#[test]
fn paypal_purchase_example() {
    let result =
        parse_dkb_statement("01.03.24 03.03.24 PAYPAL *aichu240600, 35314369001 49,99 -");

    assert!(result.warnings.is_empty());
    assert_eq!(result.transactions.len(), 1);

    let tx = &result.transactions[0];
    assert_eq!(tx.date, iso("2024-03-03"));
    assert_eq!(tx.amount, 4999);
    assert_eq!(tx.direction, Direction::Debit);
    assert_eq!(tx.raw_vendor, "PAYPAL *aichu240600, 35314369001");
    assert_eq!(tx.description, "35314369001");
    assert_eq!(
        tx.metadata.get(RECEIPT_DATE_KEY).map(String::as_str),
        Some("2024-03-01")
    );
}

#[test]
fn monthly_card_fee_example() {
    let result = parse_dkb_statement("15.04.24 monatlicher Kartenpreis 2,50 -");

    assert_eq!(result.transactions.len(), 1);
    let tx = &result.transactions[0];
    assert_eq!(tx.amount, 250);
    assert_eq!(tx.direction, Direction::Debit);
    assert_eq!(tx.raw_vendor, "monatlicher Kartenpreis");
    assert_eq!(tx.description, "Monthly card fee");
    assert!(tx.metadata.is_empty());
}

#[test]
fn direction_follows_trailing_sign_only() {
    // пробел перед знаком необязателен
    let result = parse_dkb_statement(
        "01.03.24 02.03.24 Shop, Berlin 10,00+ 03.03.24 04.03.24 Shop, Berlin 10,00 -",
    );

    let directions: Vec<_> = result.transactions.iter().map(|t| t.direction).collect();
    assert_eq!(directions, vec![Direction::Credit, Direction::Debit]);
}

#[test]
fn credited_card_fee_keeps_credit_direction() {
    let result = parse_dkb_statement("15.04.24 monatlicher Kartenpreis 2,50 +");

    assert_eq!(result.transactions.len(), 1);
    assert_eq!(result.transactions[0].direction, Direction::Credit);
    assert!(!result.transactions[0].metadata.contains_key(IS_TRANSFER_KEY));
}

#[test]
fn lastschrift_counted_once_when_it_has_two_dates() {
    let result = parse_dkb_statement("14.03.24 15.03.24 Lastschrift 512,30 +");

    assert_eq!(result.transactions.len(), 1);
    assert_eq!(
        result.transactions[0].metadata.get(IS_TRANSFER_KEY).map(String::as_str),
        Some("true")
    );
}

#[test]
fn lastschrift_with_single_date_is_dropped() {
    for sign in ['+', '-'] {
        let result = parse_dkb_statement(&format!("15.03.24 Lastschrift 512,30 {sign}"));
        assert!(result.transactions.is_empty(), "sign {sign} produced a transaction");
        assert!(result.warnings.is_empty());
    }
}

#[test]
fn lastschrift_substring_is_not_a_transfer() {
    let result = parse_dkb_statement("14.03.24 15.03.24 Lastschrift Stadtwerke, Bonn 80,00 +");

    assert_eq!(result.transactions.len(), 1);
    assert!(!result.transactions[0].is_transfer());
    assert_eq!(result.transactions[0].description, "Bonn");
}

#[test]
fn warnings_keep_discovery_order() {
    let text = concat!(
        "20.03.24 21.03.24 Shop 1.2,00 - ",
        "99.99.24 monatlicher Kartenpreis 2,50 - ",
        "01.03.24 02.03.24 Other 3.4,00 -",
    );
    let result = parse_dkb_statement(text);

    assert!(result.transactions.is_empty());
    let raws: Vec<&str> = result.warnings.iter().map(|w| w.raw.as_str()).collect();
    assert_eq!(
        raws,
        vec![
            "20.03.24 21.03.24 Shop 1.2,00 -",
            "01.03.24 02.03.24 Other 3.4,00 -",
            "99.99.24 monatlicher Kartenpreis 2,50 -",
        ]
    );
}

#[test]
fn parsing_is_repeatable() {
    let text = "01.03.24 03.03.24 REWE, Berlin 23,10 - 15.04.24 monatlicher Kartenpreis 2,50 -";

    let first = parse_dkb_statement(text);
    let second = parse_dkb_statement(text);
    assert_eq!(first, second);
}

#[test]
fn parsing_from_several_threads_gives_same_result() {
    let text = "01.03.24 03.03.24 REWE, Berlin 23,10 - 15.04.24 monatlicher Kartenpreis 2,50 -";
    let expected = parse_dkb_statement(text);

    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || parse_dkb_statement(text)))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
