// File: crates/bar-core/tests/convert.rs
// Purpose: Validate row -> record conversion, coercion rules and the short-row guard.

use bar_core::{convert, Cell, ConvertError, Record};

fn text_rows(rows: &[&[&str]]) -> Vec<Vec<Cell>> {
    rows.iter().map(|r| r.iter().map(|&s| Cell::from(s)).collect()).collect()
}

#[test]
fn preserves_order_and_length() {
    let rows = text_rows(&[&["USA", "10"], &["UK", "5"], &["USA", "7"]]);
    let out = convert(&rows).expect("convert");
    assert_eq!(
        out,
        vec![Record::new("USA", 10.0), Record::new("UK", 5.0), Record::new("USA", 7.0)]
    );
}

#[test]
fn repeated_calls_are_identical() {
    let rows = text_rows(&[&["a", "1.5"], &["b", " 2 "], &["c", "x"]]);
    let first = convert(&rows).expect("first");
    let second = convert(&rows).expect("second");
    assert_eq!(first.len(), rows.len());
    // NaN != NaN, so compare the parts separately
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.category, b.category);
        assert_eq!(a.amount.to_bits(), b.amount.to_bits());
    }
}

#[test]
fn non_numeric_amount_is_nan() {
    let out = convert(&text_rows(&[&["France", "abc"]])).expect("convert");
    assert_eq!(out[0].category, "France");
    assert!(out[0].amount.is_nan());
}

#[test]
fn numeric_coercion_rules() {
    let cases: &[(Cell, f64)] = &[
        (Cell::from(""), 0.0),
        (Cell::from("   "), 0.0),
        (Cell::from(" 42 "), 42.0),
        (Cell::from("-3.5e2"), -350.0),
        (Cell::from(".5"), 0.5),
        (Cell::from("0x1A"), 26.0),
        (Cell::from("0b101"), 5.0),
        (Cell::from("Infinity"), f64::INFINITY),
        (Cell::from("-Infinity"), f64::NEG_INFINITY),
        (Cell::Number(7.25), 7.25),
        (Cell::Bool(true), 1.0),
        (Cell::Bool(false), 0.0),
        (Cell::Null, 0.0),
    ];
    for (cell, want) in cases {
        let got = bar_core::convert::cell_number(cell);
        assert_eq!(got, *want, "cell {cell:?}");
    }
    for bad in ["inf", "nan", "1,000", "12px", "0xZZ"] {
        assert!(bar_core::convert::cell_number(&Cell::from(bad)).is_nan(), "{bad} should be NaN");
    }
}

#[test]
fn category_text_rules() {
    use bar_core::convert::cell_text;
    assert_eq!(cell_text(&Cell::Number(10.0)), "10");
    assert_eq!(cell_text(&Cell::Number(1.5)), "1.5");
    assert_eq!(cell_text(&Cell::Number(-0.0)), "0");
    assert_eq!(cell_text(&Cell::Number(f64::INFINITY)), "Infinity");
    assert_eq!(cell_text(&Cell::Bool(false)), "false");
    assert_eq!(cell_text(&Cell::Null), "");
}

#[test]
fn category_text_switches_to_exponent_form_like_the_host() {
    use bar_core::convert::cell_text;
    let text = |v: f64| cell_text(&Cell::Number(v));
    assert_eq!(text(1e21), "1e+21");
    assert_eq!(text(1e20), "100000000000000000000");
    assert_eq!(text(1.5e300), "1.5e+300");
    assert_eq!(text(1e-7), "1e-7");
    assert_eq!(text(1.25e-7), "1.25e-7");
    assert_eq!(text(0.000001), "0.000001");
    assert_eq!(text(0.001), "0.001");
    assert_eq!(text(123.456), "123.456");
    assert_eq!(text(-2.5e-9), "-2.5e-9");
    assert_eq!(text(-42.0), "-42");
}

#[test]
fn wide_radix_literals_round_instead_of_failing() {
    use bar_core::convert::cell_number;
    let num = |s: &str| cell_number(&Cell::from(s));
    assert_eq!(num("0x1FFFFFFFFFFFFFFFF"), 2f64.powi(65));
    assert_eq!(num("0x1FFFFFFFFFFFFFFFFF"), 2f64.powi(69));
    assert_eq!(num(&format!("0b1{}", "0".repeat(200))), 2f64.powi(200));
    assert_eq!(num("0xff"), 255.0);
    assert!(num("0x").is_nan());
}

#[test]
fn extra_cells_are_ignored() {
    let rows = vec![vec![Cell::from("DE"), Cell::Number(3.0), Cell::from("ignored")]];
    assert_eq!(convert(&rows).expect("convert"), vec![Record::new("DE", 3.0)]);
}

#[test]
fn short_row_fails_with_input_shape() {
    let rows = vec![
        vec![Cell::from("ok"), Cell::Number(1.0)],
        vec![Cell::from("lonely")],
    ];
    let err = convert(&rows).unwrap_err();
    assert_eq!(err, ConvertError::InputShape { row: 1, cells: 1 });
    assert!(err.to_string().contains("row 1"));
}

#[test]
fn empty_input_gives_empty_output() {
    assert!(convert(&[]).expect("convert").is_empty());
}
