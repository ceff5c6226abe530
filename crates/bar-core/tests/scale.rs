// File: crates/bar-core/tests/scale.rs
// Purpose: Validate band and value scales, tick steps and tick labels.

use bar_core::ticks::{format_tick, nice_ticks, tick_step};
use bar_core::{BandScale, ValueScale};

#[test]
fn band_scale_two_categories() {
    let s = BandScale::new(["USA", "UK"], 510.0, 0.1);
    assert_eq!(s.step(), 242.0);
    assert_eq!(s.band_width(), 218.0);
    assert_eq!(s.map("USA"), Some(25.0));
    assert_eq!(s.map("UK"), Some(267.0));
    assert_eq!(s.center("USA"), Some(134.0));
    assert_eq!(s.map("France"), None);
}

#[test]
fn band_scale_dedups_in_first_seen_order() {
    let s = BandScale::new(["b", "a", "b", "c"], 300.0, 0.1);
    assert_eq!(s.domain(), ["b", "a", "c"]);
    assert!(s.map("b").unwrap() < s.map("a").unwrap());
    assert!(s.map("a").unwrap() < s.map("c").unwrap());
}

#[test]
fn bands_stay_inside_range_and_do_not_overlap() {
    for n in 1..40usize {
        for width in [90.0, 333.0, 510.0, 1234.0] {
            let cats: Vec<String> = (0..n).map(|i| format!("c{i}")).collect();
            let s = BandScale::new(&cats, width, 0.1);
            let bw = s.band_width();
            let mut prev_end = f64::NEG_INFINITY;
            for c in &cats {
                let x = s.map(c).unwrap();
                assert!(x >= 0.0, "n={n} w={width}: start {x} < 0");
                assert!(x <= width - bw + 1.0, "n={n} w={width}: band {x}+{bw} past {width}");
                assert!(x >= prev_end, "n={n} w={width}: overlap at {c}");
                prev_end = x + bw;
            }
        }
    }
}

#[test]
fn band_scale_degenerate_width_collapses() {
    for width in [0.0, -40.0, f64::NAN] {
        let s = BandScale::new(["a", "b"], width, 0.1);
        assert_eq!(s.band_width(), 0.0);
        assert_eq!(s.map("a"), Some(0.0));
        assert_eq!(s.map("b"), Some(0.0));
    }
    let empty = BandScale::new(Vec::<&str>::new(), 500.0, 0.1);
    assert!(empty.domain().is_empty());
    assert_eq!(empty.band_width(), 0.0);
}

#[test]
fn value_scale_domain_and_inversion() {
    let s = ValueScale::for_amounts([10.0, 5.0], 10.0, 180.0);
    assert_eq!(s.vmax, 20.0);
    assert_eq!(s.to_px(0.0), 180.0);
    assert_eq!(s.to_px(10.0), 90.0);
    assert_eq!(s.to_px(20.0), 0.0);
    assert!((s.from_px(45.0) - 15.0).abs() < 1e-9);
}

#[test]
fn value_scale_is_monotonically_decreasing() {
    let s = ValueScale::for_amounts([3.0, 99.0, 42.0], 10.0, 300.0);
    let mut prev = f64::INFINITY;
    for i in 0..=109 {
        let px = s.to_px(i as f64);
        assert!(px < prev, "to_px({i}) = {px} not below {prev}");
        prev = px;
    }
}

#[test]
fn value_scale_ignores_nan_and_defaults_when_empty() {
    let s = ValueScale::for_amounts([f64::NAN, 4.0], 10.0, 100.0);
    assert_eq!(s.vmax, 14.0);

    let only_nan = ValueScale::for_amounts([f64::NAN], 10.0, 100.0);
    assert_eq!((only_nan.vmin, only_nan.vmax), (0.0, 10.0));

    let empty = ValueScale::for_amounts(std::iter::empty(), 10.0, 100.0);
    assert_eq!((empty.vmin, empty.vmax), (0.0, 10.0));
    assert!(empty.to_px(f64::NAN).is_nan());
}

#[test]
fn tick_steps_are_round() {
    assert_eq!(tick_step(0.0, 20.0, 10), 2.0);
    assert_eq!(tick_step(0.0, 10.0, 10), 1.0);
    assert_eq!(tick_step(0.0, 110.0, 10), 10.0);
    assert!((tick_step(0.0, 1.0, 10) - 0.1).abs() < 1e-12);
    assert_eq!(tick_step(0.0, 0.0, 10), 0.0);
}

#[test]
fn nice_ticks_cover_domain() {
    let t = nice_ticks(0.0, 20.0, 10);
    assert_eq!(t, (0..=10).map(|i| i as f64 * 2.0).collect::<Vec<_>>());
    let t = nice_ticks(0.0, 1.0, 10);
    assert_eq!(t.len(), 11);
    assert!((t[3] - 0.3).abs() < 1e-12);
    let t = nice_ticks(-5.0, 0.0, 5);
    assert_eq!(t.first(), Some(&-5.0));
    assert_eq!(t.last(), Some(&0.0));
    assert!(nice_ticks(0.0, f64::NAN, 10).is_empty());
}

#[test]
fn tick_labels_use_step_precision_and_grouping() {
    assert_eq!(format_tick(2.0, 2.0), "2");
    assert_eq!(format_tick(12500.0, 500.0), "12,500");
    assert_eq!(format_tick(1234567.0, 100000.0), "1,234,567");
    assert_eq!(format_tick(0.30000000000000004, 0.1), "0.3");
    assert_eq!(format_tick(0.25, 0.05), "0.25");
    assert_eq!(format_tick(-1500.0, 500.0), "-1,500");
    assert_eq!(format_tick(-0.0, 1.0), "0");

    let s = ValueScale::for_amounts([10.0, 5.0], 10.0, 180.0);
    let labels: Vec<String> = s.tick_labels(10).into_iter().map(|(_, l)| l).collect();
    assert_eq!(labels.first().map(String::as_str), Some("0"));
    assert_eq!(labels.last().map(String::as_str), Some("20"));
}

#[test]
fn band_lookup_by_name_across_large_domain() {
    let cats: Vec<String> = (0..10_000).map(|i| format!("k{i}")).collect();
    let s = BandScale::new(cats.iter().chain(cats.iter().rev()), 100_000.0, 0.1);
    assert_eq!(s.domain().len(), 10_000);
    assert_eq!(s.index_of("k0"), Some(0));
    assert_eq!(s.index_of("k9999"), Some(9_999));
    assert_eq!(s.index_of("missing"), None);
    assert!(s.map("k1").unwrap() > s.map("k0").unwrap());
}
