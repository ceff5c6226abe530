// File: crates/bar-core/src/ticks.rs
// Summary: Tick layout helpers: round tick steps over a linear domain and their labels.

/// Step between ticks: a power of ten times 1, 2 or 5 giving roughly `count` ticks.
/// Returns 0 for an empty or non-finite domain.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let (lo, hi) = if start <= stop { (start, stop) } else { (stop, start) };
    let span = hi - lo;
    if !(span > 0.0) || !span.is_finite() || count == 0 {
        return 0.0;
    }
    let m = count as f64;
    let mut step = 10f64.powf((span / m).log10().floor());
    let err = m / span * step;
    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.35 {
        step *= 5.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }
    step
}

/// Ascending multiples of `tick_step` inside the domain (endpoints included when round).
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let (lo, hi) = if start <= stop { (start, stop) } else { (stop, start) };
    if !lo.is_finite() || !hi.is_finite() {
        return Vec::new();
    }
    if lo == hi {
        return vec![lo];
    }
    let step = tick_step(lo, hi, count);
    if step == 0.0 {
        return Vec::new();
    }
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    // multiply integers by the step so 0.1-steps do not accumulate drift
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Fixed-precision label with thousands grouping, e.g. `12,500` or `0.25`.
pub fn format_tick(value: f64, step: f64) -> String {
    let precision = if step > 0.0 {
        (-(step.log10() + 0.01).floor()).max(0.0) as usize
    } else {
        0
    };
    let fixed = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}
