/// Number formatting for user-visible messages.
///
/// Output matches what a script engine prints for the same number, so a value
/// typed into the page comes back looking the same.
///
/// Rust's float-to-decimal formatting has had wasm-facing panics in some
/// toolchain/browser combinations (see `dragon.rs` panics), and these messages
/// are rendered inside the wasm build. So these helpers do **not** use
/// `format!` on floats. They:
/// - Handle `NaN`/`±Infinity` and `-0` explicitly.
/// - For finite values, find the fewest significant digits that parse back to
///   the same value by scaling + rounding into a `u64`, then format integers.
/// - Lay the digits out as plain decimals for magnitudes in `[1e-6, 1e21)` and
///   in exponent notation with an explicit exponent sign otherwise.

pub fn fmt_value(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    if v == 0.0 {
        return "0".to_string();
    }

    let (digits, exp10) = shortest_digits(v.abs());
    let mut out = String::new();
    if v < 0.0 {
        out.push('-');
    }
    layout(&mut out, &digits, exp10);
    out
}

/// Multiply by `10^shift` in steps that stay within f64 range.
fn scale_pow10(mut x: f64, mut shift: i32) -> f64 {
    while shift > 300 {
        x *= 1e300;
        shift -= 300;
    }
    while shift < -300 {
        x /= 1e300;
        shift += 300;
    }
    if shift >= 0 {
        x * 10f64.powi(shift)
    } else {
        x / 10f64.powi(-shift)
    }
}

/// Significant digits (no trailing zeros) and the decimal exponent of the
/// first digit, i.e. `abs ≈ d.ddd × 10^exp10`.
fn shortest_digits(abs: f64) -> (String, i32) {
    let estimate = abs.log10().floor() as i32;
    let mut fallback = None;

    for precision in 1..=17u32 {
        // A carry at one precision must not shift the exponent for the next.
        let mut exp10 = estimate;
        let (mantissa, e) = loop {
            let scaled = scale_pow10(abs, precision as i32 - 1 - exp10).round();
            let m = scaled as u64;
            if m >= 10u64.pow(precision) {
                exp10 += 1;
            } else if m < 10u64.pow(precision - 1) {
                exp10 -= 1;
            } else {
                break (m, exp10);
            }
        };

        let digits = mantissa.to_string();
        let candidate = format!(
            "{}.{}e{}",
            &digits[..1],
            if digits.len() > 1 { &digits[1..] } else { "0" },
            e
        );
        fallback = Some((digits.clone(), e));
        if candidate.parse::<f64>() == Ok(abs) {
            return (digits.trim_end_matches('0').to_string(), e);
        }
    }

    let (digits, e) = fallback.unwrap_or_else(|| ("0".to_string(), 0));
    let trimmed = digits.trim_end_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
    (trimmed.to_string(), e)
}

fn layout(out: &mut String, digits: &str, exp10: i32) {
    let k = digits.len() as i32;
    // Position of the decimal point relative to the first digit.
    let n = exp10 + 1;

    if k <= n && n <= 21 {
        out.push_str(digits);
        for _ in 0..(n - k) {
            out.push('0');
        }
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        out.push_str(int_part);
        out.push('.');
        out.push_str(frac_part);
    } else if -6 < n && n <= 0 {
        out.push_str("0.");
        for _ in 0..(-n) {
            out.push('0');
        }
        out.push_str(digits);
    } else {
        out.push_str(&digits[..1]);
        if k > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        if exp10 >= 0 {
            out.push('+');
        }
        out.push_str(&exp10.to_string());
    }
}
