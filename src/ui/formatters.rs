//! Shared formatting utilities for UI components.

use crate::data::Value;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format a number with thousand separators.
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a floating point value with smart precision.
pub fn format_float(val: f64) -> String {
    if !val.is_finite() {
        return if val.is_nan() {
            "NaN".to_string()
        } else if val.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    let abs_val = val.abs();
    if abs_val == 0.0 {
        "0".to_string()
    } else if !(1e-3..1e6).contains(&abs_val) {
        format!("{:.3e}", val)
    } else if abs_val >= 100.0 {
        format!("{:.2}", val)
    } else if abs_val >= 1.0 {
        format!("{:.4}", val)
    } else {
        format!("{:.5}", val)
    }
}

/// Format a cell value for display.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Float(v) => format_float(f64::from(*v)),
        Value::Double(v) => format_float(*v),
        other => other.to_string(),
    }
}

/// Fit text into `width` terminal columns, truncating with an ellipsis and
/// padding with spaces on the left (`right_align`) or right.
pub fn fit_width(text: &str, width: usize, right_align: bool) -> String {
    let text_width = UnicodeWidthStr::width(text);
    if text_width > width {
        let mut out = String::new();
        let mut used = 0;
        for c in text.chars() {
            let w = UnicodeWidthChar::width(c).unwrap_or(0);
            if used + w + 1 > width {
                break;
            }
            out.push(c);
            used += w;
        }
        if width > 0 {
            out.push('…');
            used += 1;
        }
        out.push_str(&" ".repeat(width - used));
        return out;
    }
    let padding = " ".repeat(width - text_width);
    if right_align {
        format!("{}{}", padding, text)
    } else {
        format!("{}{}", text, padding)
    }
}
