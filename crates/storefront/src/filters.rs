//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the content hash of the stylesheet and script bundle.
///
/// The hash is computed at build time from the asset files.
///
/// Usage in templates: `/static/css/main.css?v={{ ""|asset_hash }}`
#[askama::filter_fn]
pub fn asset_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("ASSET_HASH"))
}

/// Formats a price amount with digit grouping and the rouble sign.
///
/// `42900.00` renders as `42 900 ₽`; kopecks are shown only when non-zero.
///
/// Usage in templates: `{{ product.price.amount|rub }}`
#[askama::filter_fn]
pub fn rub(amount: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_rub(&amount.to_string()))
}

fn format_rub(amount: &str) -> String {
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));
    let (sign, digits) = whole
        .strip_prefix('-')
        .map_or(("", whole), |rest| ("-", rest));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{a0}');
        }
        grouped.push(c);
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        format!("{sign}{grouped}\u{a0}₽")
    } else {
        format!("{sign}{grouped},{fraction:0<2}\u{a0}₽")
    }
}
