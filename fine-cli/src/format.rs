use std::sync::LazyLock;

use fine_core::InputError;
use fine_core::calculations::round_half_up;
use fine_core::request::parse_amount;
use regex::Regex;
use rust_decimal::Decimal;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s$,_]").expect("separator pattern is valid"));

static SUFFIXED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-9]+(?:\.[0-9]+)?)([kmb])$").expect("suffix pattern is valid")
});

/// Parses a money amount as typed by a person.
///
/// Handles a leading `$`, thousands separators (`,` `_` or spaces) and a
/// `k`/`m`/`b` magnitude suffix, so `"$45,640,084"`, `"45.6m"` and `"25k"`
/// all work. Anything else goes through the strict request parser.
pub fn parse_money(
    field: &'static str,
    raw: &str,
) -> Result<Decimal, InputError> {
    let cleaned = SEPARATORS.replace_all(raw, "");

    if let Some(caps) = SUFFIXED.captures(&cleaned) {
        let base = parse_amount(field, &caps[1])?;
        let scale: i64 = match caps[2].to_ascii_lowercase().as_str() {
            "k" => 1_000,
            "m" => 1_000_000,
            _ => 1_000_000_000,
        };
        return base
            .checked_mul(Decimal::from(scale))
            .ok_or(InputError::AmountTooLarge { field });
    }

    parse_amount(field, &cleaned).map_err(|err| match err {
        InputError::NotANumber { field, .. } => InputError::NotANumber {
            field,
            value: raw.to_string(),
        },
        other => other,
    })
}

/// `$1,234.57` style, rounded half-up to cents.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}

/// A percentage with four decimals, e.g. `0.1487%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.4}%", value)
}

/// A rate fraction as a percentage, e.g. `0.0145` as `1.45%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
