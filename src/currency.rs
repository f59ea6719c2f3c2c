//! Formats amounts as currency for the list and total views.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Format an amount as a `$` currency string with two decimal places,
/// e.g. `1234.5` becomes `$1,234.50`.
pub fn format_amount(amount: f64) -> String {
    static FMT: OnceLock<Formatter> = OnceLock::new();

    let fmt = FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    if amount == 0.0 {
        // Zero is hardcoded as "0" by numfmt, so spell it out ourselves.
        return "$0.00".to_owned();
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    let mut formatted = fmt.fmt_string(amount.abs());

    // numfmt drops the last trailing zero ("12.30" renders as "12.3"),
    // so restore it when the decimal point is one place too close.
    if formatted.as_bytes()[formatted.len() - 3] != b'.' {
        formatted = format!("{formatted}0");
    }

    format!("{sign}{formatted}")
}
