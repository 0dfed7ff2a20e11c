//! Price and hire period formatting.
//!
//! All functions here are pure and total: they never panic, whatever the
//! input numbers look like.

use super::offering::Offering;

/// Returns the VAT-inclusive price shown to the user, in whole pounds.
///
/// Computed as `round(price_before_vat * (1 + vat / 100))`. Rounding uses
/// [`f64::round`] (half away from zero), which is round-half-up for the
/// non-negative prices the endpoint is allowed to send. Non-finite results
/// saturate through the `as` cast instead of panicking.
///
/// # Examples
///
/// ```
/// use skiphire::{domain::pricing::display_price, Offering};
///
/// assert_eq!(display_price(&Offering::new(1, 4, 14, 211.0, 20.0)), 253);
/// assert_eq!(display_price(&Offering::new(3, 8, 14, 295.0, 20.0)), 354);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn display_price(offering: &Offering) -> i64 {
    let with_vat = offering.price_before_vat * (1.0 + offering.vat / 100.0);
    with_vat.round() as i64
}

/// Renders the hire period text, e.g. `"14 day hire period"`.
#[must_use]
pub fn format_hire_period(days: u32) -> String {
    format!("{days} day hire period")
}

/// Renders a display price as `£{price}`.
#[must_use]
pub fn format_price(price: i64) -> String {
    format!("£{price}")
}

/// Renders a secondary cost such as transport or per-tonne pricing.
///
/// Whole amounts drop the decimals (`£45`), anything else keeps two
/// (`£45.50`).
#[must_use]
pub fn format_money(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("£{amount:.0}")
    } else {
        format!("£{amount:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(price_before_vat: f64, vat: f64) -> Offering {
        Offering::new(1, 4, 14, price_before_vat, vat)
    }

    #[test]
    fn display_price_adds_vat_and_rounds() {
        assert_eq!(display_price(&priced(211.0, 20.0)), 253);
        assert_eq!(display_price(&priced(295.0, 20.0)), 354);
        assert_eq!(display_price(&priced(264.0, 20.0)), 317);
        assert_eq!(display_price(&priced(100.0, 0.0)), 100);
        assert_eq!(display_price(&priced(0.0, 20.0)), 0);
    }

    #[test]
    fn display_price_rounds_halves_up() {
        // 102.5 * 1.0 sits exactly on the half.
        assert_eq!(display_price(&priced(102.5, 0.0)), 103);
        assert_eq!(display_price(&priced(0.5, 0.0)), 1);
    }

    #[test]
    fn display_price_never_panics_on_odd_input() {
        assert_eq!(display_price(&priced(f64::NAN, 20.0)), 0);
        assert_eq!(display_price(&priced(f64::INFINITY, 20.0)), i64::MAX);
        assert_eq!(display_price(&priced(-10.0, 20.0)), -12);
    }

    #[test]
    fn hire_period_is_not_special_cased() {
        assert_eq!(format_hire_period(14), "14 day hire period");
        assert_eq!(format_hire_period(0), "0 day hire period");
        assert_eq!(format_hire_period(1), "1 day hire period");
    }

    #[test]
    fn money_formatting_drops_zero_decimals() {
        assert_eq!(format_money(45.0), "£45");
        assert_eq!(format_money(45.5), "£45.50");
        assert_eq!(format_price(253), "£253");
    }
}
