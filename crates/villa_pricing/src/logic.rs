// --- File: crates/villa_pricing/src/logic.rs ---
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use villa_config::PricingPolicy;

use crate::error::PricingError;
use crate::models::{Amount, BookingQuote, LineItem};

/// Wall-clock length of one night, in milliseconds.
pub const DAY_MILLIS: i64 = 86_400_000;
pub const CLEANING_FEE_LABEL: &str = "Cleaning Fee";

/// Parses a booking date strictly.
///
/// Accepts `YYYY-MM-DD` (taken as UTC midnight) or a full RFC 3339 timestamp.
pub fn parse_booking_date(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Number of nights between check-in and check-out.
///
/// Partial days round up, so a stay is never undercharged when timestamps
/// carry offsets. Unparseable dates are treated as an invalid range.
pub fn count_nights(check_in: &str, check_out: &str) -> Result<i64, PricingError> {
    let start = parse_booking_date(check_in).ok_or(PricingError::InvalidDateRange)?;
    let end = parse_booking_date(check_out).ok_or(PricingError::InvalidDateRange)?;

    let diff_millis = (end - start).num_milliseconds();
    if diff_millis <= 0 {
        return Err(PricingError::InvalidDateRange);
    }
    Ok((diff_millis + DAY_MILLIS - 1) / DAY_MILLIS)
}

/// Integer digits beyond this can never fit in `i64` cents.
const MAX_INTEGER_DIGITS: usize = 18;

/// `[+-]digits[.digits]`, nothing else: no separators, exponents or bare points.
fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.map_or(true, all_digits)
}

/// Converts currency units to cents with half-away-from-zero rounding on the
/// decimal text, so `"99.99"` is exactly 9999 and `"0.005"` is 1.
///
/// Text that `Decimal` could only hold by rounding it first is rejected rather
/// than rounded twice.
pub fn to_cents(
    amount: &Amount,
    field: &'static str,
    policy: &PricingPolicy,
) -> Result<i64, PricingError> {
    let text = amount.to_string();
    let trimmed = text.trim();
    let invalid = || PricingError::InvalidAmount {
        field,
        value: text.clone(),
    };
    if !is_plain_decimal(trimmed) {
        return Err(invalid());
    }

    let integer_digits = trimmed
        .trim_start_matches(['+', '-'])
        .split('.')
        .next()
        .unwrap_or_default()
        .trim_start_matches('0')
        .len();
    if integer_digits > MAX_INTEGER_DIGITS {
        return Err(PricingError::AmountOutOfRange);
    }
    let value = Decimal::from_str_exact(trimmed).map_err(|_| invalid())?;

    let cents = value
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(PricingError::AmountOutOfRange)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::AmountOutOfRange)?;

    if cents < 0 && !policy.allow_negative_amounts {
        return Err(PricingError::NegativeAmount { field });
    }
    Ok(cents)
}

/// Cents back to currency units, for display-only responses.
pub fn cents_to_units(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Prices a stay: nights × nightly rate plus a one-off cleaning fee.
///
/// The two line items are returned in checkout order, nights first. The nightly
/// line repeats the rate exactly as the caller wrote it.
pub fn calculate_booking_price(
    base_rate: &Amount,
    cleaning_fee: &Amount,
    check_in: &str,
    check_out: &str,
    policy: &PricingPolicy,
) -> Result<BookingQuote, PricingError> {
    let nights = count_nights(check_in, check_out)?;

    let base_rate_cents = to_cents(base_rate, "baseRate", policy)?;
    let cleaning_fee_cents = to_cents(cleaning_fee, "cleaningFee", policy)?;
    if base_rate_cents == 0 && !policy.allow_zero_base_rate {
        return Err(PricingError::ZeroBaseRate);
    }

    let total_base_cents = base_rate_cents
        .checked_mul(nights)
        .ok_or(PricingError::AmountOutOfRange)?;
    let total_price_cents = total_base_cents
        .checked_add(cleaning_fee_cents)
        .ok_or(PricingError::AmountOutOfRange)?;

    let line_items = vec![
        LineItem {
            name: format!("{} nights × ${}", nights, base_rate),
            amount_cents: total_base_cents,
            quantity: 1,
        },
        LineItem {
            name: CLEANING_FEE_LABEL.to_string(),
            amount_cents: cleaning_fee_cents,
            quantity: 1,
        },
    ];

    Ok(BookingQuote {
        nights,
        base_rate_cents,
        cleaning_fee_cents,
        total_base_cents,
        total_price_cents,
        line_items,
    })
}
