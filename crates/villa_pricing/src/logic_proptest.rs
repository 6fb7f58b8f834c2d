#[cfg(test)]
mod tests {
    use crate::error::PricingError;
    use crate::logic::{calculate_booking_price, CLEANING_FEE_LABEL};
    use crate::models::Amount;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;
    use villa_config::PricingPolicy;

    // Renders whole cents as a currency-unit string, e.g. 12345 -> "123.45"
    fn cents_text(cents: i64) -> String {
        format!("{}.{:02}", cents / 100, cents % 100)
    }

    fn date_text(days_from_epoch: i64) -> String {
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        (base + Duration::days(days_from_epoch))
            .format("%Y-%m-%d")
            .to_string()
    }

    proptest! {
        #[test]
        fn test_totals_match_nights_times_rate(
            base_cents in 0..10_000_000i64,
            fee_cents in 0..1_000_000i64,
            start in 0..3_000i64,
            nights in 1..60i64,
        ) {
            let quote = calculate_booking_price(
                &Amount::Text(cents_text(base_cents)),
                &Amount::Text(cents_text(fee_cents)),
                &date_text(start),
                &date_text(start + nights),
                &PricingPolicy::default(),
            ).unwrap();

            prop_assert_eq!(quote.nights, nights);
            prop_assert_eq!(quote.base_rate_cents, base_cents);
            prop_assert_eq!(quote.cleaning_fee_cents, fee_cents);
            prop_assert_eq!(quote.total_base_cents, base_cents * nights);
            prop_assert_eq!(quote.total_price_cents, base_cents * nights + fee_cents);
        }

        #[test]
        fn test_line_items_are_nights_then_cleaning_fee(
            base_cents in 0..10_000_000i64,
            fee_cents in 0..1_000_000i64,
            nights in 1..30i64,
        ) {
            let base_text = cents_text(base_cents);
            let quote = calculate_booking_price(
                &Amount::Text(base_text.clone()),
                &Amount::Text(cents_text(fee_cents)),
                &date_text(0),
                &date_text(nights),
                &PricingPolicy::default(),
            ).unwrap();

            prop_assert_eq!(quote.line_items.len(), 2);
            prop_assert_eq!(&quote.line_items[0].name, &format!("{} nights × ${}", nights, base_text));
            prop_assert_eq!(quote.line_items[0].amount_cents, quote.total_base_cents);
            prop_assert_eq!(quote.line_items[0].quantity, 1);
            prop_assert_eq!(&quote.line_items[1].name, CLEANING_FEE_LABEL);
            prop_assert_eq!(quote.line_items[1].amount_cents, quote.cleaning_fee_cents);
            prop_assert_eq!(quote.line_items[1].quantity, 1);
        }

        #[test]
        fn test_checkout_not_after_checkin_is_rejected(
            start in 0..3_000i64,
            back in 0..30i64,
        ) {
            let result = calculate_booking_price(
                &Amount::from("100"),
                &Amount::from("50"),
                &date_text(start),
                &date_text(start - back),
                &PricingPolicy::default(),
            );
            prop_assert_eq!(result, Err(PricingError::InvalidDateRange));
        }

        #[test]
        fn test_repeated_calls_are_identical(
            base_cents in 0..10_000_000i64,
            fee_cents in 0..1_000_000i64,
            nights in 1..30i64,
        ) {
            let run = || calculate_booking_price(
                &Amount::Text(cents_text(base_cents)),
                &Amount::Text(cents_text(fee_cents)),
                &date_text(10),
                &date_text(10 + nights),
                &PricingPolicy::default(),
            );
            prop_assert_eq!(run(), run());
        }
    }
}
