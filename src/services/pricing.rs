//! Pricing rules for product packages.
//!
//! `final_price` is a pure function of `(price, discount, is_active_discount)`
//! and is persisted in the same statement as the fields it derives from, so a
//! reader can never observe a stale derivation.

use crate::errors::ServiceError;

pub const MIN_DISCOUNT: i16 = 0;
pub const MAX_DISCOUNT: i16 = 99;
pub const MAX_RATING: f64 = 5.0;

/// Buyer-facing price after the discount gate.
///
/// Uses integer division, so the discounted amount truncates toward zero
/// (a 33% discount on 999 takes off 329, not 330).
pub fn compute_final_price(price: i64, discount: i16, is_active_discount: bool) -> i64 {
    if is_active_discount && discount > 0 {
        price - discount_amount(price, discount)
    } else {
        price
    }
}

/// Informational saving for the configured discount percentage.
///
/// Deliberately ignores `is_active_discount`: responses report what a staged
/// discount would save even while it is switched off. The persisted
/// `final_price` is the gated figure.
pub fn discount_amount(price: i64, discount: i16) -> i64 {
    ((price as i128 * discount as i128) / 100) as i64
}

/// Prices are integer currency units and must be positive.
pub fn validate_price(price: i64) -> Result<(), ServiceError> {
    if price <= 0 {
        return Err(ServiceError::ValidationError(format!(
            "price must be a positive integer, got {price}"
        )));
    }
    Ok(())
}

/// Discounts are whole percentages in `[0, 99]`. Out-of-range values are
/// rejected, never clamped.
pub fn validate_discount(discount: i16) -> Result<(), ServiceError> {
    if !(MIN_DISCOUNT..=MAX_DISCOUNT).contains(&discount) {
        return Err(ServiceError::ValidationError(format!(
            "discount must be within {MIN_DISCOUNT}..={MAX_DISCOUNT}, got {discount}"
        )));
    }
    Ok(())
}

pub fn validate_rating(rating: f64) -> Result<(), ServiceError> {
    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(ServiceError::ValidationError(format!(
            "rating must be within 0.0..=5.0, got {rating}"
        )));
    }
    Ok(())
}

pub fn validate_quantity(quantity: i32) -> Result<(), ServiceError> {
    if quantity < 0 {
        return Err(ServiceError::ValidationError(format!(
            "quantity cannot be negative, got {quantity}"
        )));
    }
    Ok(())
}

pub fn validate_weight(weight_grams: i32) -> Result<(), ServiceError> {
    if weight_grams < 0 {
        return Err(ServiceError::ValidationError(format!(
            "weight cannot be negative, got {weight_grams}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(1000, 20, true, 800)]
    #[case(999, 33, true, 670)] // floor(999 * 33 / 100) == 329
    #[case(1000, 20, false, 1000)]
    #[case(1000, 0, true, 1000)]
    #[case(1, 99, true, 1)] // floor(1 * 99 / 100) == 0
    #[case(100, 1, true, 99)]
    #[case(i64::MAX, 50, true, i64::MAX - i64::MAX / 2)]
    fn final_price_cases(
        #[case] price: i64,
        #[case] discount: i16,
        #[case] active: bool,
        #[case] expected: i64,
    ) {
        assert_eq!(compute_final_price(price, discount, active), expected);
    }

    #[test]
    fn discount_amount_ignores_the_gate() {
        // The informational figure reports the configured saving even while
        // the discount is switched off.
        assert_eq!(discount_amount(1000, 20), 200);
        assert_eq!(
            compute_final_price(1000, 20, false),
            1000,
            "persisted price honors the gate"
        );
    }

    #[rstest]
    #[case(-1)]
    #[case(100)]
    #[case(i16::MAX)]
    #[case(i16::MIN)]
    fn out_of_range_discounts_are_rejected(#[case] discount: i16) {
        assert!(validate_discount(discount).is_err());
    }

    #[rstest]
    #[case(0)]
    #[case(99)]
    #[case(50)]
    fn in_range_discounts_pass(#[case] discount: i16) {
        assert!(validate_discount(discount).is_ok());
    }

    #[test]
    fn zero_and_negative_prices_are_rejected() {
        assert!(validate_price(0).is_err());
        assert!(validate_price(-100).is_err());
        assert!(validate_price(1).is_ok());
    }

    proptest! {
        #[test]
        fn inactive_gate_leaves_price_untouched(price in 0i64..=1_000_000_000_000, discount in 0i16..=99) {
            prop_assert_eq!(compute_final_price(price, discount, false), price);
        }

        #[test]
        fn zero_discount_leaves_price_untouched(price in 0i64..=1_000_000_000_000, active: bool) {
            prop_assert_eq!(compute_final_price(price, 0, active), price);
        }

        #[test]
        fn active_discount_never_raises_the_price(price in 0i64..=1_000_000_000_000, discount in 0i16..=99) {
            let final_price = compute_final_price(price, discount, true);
            prop_assert!(final_price <= price);
            // A 99% cap means the buyer always pays something on a positive price.
            if price > 0 {
                prop_assert!(final_price > 0);
            }
        }

        #[test]
        fn derivation_matches_the_closed_form(price in 0i64..=1_000_000_000_000, discount in 1i16..=99) {
            let expected = price - (price * discount as i64) / 100;
            prop_assert_eq!(compute_final_price(price, discount, true), expected);
        }
    }
}
