use rust_decimal::{Decimal, RoundingStrategy};

/// Deductible portion of an amount: `amount * percent / 100`, rounded to
/// cent precision with banker's rounding (half-to-even) so repeated
/// midpoints don't drift the totals upward.
pub fn deductible_amount(amount: Decimal, percent: Decimal) -> Decimal {
    (amount * percent / Decimal::from(100))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}
