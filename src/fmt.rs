use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount with thousands separators: 1,234.56
pub fn money(val: Decimal) -> String {
    let negative = val < Decimal::ZERO;
    let cents = val
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
        .to_string();
    let (int_part, dec_part) = match cents.split_once('.') {
        Some((i, d)) if d.len() >= 2 => (i.to_string(), d[..2].to_string()),
        Some((i, d)) => (i.to_string(), format!("{d:0<2}")),
        None => (cents, "00".to_string()),
    };

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-{with_commas}.{dec_part}")
    } else {
        format!("{with_commas}.{dec_part}")
    }
}
