use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use crate::models::LineItem;

/// A currency amount held at exactly two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Rounds half away from zero to two places.
    pub fn from_decimal(amount: Decimal) -> Self {
        Money(amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Add for Money {
    type Output = Money;

    /// Saturates at [`Decimal::MAX`].
    fn add(self, rhs: Money) -> Money {
        Money::from_decimal(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Missing and negative prices count as zero.
pub fn sanitize_price(price: Option<Decimal>) -> Decimal {
    match price {
        Some(p) if p.is_sign_positive() => p,
        _ => Decimal::ZERO,
    }
}

/// `(base + sum(modifiers)) * quantity`, rounded to two places.
///
/// A quantity of zero is treated as one. Amounts past [`Decimal::MAX`]
/// saturate instead of overflowing.
pub fn line_total<I>(base_price: Option<Decimal>, modifier_prices: I, quantity: u32) -> Money
where
    I: IntoIterator<Item = Option<Decimal>>,
{
    let unit = modifier_prices
        .into_iter()
        .map(sanitize_price)
        .fold(sanitize_price(base_price), Decimal::saturating_add);
    Money::from_decimal(unit.saturating_mul(Decimal::from(quantity.max(1))))
}

/// Sum of the rounded line totals. Always recomputed from the items.
pub fn cart_total(items: &[LineItem]) -> Money {
    items.iter().map(LineItem::total).sum()
}

/// Reads a quantity the way a numeric text input is read: leading sign and
/// digits only, anything unparsable or below one becomes one.
pub fn parse_quantity(raw: &str) -> u32 {
    let s = raw.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() || negative {
        return 1;
    }
    digits.parse::<u32>().unwrap_or(u32::MAX).max(1)
}

pub fn clamp_quantity(quantity: i64) -> u32 {
    quantity.clamp(1, u32::MAX as i64) as u32
}
