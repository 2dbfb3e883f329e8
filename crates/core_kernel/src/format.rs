//! Locale-aware number and currency formatting
//!
//! Amounts are rendered the Argentine way: `.` groups thousands and `,`
//! marks decimals, so `1234567.5` with two decimals reads `1.234.567,50`.
//! Parsing is the inverse and never fails: anything that does not start
//! with a number reads as zero.
//!
//! Every function here is pure and keeps no state, so the UI layer can
//! call them from overlapping input events without coordination.

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Largest number of fractional digits a `Decimal` can carry
const MAX_DECIMALS: u32 = 28;

/// Conversion of the many shapes an amount arrives in into a `Decimal`
///
/// Missing values, NaN and infinities all become zero, which is what a
/// display field should show for them.
pub trait IntoAmount {
    fn into_amount(self) -> Decimal;
}

impl IntoAmount for Decimal {
    fn into_amount(self) -> Decimal {
        self
    }
}

impl IntoAmount for &Decimal {
    fn into_amount(self) -> Decimal {
        *self
    }
}

impl IntoAmount for f64 {
    fn into_amount(self) -> Decimal {
        if !self.is_finite() {
            return Decimal::ZERO;
        }
        Decimal::from_f64(self).unwrap_or(Decimal::ZERO)
    }
}

impl IntoAmount for i64 {
    fn into_amount(self) -> Decimal {
        Decimal::from(self)
    }
}

impl IntoAmount for u64 {
    fn into_amount(self) -> Decimal {
        Decimal::from(self)
    }
}

impl IntoAmount for i32 {
    fn into_amount(self) -> Decimal {
        Decimal::from(self)
    }
}

impl IntoAmount for u32 {
    fn into_amount(self) -> Decimal {
        Decimal::from(self)
    }
}

impl<T: IntoAmount> IntoAmount for Option<T> {
    fn into_amount(self) -> Decimal {
        self.map(IntoAmount::into_amount).unwrap_or(Decimal::ZERO)
    }
}

/// Separators and currency symbol used to render amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    /// Thousands separator
    pub grouping: char,
    /// Decimal separator
    pub decimal: char,
    /// Currency symbol prefixed by [`NumberFormat::format_currency`]
    pub symbol: &'static str,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::ARGENTINE
    }
}

/// Result of reformatting a field while the user types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveInput {
    /// Canonical grouped text for the field
    pub text: String,
    /// Caret position after reformatting, in characters
    pub cursor: usize,
}

impl NumberFormat {
    /// Argentine pesos: `$1.234.567,89`
    pub const ARGENTINE: NumberFormat = NumberFormat {
        grouping: '.',
        decimal: ',',
        symbol: "$",
    };

    /// Formats an amount with `decimals` fractional digits
    ///
    /// With decimals the value is rounded half away from zero and padded so
    /// exactly `decimals` digits follow the decimal separator. With zero
    /// decimals halves round up, so `-1234.5` reads `-1.234`, and only the
    /// grouped integer part is returned.
    pub fn format(&self, amount: impl IntoAmount, decimals: u32) -> String {
        let decimals = decimals.min(MAX_DECIMALS);
        let amount = amount.into_amount();
        let strategy = if decimals == 0 && amount.is_sign_negative() {
            RoundingStrategy::MidpointTowardZero
        } else {
            RoundingStrategy::MidpointAwayFromZero
        };
        let mut rounded = amount.round_dp_with_strategy(decimals, strategy);
        // Values near Decimal::MAX have no room for the scale; padded below
        rounded.rescale(decimals);

        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let plain = rounded.abs().to_string();
        let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

        let mut out = String::with_capacity(plain.len() + plain.len() / 3 + 1);
        if negative {
            out.push('-');
        }
        out.push_str(&self.group_digits(int_part));
        if decimals > 0 {
            out.push(self.decimal);
            out.push_str(frac_part);
            for _ in frac_part.len()..decimals as usize {
                out.push('0');
            }
        }
        out
    }

    /// Formats an amount prefixed with the currency symbol
    pub fn format_currency(&self, amount: impl IntoAmount, decimals: u32) -> String {
        format!("{}{}", self.symbol, self.format(amount, decimals))
    }

    /// Formats with an arbitrary symbol, optionally blanking zero
    ///
    /// Returns an empty string when the amount is missing, or when it is
    /// zero and `show_zero` is false.
    pub fn format_with_symbol<A: IntoAmount>(
        &self,
        amount: Option<A>,
        symbol: &str,
        decimals: u32,
        show_zero: bool,
    ) -> String {
        let Some(amount) = amount else {
            return String::new();
        };
        let amount = amount.into_amount();
        if amount.is_zero() && !show_zero {
            return String::new();
        }
        format!("{}{}", symbol, self.format(amount, decimals))
    }

    /// Parses a formatted amount back into a number
    ///
    /// Grouping separators are dropped and the first decimal separator
    /// becomes a dot. Only the leading numeric part is read, so
    /// `"12 cuotas"` is 12 and `"abc"` is 0.
    pub fn parse<'a>(&self, text: impl Into<Option<&'a str>>) -> Decimal {
        let Some(text) = text.into() else {
            return Decimal::ZERO;
        };
        if text.is_empty() {
            return Decimal::ZERO;
        }

        let mut cleaned: String = text.chars().filter(|c| *c != self.grouping).collect();
        if let Some(pos) = cleaned.find(self.decimal) {
            cleaned.replace_range(pos..pos + self.decimal.len_utf8(), ".");
        }

        parse_decimal_prefix(&cleaned).unwrap_or(Decimal::ZERO)
    }

    /// Reformats a field while the user is typing
    ///
    /// Everything but ASCII digits is discarded; the digits are rendered as
    /// a grouped integer. Decimals cannot be entered this way.
    pub fn format_live_input(&self, current: &str) -> String {
        let digits: String = current.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return String::new();
        }
        let significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            return "0".to_string();
        }
        self.group_digits(significant)
    }

    /// Same as [`NumberFormat::format_live_input`], also moving the caret
    /// by the number of characters the reformatting added or removed.
    pub fn reformat_live_input(&self, current: &str, cursor: usize) -> LiveInput {
        let text = self.format_live_input(current);
        let old_len = current.chars().count() as i64;
        let new_len = text.chars().count() as i64;
        let shifted = (cursor as i64 + new_len - old_len).clamp(0, new_len);
        LiveInput {
            text,
            cursor: shifted as usize,
        }
    }

    /// Inserts the grouping separator every three digits from the right
    fn group_digits(&self, digits: &str) -> String {
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(self.grouping);
            }
            out.push(ch);
        }
        out
    }
}

/// Reads the longest `[-]digits[.digits]` prefix, after leading whitespace
///
/// This is the plain dot-decimal reading used for fields such as the
/// interest rate, which are never grouped. `None` when no digits lead.
/// Magnitudes beyond `Decimal::MAX` (about 7.9e28) saturate to
/// `Decimal::MAX` / `Decimal::MIN`.
pub fn parse_decimal_prefix(text: &str) -> Option<Decimal> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let int_digits = &rest[..int_len];
    let frac_digits = rest[int_len..]
        .strip_prefix('.')
        .map(|after| &after[..after.bytes().take_while(u8::is_ascii_digit).count()])
        .unwrap_or("");

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut literal = String::with_capacity(int_len + frac_digits.len() + 3);
    if negative {
        literal.push('-');
    }
    literal.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        literal.push('.');
        literal.push_str(frac_digits);
    }

    let saturated = if negative { Decimal::MIN } else { Decimal::MAX };
    Some(Decimal::from_str(&literal).unwrap_or(saturated))
}

/// Formats with the Argentine convention. See [`NumberFormat::format`].
pub fn format_number(amount: impl IntoAmount, decimals: u32) -> String {
    NumberFormat::ARGENTINE.format(amount, decimals)
}

/// `$` followed by [`format_number`]
pub fn format_currency(amount: impl IntoAmount, decimals: u32) -> String {
    NumberFormat::ARGENTINE.format_currency(amount, decimals)
}

/// Currency with two decimals, e.g. `$1.234.567,50`
pub fn format_currency_full(amount: impl IntoAmount) -> String {
    NumberFormat::ARGENTINE.format_currency(amount, 2)
}

pub fn format_with_symbol<A: IntoAmount>(
    amount: Option<A>,
    symbol: &str,
    decimals: u32,
    show_zero: bool,
) -> String {
    NumberFormat::ARGENTINE.format_with_symbol(amount, symbol, decimals, show_zero)
}

/// Parses Argentine-formatted text. See [`NumberFormat::parse`].
pub fn parse_amount<'a>(text: impl Into<Option<&'a str>>) -> Decimal {
    NumberFormat::ARGENTINE.parse(text)
}

pub fn format_live_input(current: &str) -> String {
    NumberFormat::ARGENTINE.format_live_input(current)
}

pub fn reformat_live_input(current: &str, cursor: usize) -> LiveInput {
    NumberFormat::ARGENTINE.reformat_live_input(current, cursor)
}

/// Plain machine-readable number for data attributes (`1234567.5`)
pub fn raw_number<'a>(text: impl Into<Option<&'a str>>) -> String {
    parse_amount(text).normalize().to_string()
}
