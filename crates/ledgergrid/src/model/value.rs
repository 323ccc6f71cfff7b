//! Cell values and rendered cell content.
//!
//! `CellValue` is the raw value a row stores under a field name. Columns map
//! it to `CellContent` for display: directly, through a lookup table, or via
//! a custom renderer.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

/// A raw value read from a row field.
///
/// # Example
///
/// ```
/// use ledgergrid::model::CellValue;
///
/// let amount = CellValue::from(1_000_000i64);
/// assert_eq!(amount.as_int(), Some(1_000_000));
/// assert_eq!(amount.display_text(), "1000000");
///
/// let missing = CellValue::None;
/// assert_eq!(missing.display_text(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No value (null or missing field).
    #[default]
    None,
    /// Text.
    String(String),
    /// Integer amounts, counts and codes.
    Int(i64),
    /// Rates, percentages and fractional amounts.
    Float(f64),
    /// Flags.
    Bool(bool),
    /// Calendar dates (origination, maturity, settlement).
    Date(NaiveDate),
}

impl CellValue {
    /// Returns `true` if this is `CellValue::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, CellValue::None)
    }

    /// Returns `true` if this contains some value.
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Attempts to get the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to get the value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the value as a float. Integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(n) => Some(*n),
            CellValue::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Attempts to get the value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to get the value as a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Plain text form used for display, filtering and export.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::None => String::new(),
            CellValue::String(s) => s.clone(),
            CellValue::Int(n) => n.to_string(),
            CellValue::Float(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// Field-default ordering used for column sorting.
    ///
    /// `None` sorts first. Integers and floats compare numerically with each
    /// other; values of unrelated kinds are ordered by kind so the ordering
    /// stays total.
    pub fn cmp_default(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::None, CellValue::None) => Ordering::Equal,
            (CellValue::String(a), CellValue::String(b)) => a.cmp(b),
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::Float(a), CellValue::Float(b)) => cmp_floats(*a, *b),
            (CellValue::Int(a), CellValue::Float(b)) => cmp_int_float(*a, *b),
            (CellValue::Float(a), CellValue::Int(b)) => cmp_int_float(*b, *a).reverse(),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::None => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) => 2,
            CellValue::Date(_) => 3,
            CellValue::String(_) => 4,
        }
    }
}

/// Numeric ordering of two floats: `-0.0` equals `0.0`, negative NaN sorts
/// before every number and positive NaN after.
fn cmp_floats(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ordering) => ordering,
        None => a.total_cmp(&b),
    }
}

/// Exact ordering of an integer against a float, without rounding the
/// integer to the nearest representable float.
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    // 2^63 is exact in f64; every finite float below it truncates to an i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f >= LIMIT {
        return Ordering::Less;
    }
    if f < -LIMIT {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(f - whole)).unwrap_or(Ordering::Equal),
        ordering => ordering,
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&String> for CellValue {
    fn from(s: &String) -> Self {
        CellValue::String(s.clone())
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Int(n as i64)
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Int(n as i64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// What a column renders for one row.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellContent {
    /// Nothing is rendered (hidden columns, missing sources).
    #[default]
    Empty,
    /// Preformatted text (lookup labels, custom renderers).
    Text(String),
    /// A raw value, formatted by the consumer.
    Value(CellValue),
}

impl CellContent {
    /// Creates text content.
    pub fn text(text: impl Into<String>) -> Self {
        CellContent::Text(text.into())
    }

    /// Returns `true` if nothing is rendered.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellContent::Empty)
    }

    /// Plain text form of the content.
    pub fn to_text(&self) -> String {
        match self {
            CellContent::Empty => String::new(),
            CellContent::Text(s) => s.clone(),
            CellContent::Value(v) => v.display_text(),
        }
    }

    /// The raw value, when the content carries one.
    pub fn value(&self) -> Option<&CellValue> {
        match self {
            CellContent::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl From<CellValue> for CellContent {
    fn from(value: CellValue) -> Self {
        CellContent::Value(value)
    }
}

/// Horizontal alignment of a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    /// Align to the left edge.
    #[default]
    Left,
    /// Align to the center.
    Center,
    /// Align to the right edge.
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text() {
        assert_eq!(CellValue::from("Net 30").display_text(), "Net 30");
        assert_eq!(CellValue::from(0.1).display_text(), "0.1");
        assert_eq!(CellValue::from(true).display_text(), "true");
        let date = NaiveDate::from_ymd_opt(2021, 3, 15).unwrap();
        assert_eq!(CellValue::from(date).display_text(), "2021-03-15");
        assert_eq!(CellValue::from(None::<i64>).display_text(), "");
    }

    #[test]
    fn test_cmp_default_numeric_mix() {
        let a = CellValue::Int(2);
        let b = CellValue::Float(2.5);
        assert_eq!(a.cmp_default(&b), Ordering::Less);
        assert_eq!(b.cmp_default(&a), Ordering::Greater);
    }

    #[test]
    fn test_cmp_default_large_ints_against_floats() {
        let big = 1_i64 << 53;
        let above = CellValue::Int(big + 1);
        let exact = CellValue::Int(big);
        let float = CellValue::Float(big as f64);

        assert_eq!(exact.cmp_default(&float), Ordering::Equal);
        assert_eq!(above.cmp_default(&float), Ordering::Greater);
        assert_eq!(float.cmp_default(&above), Ordering::Less);
        assert_eq!(
            CellValue::Int(i64::MAX).cmp_default(&CellValue::Float(i64::MAX as f64)),
            Ordering::Less
        );
    }

    #[test]
    fn test_cmp_default_float_edges() {
        let nan = CellValue::Float(f64::NAN);
        let neg_nan = CellValue::Float(-f64::NAN);
        let inf = CellValue::Float(f64::INFINITY);
        let int = CellValue::Int(i64::MIN);

        assert_eq!(int.cmp_default(&nan), Ordering::Less);
        assert_eq!(int.cmp_default(&neg_nan), Ordering::Greater);
        assert_eq!(int.cmp_default(&inf), Ordering::Less);
        assert_eq!(inf.cmp_default(&nan), Ordering::Less);
        assert_eq!(
            CellValue::Float(-0.0).cmp_default(&CellValue::Float(0.0)),
            Ordering::Equal
        );
        assert_eq!(
            CellValue::Int(3).cmp_default(&CellValue::Float(-2.5)),
            Ordering::Greater
        );
        assert_eq!(
            CellValue::Int(-3).cmp_default(&CellValue::Float(-2.5)),
            Ordering::Less
        );
    }

    #[test]
    fn test_cmp_default_none_first() {
        assert_eq!(
            CellValue::None.cmp_default(&CellValue::from("a")),
            Ordering::Less
        );
        assert_eq!(
            CellValue::from(0).cmp_default(&CellValue::None),
            Ordering::Greater
        );
    }

    #[test]
    fn test_cmp_default_dates() {
        let early = CellValue::from(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        let late = CellValue::from(NaiveDate::from_ymd_opt(2020, 6, 1).unwrap());
        assert_eq!(early.cmp_default(&late), Ordering::Less);
    }

    #[test]
    fn test_cell_content_text() {
        assert_eq!(CellContent::Empty.to_text(), "");
        assert_eq!(CellContent::text("Active").to_text(), "Active");
        assert_eq!(CellContent::from(CellValue::Int(7)).to_text(), "7");
        assert!(CellContent::Empty.is_empty());
    }
}
