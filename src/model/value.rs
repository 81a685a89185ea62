//! Cell values

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime};

use super::schema::CellType;

/// One cell of a table. `Null` is the missing-value marker and is distinct
/// from an empty string.
#[derive(Debug, Clone)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Null => CellType::Null,
            CellValue::Bool(_) => CellType::Bool,
            CellValue::Int(_) => CellType::Int,
            CellValue::Float(_) => CellType::Float,
            CellValue::String(_) => CellType::String,
            CellValue::Date(_) => CellType::Date,
            CellValue::DateTime(_) => CellType::DateTime,
        }
    }

    /// Text shown in previews; missing values read `NULL`
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed("NULL"),
            other => other.to_field(),
        }
    }

    /// Text written to a CSV field; missing values are an empty field
    pub fn to_field(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            CellValue::String(s) => Cow::Borrowed(s.as_str()),
            CellValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(format_float(*f)),
            CellValue::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
            CellValue::DateTime(dt) => Cow::Owned(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

/// Integral floats keep a trailing `.0` so they stay distinguishable from ints
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

/// The `i64` a float stands for, when it is integral and in range
fn float_as_int(f: f64) -> Option<i64> {
    // 2^63 is the first float past i64::MAX
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then_some(f as i64)
}

/// Ints compare exactly, an int equals a float only when the float is that
/// exact integer, NaN equals NaN, and `Null` equals `Null` so that duplicate
/// rows with missing cells are still duplicates.
impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (CellValue::Int(i), CellValue::Float(f)) | (CellValue::Float(f), CellValue::Int(i)) => {
                float_as_int(*f) == Some(*i)
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

/// Integral floats hash as the int they equal. Every NaN hashes alike and
/// `-0.0` hashes as `0`.
impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            CellValue::Null => state.write_u8(0),
            CellValue::Bool(b) => {
                state.write_u8(1);
                b.hash(state);
            }
            CellValue::Int(i) => {
                state.write_u8(2);
                state.write_i64(*i);
            }
            CellValue::Float(f) => match float_as_int(*f) {
                Some(i) => {
                    state.write_u8(2);
                    state.write_i64(i);
                }
                None => {
                    state.write_u8(6);
                    let bits = if f.is_nan() { f64::NAN.to_bits() } else { f.to_bits() };
                    state.write_u64(bits);
                }
            },
            CellValue::String(s) => {
                state.write_u8(3);
                s.hash(state);
            }
            CellValue::Date(d) => {
                state.write_u8(4);
                d.hash(state);
            }
            CellValue::DateTime(dt) => {
                state.write_u8(5);
                dt.hash(state);
            }
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_int_float_equality_hashes_consistently() {
        let mut set = FxHashSet::default();
        set.insert(CellValue::Int(3));
        assert!(set.contains(&CellValue::Float(3.0)));
        assert!(!set.contains(&CellValue::from("3")));

        assert_eq!(CellValue::Float(f64::NAN), CellValue::Float(f64::NAN));
        set.insert(CellValue::Float(0.0));
        assert!(set.contains(&CellValue::Float(-0.0)));
        assert!(set.contains(&CellValue::Int(0)));
    }

    #[test]
    fn test_large_ints_compare_exactly() {
        let a = CellValue::Int(9_007_199_254_740_992);
        let b = CellValue::Int(9_007_199_254_740_993);
        assert_ne!(a, b);

        let mut set = FxHashSet::default();
        set.insert(a.clone());
        assert!(!set.contains(&b));

        // 2^53 + 1 has no exact float, so the nearest float is not equal to it
        assert_eq!(a, CellValue::Float(9_007_199_254_740_992.0));
        assert_ne!(b, CellValue::Float(9_007_199_254_740_992.0));
        assert_ne!(CellValue::Int(2), CellValue::Float(2.5));
        assert_ne!(CellValue::Int(i64::MAX), CellValue::Float(9_223_372_036_854_775_808.0));
    }

    #[test]
    fn test_null_equals_null_only() {
        assert_eq!(CellValue::Null, CellValue::Null);
        assert_ne!(CellValue::Null, CellValue::from(""));
        assert_ne!(CellValue::Bool(true), CellValue::Int(1));
    }

    #[test]
    fn test_display_and_field() {
        assert_eq!(CellValue::Float(2.0).display(), "2.0");
        assert_eq!(CellValue::Float(2.5).display(), "2.5");
        assert_eq!(CellValue::Bool(true).to_field(), "true");
        assert_eq!(CellValue::Null.display(), "NULL");
        assert_eq!(CellValue::Null.to_field(), "");

        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(CellValue::Date(date).to_field(), "2024-01-05");
        let dt = date.and_hms_opt(7, 5, 0).unwrap();
        assert_eq!(CellValue::DateTime(dt).to_string(), "2024-01-05 07:05:00");
    }
}
