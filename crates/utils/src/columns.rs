//! Typed column extraction.

use polars::prelude::*;
use tercile_primitives::Date;

use crate::{UtilsError, date_from_epoch_days, date_from_yyyymmdd, parse_date};

/// Whether `df` has a column called `name`.
#[must_use]
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, UtilsError> {
    if !has_column(df, name) {
        return Err(UtilsError::MissingColumn(name.to_string()));
    }
    Ok(df.column(name)?)
}

/// Extract a column as owned strings.
///
/// Non-string columns are cast to text first. Empty or whitespace-only cells become
/// `None`; other cells are trimmed.
///
/// # Errors
/// Returns `UtilsError::MissingColumn` if the column is absent, or a polars error if
/// the cast fails.
pub fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, UtilsError> {
    let col = column(df, name)?;
    let col = if col.dtype() == &DataType::String {
        col.clone()
    } else {
        col.cast(&DataType::String)?
    };
    Ok(col
        .str()?
        .into_iter()
        .map(|v| v.map(str::trim).filter(|s| !s.is_empty()).map(ToString::to_string))
        .collect())
}

/// Extract a column as finite floats.
///
/// Text columns are parsed cell by cell (thousands separators are ignored); other
/// columns are cast to `Float64`. Unparseable, missing and non-finite cells become
/// `None`.
///
/// # Errors
/// Returns `UtilsError::MissingColumn` if the column is absent, or a polars error if
/// the cast fails.
pub fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, UtilsError> {
    let col = column(df, name)?;
    if col.dtype() == &DataType::String {
        return Ok(col
            .str()?
            .into_iter()
            .map(|v| v.and_then(|s| s.trim().replace(',', "").parse::<f64>().ok()))
            .map(|v| v.filter(|x| x.is_finite()))
            .collect());
    }
    let cast = col.cast(&DataType::Float64)?;
    Ok(cast.f64()?.into_iter().map(|v| v.filter(|x| x.is_finite())).collect())
}

/// Extract a column as dates.
///
/// Accepts polars `Date` and `Datetime` columns, integer `YYYYMMDD` columns and text
/// columns in any encoding understood by [`parse_date`]. Cells that cannot be read
/// become `None`.
///
/// # Errors
/// Returns `UtilsError::MissingColumn` if the column is absent and
/// `UtilsError::UnsupportedType` for any other dtype.
pub fn date_column(df: &DataFrame, name: &str) -> Result<Vec<Option<Date>>, UtilsError> {
    let col = column(df, name)?;
    match col.dtype() {
        DataType::String => Ok(col.str()?.into_iter().map(|v| v.and_then(parse_date)).collect()),
        DataType::Date => epoch_days(col),
        DataType::Datetime(_, _) => epoch_days(&col.cast(&DataType::Date)?),
        dtype if dtype.is_integer() => {
            let ints = col.cast(&DataType::Int64)?;
            Ok(ints.i64()?.into_iter().map(|v| v.and_then(date_from_yyyymmdd)).collect())
        }
        dtype => Err(UtilsError::UnsupportedType {
            column: name.to_string(),
            dtype: dtype.to_string(),
        }),
    }
}

fn epoch_days(col: &Column) -> Result<Vec<Option<Date>>, UtilsError> {
    let days = col.cast(&DataType::Int32)?;
    Ok(days.i32()?.into_iter().map(|v| v.and_then(date_from_epoch_days)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn strings_are_trimmed() {
        let df = df! { "id" => &[Some(" AAPL "), Some(""), None] }.unwrap();
        let ids = string_column(&df, "id").unwrap();
        assert_eq!(ids, vec![Some("AAPL".to_string()), None, None]);
    }

    #[test]
    fn numeric_ids_are_cast() {
        let df = df! { "id" => &[1001_i64, 1002] }.unwrap();
        let ids = string_column(&df, "id").unwrap();
        assert_eq!(ids, vec![Some("1001".to_string()), Some("1002".to_string())]);
    }

    #[test]
    fn floats_from_text() {
        let df = df! { "x" => &["1.5", "abc", "1,000", "inf", ""] }.unwrap();
        let xs = float_column(&df, "x").unwrap();
        assert_eq!(xs, vec![Some(1.5), None, Some(1000.0), None, None]);
    }

    #[test]
    fn floats_from_numbers() {
        let df = df! { "x" => &[Some(1_i32), None, Some(3)] }.unwrap();
        assert_eq!(float_column(&df, "x").unwrap(), vec![Some(1.0), None, Some(3.0)]);

        let df = df! { "x" => &[f64::NAN, f64::INFINITY, 2.0] }.unwrap();
        assert_eq!(float_column(&df, "x").unwrap(), vec![None, None, Some(2.0)]);
    }

    #[test]
    fn dates_from_text_and_integers() {
        let df = df! { "d" => &["2014-06-30", "bad"] }.unwrap();
        assert_eq!(date_column(&df, "d").unwrap(), vec![Some(d(2014, 6, 30)), None]);

        let df = df! { "d" => &[20_140_630_i64, 20_141_301] }.unwrap();
        assert_eq!(date_column(&df, "d").unwrap(), vec![Some(d(2014, 6, 30)), None]);
    }

    #[test]
    fn dates_from_date_dtype() {
        let df = df! { "d" => &[d(2014, 6, 30), d(1970, 1, 1)] }.unwrap();
        let dates = date_column(&df, "d").unwrap();
        assert_eq!(dates, vec![Some(d(2014, 6, 30)), Some(d(1970, 1, 1))]);
    }

    #[test]
    fn missing_column() {
        let df = df! { "a" => &[1.0] }.unwrap();
        assert!(matches!(float_column(&df, "b"), Err(UtilsError::MissingColumn(c)) if c == "b"));
    }

    #[test]
    fn unsupported_dtype() {
        let df = df! { "d" => &[true, false] }.unwrap();
        assert!(matches!(date_column(&df, "d"), Err(UtilsError::UnsupportedType { .. })));
    }
}
