//! Cell-level numeric coercion.
//!
//! Input cells are strings. Blank, unparsable and NaN cells become
//! `None`; nothing in here ever fails.

/// Parse a cell as a finite-or-infinite float, treating blank/NaN as missing.
pub fn parse_float(cell: Option<&str>) -> Option<f64> {
    let s = cell?.trim();
    if s.is_empty() {
        return None;
    }
    match s.parse::<f64>() {
        Ok(v) if !v.is_nan() => Some(v),
        _ => None,
    }
}

/// Parse a cell as an integer year, rounding half to even (`2014.5` -> 2014).
///
/// Values outside the `i32` range are treated as missing, so year
/// differences downstream always fit comfortably in an `i64`.
pub fn parse_year(cell: Option<&str>) -> Option<i64> {
    let v = parse_float(cell)?.round_ties_even();
    if !v.is_finite() || v < i32::MIN as f64 || v > i32::MAX as f64 {
        return None;
    }
    Some(v as i64)
}
