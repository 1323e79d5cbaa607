//! XLM price conversion

use crate::ClientError;

/// Smallest price unit used on the wire
pub const MICRO_PER_XLM: i64 = 1_000_000;

/// Parse a decimal XLM amount into micro-XLM, rounding down
pub fn parse_xlm(input: &str) -> Result<i64, ClientError> {
    let trimmed = input.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ClientError::InvalidInput(format!("{trimmed:?} is not a price")))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(ClientError::InvalidInput(
            "price must be greater than zero".to_string(),
        ));
    }

    let micro = (value * MICRO_PER_XLM as f64).floor();
    if micro < 1.0 {
        return Err(ClientError::InvalidInput(format!(
            "price {trimmed} is below the smallest unit"
        )));
    }
    if micro >= i64::MAX as f64 {
        return Err(ClientError::InvalidInput(format!("price {trimmed} is too large")));
    }

    Ok(micro as i64)
}

/// Render micro-XLM for display, e.g. `12.50 XLM`
pub fn format_xlm(micro: i64) -> String {
    format!("{:.2} XLM", micro as f64 / MICRO_PER_XLM as f64)
}
