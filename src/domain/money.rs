use std::fmt;

/// Monetary amounts are plain floating-point values. No currency, no rounding.
pub type Amount = f64;

/// Format an amount the way it is shown on the console.
/// Example: 25.0 -> "25", 12.5 -> "12.5", -3.0 -> "-3"
pub fn format_amount(amount: Amount) -> String {
    // Normalize negative zero so an empty total never renders as "-0".
    if amount == 0.0 {
        return "0".to_string();
    }
    amount.to_string()
}

/// Parse a decimal string into an amount.
/// Accepts anything `f64` parses except NaN and the infinities, which would
/// not survive a trip through the JSON store.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let amount: Amount = input
        .trim()
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat)?;

    if !amount.is_finite() {
        return Err(ParseAmountError::NotFinite);
    }

    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
    NotFinite,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid amount format"),
            ParseAmountError::NotFinite => write!(f, "amount must be a finite number"),
        }
    }
}

impl std::error::Error for ParseAmountError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(25.0), "25");
        assert_eq!(format_amount(12.5), "12.5");
        assert_eq!(format_amount(-3.0), "-3");
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(-0.0), "0");
        assert_eq!(format_amount(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("20"), Ok(20.0));
        assert_eq!(parse_amount("12.34"), Ok(12.34));
        assert_eq!(parse_amount(" 7.5 "), Ok(7.5));
        assert_eq!(parse_amount("-10"), Ok(-10.0));
        assert_eq!(parse_amount("0"), Ok(0.0));
        assert_eq!(parse_amount(".5"), Ok(0.5));
    }

    #[test]
    fn test_parse_amount_invalid() {
        assert_eq!(parse_amount("abc"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("12.34.56"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount(""), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("NaN"), Err(ParseAmountError::NotFinite));
        assert_eq!(parse_amount("inf"), Err(ParseAmountError::NotFinite));
    }
}
