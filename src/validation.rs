//! Field-level checks run while a record is built, before the store writes
//! anything. Every function here is pure.

use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+\d{9,15}|\d{3}-\d{3}-\d{4})$").expect("phone pattern compiles")
});

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name must not be empty.")]
    EmptyName,

    #[error("Invalid email format: {0}.")]
    InvalidEmail(String),

    #[error("Invalid phone number format.")]
    InvalidPhoneFormat(String),

    #[error("Price must be positive.")]
    InvalidPrice(Decimal),

    #[error("Stock cannot be negative.")]
    InvalidStock(i64),

    #[error("Stock cannot exceed {max}.", max = u32::MAX)]
    StockTooLarge(i64),
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "EmptyName",
            ValidationError::InvalidEmail(_) => "InvalidEmail",
            ValidationError::InvalidPhoneFormat(_) => "InvalidPhoneFormat",
            ValidationError::InvalidPrice(_) => "InvalidPrice",
            ValidationError::InvalidStock(_) | ValidationError::StockTooLarge(_) => "InvalidStock",
        }
    }
}

/// Returns the trimmed name, or `EmptyName`.
pub fn check_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}

pub fn check_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if !EMAIL.is_match(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(email.to_string())
}

/// An absent or blank phone is valid and normalizes to `None`.
pub fn check_phone(phone: Option<&str>) -> Result<Option<String>, ValidationError> {
    match phone.map(str::trim) {
        None | Some("") => Ok(None),
        Some(phone) if PHONE.is_match(phone) => Ok(Some(phone.to_string())),
        Some(phone) => Err(ValidationError::InvalidPhoneFormat(phone.to_string())),
    }
}

pub fn check_price(price: Decimal) -> Result<Decimal, ValidationError> {
    if price <= Decimal::ZERO {
        return Err(ValidationError::InvalidPrice(price));
    }
    Ok(price)
}

/// Converts a requested stock level to the stored unsigned form.
pub fn check_stock(stock: i64) -> Result<u32, ValidationError> {
    if stock < 0 {
        return Err(ValidationError::InvalidStock(stock));
    }
    u32::try_from(stock).map_err(|_| ValidationError::StockTooLarge(stock))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn phone_formats() {
        assert_eq!(check_phone(Some("123-456-7890")).unwrap().as_deref(), Some("123-456-7890"));
        assert_eq!(check_phone(Some("+1234567890")).unwrap().as_deref(), Some("+1234567890"));
        assert_eq!(check_phone(None).unwrap(), None);
        assert_eq!(check_phone(Some("  ")).unwrap(), None);

        for bad in ["12345", "+12345678", "+1234567890123456", "1234567890", "123-4567-890"] {
            assert_eq!(
                check_phone(Some(bad)),
                Err(ValidationError::InvalidPhoneFormat(bad.to_string())),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn price_must_be_positive() {
        assert!(check_price(dec("19.99")).is_ok());
        assert_eq!(check_price(dec("0")), Err(ValidationError::InvalidPrice(dec("0"))));
        assert_eq!(check_price(dec("-1.0")), Err(ValidationError::InvalidPrice(dec("-1.0"))));
    }

    #[test]
    fn stock_bounds() {
        assert_eq!(check_stock(0), Ok(0));
        assert_eq!(check_stock(42), Ok(42));
        assert_eq!(check_stock(-1), Err(ValidationError::InvalidStock(-1)));
        assert_eq!(check_stock(i64::from(u32::MAX)), Ok(u32::MAX));

        let too_large = i64::from(u32::MAX) + 1;
        let err = check_stock(too_large).unwrap_err();
        assert_eq!(err, ValidationError::StockTooLarge(too_large));
        assert_eq!(err.code(), "InvalidStock");
        assert_eq!(err.to_string(), "Stock cannot exceed 4294967295.");
    }

    #[test]
    fn names_and_emails() {
        assert_eq!(check_name("  Alice "), Ok("Alice".to_string()));
        assert_eq!(check_name("   "), Err(ValidationError::EmptyName));
        assert!(check_email("alice@example.com").is_ok());
        assert!(check_email("alice@example").is_err());
        assert!(check_email("not an@email.com").is_err());
    }
}
