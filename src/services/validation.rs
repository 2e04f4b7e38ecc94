//! Field validation for book input

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::book::{BookData, BookField, BookInput, FieldError, FieldErrorKind};

/// Fractional digits kept for prices
const PRICE_SCALE: u32 = 2;
/// Integer digits allowed for prices, matching a NUMERIC(10,2) column
const PRICE_MAX_INTEGER_DIGITS: u32 = 8;

/// Validates raw book input and produces normalized data for storage
#[derive(Debug, Clone)]
pub struct FieldValidator {
    max_name_length: usize,
}

impl FieldValidator {
    pub fn new(max_name_length: usize) -> Self {
        Self { max_name_length }
    }

    /// Check every field; errors come back ordered name, edition, price
    pub fn validate(&self, input: &BookInput) -> Result<BookData, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.validate_name(&input.name).map_err(|e| errors.push(e)).ok();
        let edition = validate_edition(&input.edition).map_err(|e| errors.push(e)).ok();
        let price = validate_price(&input.price).map_err(|e| errors.push(e)).ok();

        match (name, edition, price) {
            (Some(name), Some(edition), Some(price)) => Ok(BookData { name, edition, price }),
            _ => Err(errors),
        }
    }

    fn validate_name(&self, raw: &str) -> Result<String, FieldError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(FieldError::new(
                BookField::Name,
                FieldErrorKind::EmptyField,
                "Book name cannot be empty.",
            ));
        }
        if name.chars().count() > self.max_name_length {
            return Err(FieldError::new(
                BookField::Name,
                FieldErrorKind::TooLong,
                format!(
                    "Book name cannot be longer than {} characters.",
                    self.max_name_length
                ),
            ));
        }
        Ok(name.to_string())
    }
}

/// Sign, integer digits and fractional digits of a plain decimal literal
struct NumberParts<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
}

/// Split `[+-]digits[.digits]`; anything else (exponents, separators) is not a number here
fn split_number(text: &str) -> Option<NumberParts<'_>> {
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if integer.len() + fraction.len() == 0 || !is_digits(integer) || !is_digits(fraction) {
        return None;
    }
    Some(NumberParts {
        negative,
        integer,
        fraction,
    })
}

fn validate_edition(raw: &str) -> Result<i32, FieldError> {
    let out_of_range = || {
        FieldError::new(
            BookField::Edition,
            FieldErrorKind::OutOfRange,
            "Edition must be a positive number.",
        )
    };

    let text = raw.trim();
    match split_number(text) {
        Some(parts) if !parts.integer.is_empty() && !text.contains('.') => {}
        _ => {
            return Err(FieldError::new(
                BookField::Edition,
                FieldErrorKind::InvalidNumber,
                "Edition must be a whole number.",
            ))
        }
    }

    // A well-formed integer that does not fit i32 is out of range either way
    text.parse::<i32>()
        .ok()
        .filter(|edition| *edition >= 1)
        .ok_or_else(out_of_range)
}

fn validate_price(raw: &str) -> Result<Decimal, FieldError> {
    let invalid = || {
        FieldError::new(
            BookField::Price,
            FieldErrorKind::InvalidNumber,
            "Price must be a number with at most 2 decimal places.",
        )
    };
    let not_positive = || {
        FieldError::new(
            BookField::Price,
            FieldErrorKind::OutOfRange,
            "Price must be greater than zero.",
        )
    };

    let parts = split_number(raw.trim()).ok_or_else(invalid)?;

    // Decimal rounds past 28 fractional digits and overflows past 28 digits, so classify the text
    let fraction = parts.fraction.trim_end_matches('0');
    if fraction.len() > PRICE_SCALE as usize {
        return Err(invalid());
    }
    let integer = parts.integer.trim_start_matches('0');
    let is_zero = integer.is_empty() && fraction.is_empty();
    if parts.negative && !is_zero {
        return Err(not_positive());
    }
    if integer.len() > PRICE_MAX_INTEGER_DIGITS as usize {
        return Err(FieldError::new(
            BookField::Price,
            FieldErrorKind::OutOfRange,
            format!(
                "Price cannot have more than {} digits before the decimal point.",
                PRICE_MAX_INTEGER_DIGITS
            ),
        ));
    }
    if is_zero {
        return Err(not_positive());
    }

    let integer = if integer.is_empty() { "0" } else { integer };
    let literal = if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{}.{}", integer, fraction)
    };
    let mut price = Decimal::from_str(&literal).map_err(|_| invalid())?;
    price.rescale(PRICE_SCALE);
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> FieldValidator {
        FieldValidator::new(200)
    }

    fn kinds(input: BookInput) -> Vec<(BookField, FieldErrorKind)> {
        validator()
            .validate(&input)
            .unwrap_err()
            .into_iter()
            .map(|e| (e.field, e.kind))
            .collect()
    }

    #[test]
    fn test_valid_input_is_normalized() {
        let data = validator()
            .validate(&BookInput::new("  Dune  ", " 2 ", "12.5"))
            .unwrap();
        assert_eq!(data.name, "Dune");
        assert_eq!(data.edition, 2);
        assert_eq!(data.price.to_string(), "12.50");
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(
            kinds(BookInput::new("", "1", "10.00")),
            vec![(BookField::Name, FieldErrorKind::EmptyField)]
        );
        assert_eq!(
            kinds(BookInput::new("   \t", "1", "10.00")),
            vec![(BookField::Name, FieldErrorKind::EmptyField)]
        );
    }

    #[test]
    fn test_name_too_long() {
        let validator = FieldValidator::new(5);
        let errors = validator
            .validate(&BookInput::new("Foundation", "1", "10.00"))
            .unwrap_err();
        assert_eq!(errors[0].kind, FieldErrorKind::TooLong);

        // Length is counted after trimming, in characters
        assert!(validator.validate(&BookInput::new("  Écrit  ", "1", "10.00")).is_ok());
    }

    #[test]
    fn test_edition_rules() {
        assert_eq!(
            kinds(BookInput::new("X", "0", "10.00")),
            vec![(BookField::Edition, FieldErrorKind::OutOfRange)]
        );
        assert_eq!(
            kinds(BookInput::new("X", "-3", "10.00")),
            vec![(BookField::Edition, FieldErrorKind::OutOfRange)]
        );
        assert_eq!(
            kinds(BookInput::new("X", "99999999999", "10.00")),
            vec![(BookField::Edition, FieldErrorKind::OutOfRange)]
        );
        assert_eq!(
            kinds(BookInput::new("X", "first", "10.00")),
            vec![(BookField::Edition, FieldErrorKind::InvalidNumber)]
        );
        assert_eq!(
            kinds(BookInput::new("X", "1.5", "10.00")),
            vec![(BookField::Edition, FieldErrorKind::InvalidNumber)]
        );
        assert_eq!(
            kinds(BookInput::new("X", "", "10.00")),
            vec![(BookField::Edition, FieldErrorKind::InvalidNumber)]
        );
        assert_eq!(
            kinds(BookInput::new("X", "-99999999999999999999", "10.00")),
            vec![(BookField::Edition, FieldErrorKind::OutOfRange)]
        );
        assert_eq!(
            kinds(BookInput::new("X", "99999999999999999999", "10.00")),
            vec![(BookField::Edition, FieldErrorKind::OutOfRange)]
        );
        assert_eq!(
            kinds(BookInput::new("X", "+", "10.00")),
            vec![(BookField::Edition, FieldErrorKind::InvalidNumber)]
        );
        let data = validator()
            .validate(&BookInput::new("X", "+007", "1"))
            .unwrap();
        assert_eq!(data.edition, 7);
    }

    #[test]
    fn test_price_rules() {
        assert_eq!(
            kinds(BookInput::new("X", "1", "-5")),
            vec![(BookField::Price, FieldErrorKind::OutOfRange)]
        );
        assert_eq!(
            kinds(BookInput::new("X", "1", "0.00")),
            vec![(BookField::Price, FieldErrorKind::OutOfRange)]
        );
        assert_eq!(
            kinds(BookInput::new("X", "1", "100000000")),
            vec![(BookField::Price, FieldErrorKind::OutOfRange)]
        );
        assert_eq!(
            kinds(BookInput::new("X", "1", "12.345")),
            vec![(BookField::Price, FieldErrorKind::InvalidNumber)]
        );
        assert_eq!(
            kinds(BookInput::new("X", "1", "twelve")),
            vec![(BookField::Price, FieldErrorKind::InvalidNumber)]
        );
        assert_eq!(
            kinds(BookInput::new("X", "1", "1e3")),
            vec![(BookField::Price, FieldErrorKind::InvalidNumber)]
        );
        assert_eq!(
            kinds(BookInput::new("X", "1", "0.000000000000000000000000000001")),
            vec![(BookField::Price, FieldErrorKind::InvalidNumber)]
        );
        assert_eq!(
            kinds(BookInput::new("X", "1", "1000000000000000000000000000000")),
            vec![(BookField::Price, FieldErrorKind::OutOfRange)]
        );
        assert_eq!(
            kinds(BookInput::new("X", "1", "-0.001")),
            vec![(BookField::Price, FieldErrorKind::InvalidNumber)]
        );
        assert_eq!(
            kinds(BookInput::new("X", "1", ".")),
            vec![(BookField::Price, FieldErrorKind::InvalidNumber)]
        );
    }

    #[test]
    fn test_price_literal_forms() {
        let price = |raw: &str| {
            validator()
                .validate(&BookInput::new("X", "1", raw))
                .unwrap()
                .price
        };
        assert_eq!(price("00012.5").to_string(), "12.50");
        assert_eq!(price(".5").to_string(), "0.50");
        assert_eq!(price("7.").to_string(), "7.00");
        assert_eq!(price("99999999.99").to_string(), "99999999.99");
    }

    #[test]
    fn test_trailing_zeros_are_not_extra_precision() {
        let data = validator()
            .validate(&BookInput::new("X", "1", "12.500"))
            .unwrap();
        assert_eq!(data.price.to_string(), "12.50");
    }

    #[test]
    fn test_all_failing_fields_reported_in_order() {
        assert_eq!(
            kinds(BookInput::new("", "zero", "-1")),
            vec![
                (BookField::Name, FieldErrorKind::EmptyField),
                (BookField::Edition, FieldErrorKind::InvalidNumber),
                (BookField::Price, FieldErrorKind::OutOfRange),
            ]
        );
    }
}
