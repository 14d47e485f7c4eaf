// src/common/validation.rs

use rust_decimal::Decimal;
use validator::ValidationError;

fn error_with(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

// `length(min = 1)` aceita "   ", então conferimos o texto sem espaços.
pub fn validate_not_blank(val: &str) -> Result<(), ValidationError> {
    if val.trim().is_empty() {
        return Err(error_with("required", "This field is required."));
    }
    Ok(())
}

// Limites da coluna NUMERIC(14, 3): 3 casas decimais e 11 dígitos inteiros.
pub const QUANTITY_SCALE: u32 = 3;
const QUANTITY_INTEGER_LIMIT: i64 = 100_000_000_000;

// Fora disso o Postgres arredonda (0.0001 vira 0) ou estoura.
pub fn validate_quantity_fits(val: &Decimal) -> Result<(), ValidationError> {
    if val.normalize().scale() > QUANTITY_SCALE {
        let mut err = error_with("scale", "At most 3 decimal places are allowed.");
        err.add_param("maxScale".into(), &QUANTITY_SCALE);
        return Err(err);
    }
    if val.trunc().abs() >= Decimal::from(QUANTITY_INTEGER_LIMIT) {
        let mut err = error_with("range", "The value is too large.");
        err.add_param("exclusiveMax".into(), &QUANTITY_INTEGER_LIMIT);
        return Err(err);
    }
    Ok(())
}

pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = error_with("range", "The value cannot be negative.");
        err.add_param("min".into(), &0.0);
        return Err(err);
    }
    validate_quantity_fits(val)
}

pub fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = error_with("range", "The value must be greater than zero.");
        err.add_param("exclusiveMin".into(), &0.0);
        return Err(err);
    }
    validate_quantity_fits(val)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn blank_strings_are_rejected() {
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("Gudang A").is_ok());
    }

    #[test]
    fn quantities_are_checked_against_zero() {
        assert!(validate_not_negative(&Decimal::ZERO).is_ok());
        assert!(validate_not_negative(&Decimal::new(-1, 0)).is_err());
        assert!(validate_positive(&Decimal::ZERO).is_err());
        assert!(validate_positive(&Decimal::new(25, 1)).is_ok());
    }

    #[test]
    fn quantities_must_fit_three_decimals_and_eleven_digits() {
        // 0.0001 seria arredondado para zero pelo banco
        assert!(validate_positive(&Decimal::new(1, 4)).is_err());
        assert!(validate_positive(&Decimal::new(1, 3)).is_ok());
        // Zeros à direita não contam como casas decimais
        assert!(validate_positive(&Decimal::new(15000, 4)).is_ok());

        assert!(validate_not_negative(&Decimal::new(1_000_000_000_000, 0)).is_err());
        assert!(validate_not_negative(&Decimal::new(99_999_999_999_999, 3)).is_ok());
        assert!(validate_not_negative(&Decimal::new(100_000_000_000, 0)).is_err());
    }
}
