//! Conversión y cuantización decimal.
//!
//! Política numérica del framework:
//! - `f64` nunca entra a una cadena aritmética decimal; se convierte en el
//!   borde con round-trip exacto por string (`from_f64`).
//! - El modo de redondeo queda fijado a half-to-even (banker's), que es el
//!   default de la librería decimal del sistema de referencia.
//! - La cuantización re-escala al número exacto de dígitos declarado, de modo
//!   que `6` con `digits=2` rinde `6.00` (el exponente queda fijado).

use std::str::FromStr;
use std::time::Instant;

use rust_decimal::{Decimal, RoundingStrategy};

/// Literal decimal de programa. Malformarlo es error de programación.
pub fn lit(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap_or_else(|e| panic!("bad decimal literal '{s}': {e}"))
}

/// Parse tolerante a notación científica (los literales JSON con exponente
/// llegan por aquí). Fuera de rango: underflow hacia cero, overflow hacia
/// los extremos.
pub fn parse_number(s: &str) -> Decimal {
    Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s)).unwrap_or_else(|_| {
        if s.contains("e-") || s.contains("E-") {
            return Decimal::ZERO;
        }
        if s.starts_with('-') { Decimal::MIN } else { Decimal::MAX }
    })
}

/// Conversión explícita float binario → decimal vía `str(f)`.
pub fn from_f64(f: f64) -> Decimal {
    parse_number(&f.to_string())
}

pub fn parse_str(field: &str, s: &str) -> Result<Decimal, crate::errors::ModelError> {
    Decimal::from_str(s.trim())
        .or_else(|_| Decimal::from_scientific(s.trim()))
        .map_err(|e| crate::errors::ModelError::InvalidValue { field: field.to_string(),
                                                               detail: format!("not a decimal: {e}") })
}

/// Cuantización exacta a `digits` dígitos fraccionales, half-to-even.
pub fn quantize(d: Decimal, digits: u32) -> Decimal {
    let mut q = d.round_dp_with_strategy(digits, RoundingStrategy::MidpointNearestEven);
    q.rescale(digits);
    q
}

/// Render para display: redondeado a 8 dígitos y normalizado.
pub fn display(d: &Decimal) -> String {
    d.round_dp_with_strategy(crate::constants::DISPLAY_DIGITS, RoundingStrategy::MidpointNearestEven)
     .normalize()
     .to_string()
}

/// Segundos transcurridos como decimal (contadores runtime / sql_runtime).
pub fn elapsed_secs(start: Instant) -> Decimal {
    from_f64(start.elapsed().as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_f64_matches_string_round_trip() {
        // d + f == d + Decimal(str(f)) reducido a la conversión del borde
        let f = 0.1_f64;
        assert_eq!(from_f64(f), lit("0.1"));
        assert_ne!(from_f64(f), Decimal::from_f64_retain(f).unwrap());
    }

    #[test]
    fn quantize_is_half_even() {
        assert_eq!(quantize(lit("6.005"), 2).to_string(), "6.00");
        assert_eq!(quantize(lit("6.015"), 2).to_string(), "6.02");
        assert_eq!(quantize(lit("2.5"), 0).to_string(), "2");
        assert_eq!(quantize(lit("3.5"), 0).to_string(), "4");
    }

    #[test]
    fn quantize_fixes_exponent() {
        assert_eq!(quantize(lit("6"), 2).to_string(), "6.00");
        assert_eq!(quantize(lit("6.1"), 3).to_string(), "6.100");
    }

    #[test]
    fn quantize_is_idempotent() {
        let once = quantize(lit("1.23456"), 2);
        assert_eq!(quantize(once, 2), once);
    }

    #[test]
    fn display_rounds_to_eight_and_normalizes() {
        assert_eq!(display(&lit("1.234567894")), "1.23456789");
        assert_eq!(display(&lit("2.500000000")), "2.5");
    }

    #[test]
    fn scientific_notation_parses() {
        assert_eq!(parse_number("1e2"), lit("100"));
    }
}
