//! Decimal-amount helpers.
//!
//! Amounts (montant global, participation région) travel and persist as
//! strings so currency values never touch floating point. They are parsed
//! into [`Decimal`] only for validation and aggregation. The empty string
//! means "cleared" and is treated the same as an absent value.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse an optional amount field.
///
/// `None` and `Some("")` both yield `Ok(None)`. A present value must parse
/// as a non-negative decimal.
pub fn parse_opt_montant(value: Option<&str>) -> Result<Option<Decimal>, String> {
    let Some(raw) = value else { return Ok(None) };
    if raw.is_empty() {
        return Ok(None);
    }
    let parsed = Decimal::from_str(raw)
        .map_err(|_| format!("'{raw}' n'est pas un montant valide"))?;
    if parsed.is_sign_negative() {
        return Err("le montant ne peut pas être négatif".to_string());
    }
    Ok(Some(parsed))
}

/// Check the amount-ordering invariant: participation région must not
/// exceed montant global when both values are present.
///
/// Inputs are the raw string fields; unparseable values are reported as
/// their own error rather than silently passing the ordering check.
pub fn check_ordering(
    montant_global: Option<&str>,
    participation_region: Option<&str>,
) -> Result<(), String> {
    let total = parse_opt_montant(montant_global)?;
    let participation = parse_opt_montant(participation_region)?;
    if let (Some(total), Some(participation)) = (total, participation) {
        if participation > total {
            return Err(
                "la participation de la région ne peut pas dépasser le montant global".to_string(),
            );
        }
    }
    Ok(())
}

/// Sum a sequence of optional amount strings, treating absent, cleared,
/// and unparseable values as zero.
///
/// Write-side validation guarantees stored amounts parse; the lenient
/// fallback keeps the aggregation total even if legacy rows disagree.
pub fn sum_montants<'a, I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    values
        .into_iter()
        .filter_map(|v| parse_opt_montant(v).ok().flatten())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_parse_to_none() {
        assert_eq!(parse_opt_montant(None), Ok(None));
        assert_eq!(parse_opt_montant(Some("")), Ok(None));
    }

    #[test]
    fn valid_amounts_parse() {
        assert_eq!(
            parse_opt_montant(Some("150")),
            Ok(Some(Decimal::from_str("150").unwrap()))
        );
        assert_eq!(
            parse_opt_montant(Some("1234.56")),
            Ok(Some(Decimal::from_str("1234.56").unwrap()))
        );
    }

    #[test]
    fn negative_and_garbage_are_rejected() {
        assert!(parse_opt_montant(Some("-1")).is_err());
        assert!(parse_opt_montant(Some("abc")).is_err());
        assert!(parse_opt_montant(Some("1,5")).is_err());
    }

    #[test]
    fn ordering_rejects_participation_above_total() {
        assert!(check_ordering(Some("100"), Some("150")).is_err());
        assert!(check_ordering(Some("150"), Some("100")).is_ok());
        assert!(check_ordering(Some("100"), Some("100")).is_ok());
    }

    #[test]
    fn ordering_passes_when_one_side_missing() {
        assert!(check_ordering(None, Some("150")).is_ok());
        assert!(check_ordering(Some("100"), None).is_ok());
        assert!(check_ordering(Some("100"), Some("")).is_ok());
    }

    #[test]
    fn sums_skip_missing_values() {
        let total = sum_montants([Some("100.50"), None, Some(""), Some("49.50")]);
        assert_eq!(total, Decimal::from_str("150.00").unwrap());
    }

    #[test]
    fn sums_are_exact() {
        // 0.1 + 0.2 is the classic float trap; decimals must stay exact.
        let total = sum_montants([Some("0.1"), Some("0.2")]);
        assert_eq!(total, Decimal::from_str("0.3").unwrap());
    }
}
