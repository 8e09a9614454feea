use csv::{ReaderBuilder, StringRecord, Trim};
use portfolio_selector_core::RawObservation;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use std::str::FromStr;

/// One CSV row as text. Headers are matched case-insensitively in English
/// or in Portuguese (ativo, preco, valor, dividendo).
#[derive(Debug, Deserialize)]
struct ObservationRecord {
    #[serde(alias = "ativo")]
    code: String,
    #[serde(alias = "preco")]
    price: String,
    #[serde(alias = "valor")]
    value: String,
    #[serde(alias = "dividendo", default)]
    dividend: Option<String>,
}

/// Parse a headed CSV table into observations, preserving row order.
///
/// Codes are normalised to uppercase. Any non-numeric price, value or
/// dividend fails here, naming the row and column; a missing or blank
/// dividend counts as zero.
pub fn parse_observations<R: Read>(reader: R) -> Result<Vec<RawObservation>, Box<dyn std::error::Error>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let mut headers = StringRecord::new();
    for h in rdr.headers()?.iter() {
        headers.push_field(&h.to_lowercase());
    }

    let mut observations = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        // header is line 1
        let line = i + 2;
        let record = result?;
        let row: ObservationRecord = record
            .deserialize(Some(&headers))
            .map_err(|e| format!("Row {line}: {e}"))?;

        if row.code.trim().is_empty() {
            return Err(format!("Row {line}: empty asset code").into());
        }

        let dividend = match row.dividend.as_deref().map(str::trim) {
            None | Some("") => Decimal::ZERO,
            Some(text) => parse_number(text, line, "dividend")?,
        };

        observations.push(RawObservation::new(
            &row.code,
            parse_number(&row.price, line, "price")?,
            parse_number(&row.value, line, "value")?,
            dividend,
        ));
    }

    Ok(observations)
}

fn parse_number(text: &str, line: usize, column: &str) -> Result<Decimal, Box<dyn std::error::Error>> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| format!("Row {line}: '{text}' is not a number in column '{column}'").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_english_headers() {
        let csv = "code,price,value,dividend\npetr4,10.5,11,0.2\nvale3,50,49,0\n";
        let rows = parse_observations(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code, "PETR4");
        assert_eq!(rows[0].price, dec!(10.5));
        assert_eq!(rows[0].dividend, dec!(0.2));
        assert_eq!(rows[1].code, "VALE3");
    }

    #[test]
    fn test_portuguese_headers_any_case() {
        let csv = "Ativo, Preco ,VALOR,dividendo\n itub4 ,30,31,1\n";
        let rows = parse_observations(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].code, "ITUB4");
        assert_eq!(rows[0].value, dec!(31));
        assert_eq!(rows[0].dividend, dec!(1));
    }

    #[test]
    fn test_extra_columns_and_missing_dividend() {
        let csv = "date,code,price,value\n2024-01-02,abc3,1,2\n";
        let rows = parse_observations(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].dividend, Decimal::ZERO);
    }

    #[test]
    fn test_blank_dividend_is_zero() {
        let csv = "code,price,value,dividend\nabc3,1,2,\n";
        let rows = parse_observations(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].dividend, Decimal::ZERO);
    }

    #[test]
    fn test_scientific_notation() {
        let csv = "code,price,value,dividend\nabc3,1.5e2,2e1,0\n";
        let rows = parse_observations(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].price, dec!(150));
        assert_eq!(rows[0].value, dec!(20));
    }

    #[test]
    fn test_non_numeric_fails_with_location() {
        let csv = "code,price,value,dividend\nabc3,1,2,0\nabc3,abc,2,0\n";
        let err = parse_observations(csv.as_bytes()).unwrap_err().to_string();
        assert!(err.contains("Row 3"), "{err}");
        assert!(err.contains("price"), "{err}");
    }

    #[test]
    fn test_empty_code_rejected() {
        let csv = "code,price,value,dividend\n ,1,2,0\n";
        assert!(parse_observations(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_row_order_preserved() {
        let csv = "code,price,value,dividend\nb,1,1,0\na,2,2,0\nb,3,3,0\n";
        let rows = parse_observations(csv.as_bytes()).unwrap();
        let prices: Vec<Decimal> = rows.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![dec!(1), dec!(2), dec!(3)]);
    }
}
