use colored::Colorize;
use rust_decimal::Decimal;
use std::io::{self, Write};

use portfolio_selector_core::selection::PortfolioSelection;
use portfolio_selector_core::Rate;

/// Percentage with two decimals; values strictly between 0 and 10 get a
/// leading zero so single-digit rows line up ("05.25").
pub fn format_percent(rate: Rate) -> String {
    let pct = rate * Decimal::ONE_HUNDRED;
    if pct > Decimal::ZERO && pct < Decimal::TEN {
        format!("0{:.2}", pct)
    } else {
        format!("{:.2}", pct)
    }
}

/// One line per asset, in selection order.
pub fn write_selection<W: Write>(out: &mut W, selection: &PortfolioSelection) -> io::Result<()> {
    for asset in &selection.assets {
        writeln!(
            out,
            "{} {} {} {}%",
            "Asset:".red(),
            asset.asset,
            "Expected return:".blue(),
            format_percent(asset.expected_return)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_leading_zero_below_ten_percent() {
        assert_eq!(format_percent(dec!(0.0525)), "05.25");
        assert_eq!(format_percent(dec!(0.201)), "20.10");
    }

    #[test]
    fn test_no_leading_zero_for_zero_or_negative() {
        assert_eq!(format_percent(Decimal::ZERO), "0.00");
        assert_eq!(format_percent(dec!(-0.034)), "-3.40");
    }
}
