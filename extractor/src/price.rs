/// Strip the currency symbol and thousands separators and parse what
/// remains. Anything non-numeric ("N/A", empty, ranges) becomes None.
pub fn parse_money(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().replace(['$', ','], "");

    trimmed.parse::<f64>().ok()
}

/// Integer discount percentage, computed only when both prices parse
/// as positive numbers and the struck-through list price is strictly
/// above the current one. Equal prices deliberately yield no discount.
pub fn discount_percent(price: &str, list_price: &str) -> Option<String> {
    let current = parse_money(price)?;
    let list = parse_money(list_price)?;

    if current <= 0.0 || list <= 0.0 || list <= current {
        return None;
    }

    let percent = ((list - current) / list * 100.0).round() as i64;

    Some(format!("{percent}%"))
}
