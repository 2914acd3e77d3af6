/// Parse a currency cell such as `$1,234.50`.
///
/// `$` and `,` are stripped before conversion. Empty or non-numeric input
/// yields `None`.
pub fn parse_currency(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    parse_number(&cleaned)
}

/// Coerce a plain numeric cell (`8.00`, `-0.5`) to `f64`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}
