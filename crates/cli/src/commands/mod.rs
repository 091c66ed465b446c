//! Subcommand implementations, one module per page.

pub mod cart;
pub mod checkout;
pub mod contact;

/// Parse a `key=value` form field.
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((key.to_owned(), value.to_owned()))
}
