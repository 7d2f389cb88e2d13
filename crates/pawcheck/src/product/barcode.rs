use super::LookupError;

/// Strips everything but ASCII digits from a scanned or typed barcode.
pub fn clean_barcode(raw: &str) -> Result<String, LookupError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(LookupError::MissingBarcode);
    }
    Ok(digits)
}
