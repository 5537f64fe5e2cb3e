use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EanError {
    #[error("EAN must not be empty")]
    Empty,
}

/// Cleans up a scanned or typed EAN before it is used as a search key.
///
/// Scanners occasionally deliver the code with surrounding whitespace or
/// embedded spaces from manual entry; both are dropped. No checksum
/// validation is applied: suppliers also accept internal article codes in
/// the EAN search field.
///
/// # Errors
///
/// Returns [`EanError::Empty`] if nothing is left after cleanup.
pub fn normalize_ean(raw: &str) -> Result<String, EanError> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Err(EanError::Empty);
    }
    Ok(cleaned)
}
