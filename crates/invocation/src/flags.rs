//! Token shapes shared by the flag detectors.

/// Marker that ends option processing; later tokens are operands.
pub(crate) const END_OF_OPTIONS: &str = "--";

/// Returns the letters of a single-dash short-option group (`-vqr` → `vqr`).
///
/// Long options, the bare `-` operand and words without a leading dash are
/// not short groups.
pub(crate) fn short_group(token: &str) -> Option<&str> {
    let letters = token.strip_prefix('-')?;
    if letters.is_empty() || letters.starts_with('-') {
        return None;
    }
    Some(letters)
}
