//! Coarse token estimation for storage metadata.

/// Estimate the token count of a text as `ceil(chars / 4)`.
///
/// This is a deliberately coarse heuristic recorded alongside each chunk for
/// capacity planning. Nothing may depend on its exactness; chunk boundaries
/// in particular are decided by character windows, not by this estimate.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}
