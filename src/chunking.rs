//! Break-aware sliding-window chunking.
//!
//! [`WindowChunker`] splits linear text into overlapping character windows,
//! preferring to cut each window at a natural break (newline, clause comma,
//! word boundary) instead of mid-word. The break markers are a prioritized,
//! pluggable pattern list; the policy is "right-most match past half the
//! window".

/// Candidate break patterns tried in every window, in priority order.
pub const DEFAULT_BREAK_PATTERNS: [&str; 3] = ["\n", ", ", " "];

/// Splits text into overlapping, break-aware windows of bounded size.
///
/// Windows are measured in characters (not bytes), so multibyte content never
/// splits mid-character. Every emitted chunk is trimmed and non-empty.
///
/// # Example
///
/// ```
/// use docvec::WindowChunker;
///
/// let chunker = WindowChunker::new(1000, 100);
/// let chunks = chunker.chunk("some long text ...");
/// ```
#[derive(Debug, Clone)]
pub struct WindowChunker {
    size: usize,
    overlap: usize,
    break_patterns: Vec<Vec<char>>,
}

impl WindowChunker {
    /// Create a chunker with the given window size and overlap, both in
    /// characters, using [`DEFAULT_BREAK_PATTERNS`].
    ///
    /// # Panics
    ///
    /// Panics if `overlap >= size`; [`IngestConfig`](crate::IngestConfig)
    /// validation rejects such values before a chunker is built from them.
    pub fn new(size: usize, overlap: usize) -> Self {
        assert!(overlap < size, "chunk overlap must be less than chunk size");
        Self {
            size,
            overlap,
            break_patterns: DEFAULT_BREAK_PATTERNS
                .iter()
                .map(|p| p.chars().collect())
                .collect(),
        }
    }

    /// Replace the candidate break patterns.
    ///
    /// A window is truncated at the right-most occurrence of any pattern,
    /// provided the match lies past half the window.
    pub fn with_break_patterns(mut self, patterns: &[&str]) -> Self {
        self.break_patterns = patterns.iter().map(|p| p.chars().collect()).collect();
        self
    }

    /// Split `text` into ordered, trimmed, non-empty chunks.
    ///
    /// Text at most one window long becomes a single trimmed chunk (or
    /// nothing, if whitespace-only). Longer text is walked with a cursor:
    /// each window after the first starts `overlap` characters before the
    /// previous window's untruncated end, a break past the window's midpoint
    /// truncates the window unless it already reaches end-of-text, and the
    /// cursor always advances from the untruncated end. Each iteration
    /// advances the cursor by `size - overlap`, so the walk terminates.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() <= self.size {
            let trimmed = text.trim();
            return if trimmed.is_empty() { Vec::new() } else { vec![trimmed.to_string()] };
        }

        let mut chunks = Vec::new();
        let mut cursor = 0usize;

        while cursor < chars.len() {
            let start = if cursor == 0 { 0 } else { cursor.saturating_sub(self.overlap) };
            let end = (start + self.size).min(chars.len());
            let mut window = &chars[start..end];

            // Only cut at a break when more text follows; the last window
            // keeps its natural end. Text past the cut is re-scanned by the
            // next window, which starts from the untruncated end.
            if end < chars.len() {
                if let Some(cut) = self.rightmost_break(window) {
                    if cut > window.len() / 2 {
                        window = &window[..cut];
                    }
                }
            }

            let piece: String = window.iter().collect();
            let piece = piece.trim();
            if !piece.is_empty() {
                chunks.push(piece.to_string());
            }

            cursor = end;
        }

        chunks
    }

    /// The right-most offset at which any break pattern matches, if any.
    fn rightmost_break(&self, window: &[char]) -> Option<usize> {
        self.break_patterns.iter().filter_map(|p| rfind(window, p)).max()
    }
}

/// Right-most occurrence of `needle` in `haystack`, as a char offset.
fn rfind(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).rev().find(|&i| haystack[i..i + needle.len()] == *needle)
}
