//! Property tests for the break-aware sliding-window chunker.

use docvec::WindowChunker;
use proptest::prelude::*;

/// Window size and a strictly smaller overlap.
fn size_and_overlap() -> impl Strategy<Value = (usize, usize)> {
    (8usize..64).prop_flat_map(|size| (Just(size), 0..size))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every emitted chunk is trimmed and non-empty, for any input.
    #[test]
    fn chunks_are_trimmed_and_non_empty(
        text in ".{0,400}",
        (size, overlap) in size_and_overlap(),
    ) {
        let chunker = WindowChunker::new(size, overlap);
        for chunk in chunker.chunk(&text) {
            prop_assert!(!chunk.is_empty());
            prop_assert_eq!(chunk.trim(), chunk.as_str());
        }
    }

    /// The walk emits at most one chunk per iteration, and iterations are
    /// bounded by `ceil(len / (size - overlap)) + 1`.
    #[test]
    fn chunk_count_respects_the_iteration_bound(
        text in ".{0,400}",
        (size, overlap) in size_and_overlap(),
    ) {
        let chunker = WindowChunker::new(size, overlap);
        let chunks = chunker.chunk(&text);

        let len = text.chars().count();
        let step = size - overlap;
        let bound = len.div_ceil(step) + 1;
        prop_assert!(chunks.len() <= bound, "{} chunks > bound {}", chunks.len(), bound);
    }

    /// Text no longer than one window becomes exactly its trimmed self, or
    /// nothing when whitespace-only.
    #[test]
    fn short_text_is_returned_verbatim_trimmed(
        text in ".{0,20}",
        size in 20usize..64,
    ) {
        let chunker = WindowChunker::new(size, size / 4);
        let chunks = chunker.chunk(&text);

        let trimmed = text.trim();
        if trimmed.is_empty() {
            prop_assert!(chunks.is_empty());
        } else {
            prop_assert_eq!(chunks, vec![trimmed.to_string()]);
        }
    }

    /// Whitespace-only input never produces a chunk, regardless of length.
    #[test]
    fn whitespace_only_text_yields_nothing(
        text in "[ \t\n]{0,300}",
        (size, overlap) in size_and_overlap(),
    ) {
        let chunker = WindowChunker::new(size, overlap);
        prop_assert!(chunker.chunk(&text).is_empty());
    }
}
