//! Grid constants and the two clipping operations
//!
//! The geometry is fixed for the life of the process. Both clipping
//! operations are pure and never fail; oversized input is cut, never
//! reported.

/// Number of character columns
pub const COLUMNS: usize = 40;

/// Number of character rows (header + content)
pub const ROWS: usize = 24;

/// Header row, reserved for page name / page number / clock (1-based)
pub const HEADER_ROW: usize = 1;

/// First content row (1-based)
pub const CONTENT_START_ROW: usize = 2;

/// Number of content rows
pub const CONTENT_ROWS: usize = 23;

// The header and content rows must tile the grid exactly.
const _: () = assert!(CONTENT_START_ROW + CONTENT_ROWS - 1 == ROWS);
const _: () = assert!(HEADER_ROW < CONTENT_START_ROW);

/// Clip a line of text to the grid width.
///
/// Returns the input unchanged when it is at most [`COLUMNS`] characters,
/// otherwise the first [`COLUMNS`] characters. Character-boundary safe,
/// so non-ASCII input cannot cause a panic. Applying it twice yields the
/// same result as applying it once.
pub fn clip_line(text: &str) -> &str {
    match text.char_indices().nth(COLUMNS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Clip a slice of rows to the content height.
///
/// Returns the input unchanged when it holds at most [`CONTENT_ROWS`]
/// entries, otherwise the first [`CONTENT_ROWS`] entries in their
/// original order.
pub fn clip_rows<T>(rows: &[T]) -> &[T] {
    &rows[..rows.len().min(CONTENT_ROWS)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_short_line_unchanged() {
        assert_eq!(clip_line("NEWS HEADLINES"), "NEWS HEADLINES");
        assert_eq!(clip_line(""), "");
    }

    #[test]
    fn test_exact_width_unchanged() {
        let line = "0123456789012345678901234567890123456789";
        assert_eq!(line.len(), COLUMNS);
        assert_eq!(clip_line(line), line);
    }

    #[test]
    fn test_long_line_clipped() {
        let line = "0123456789012345678901234567890123456789XYZ";
        let clipped = clip_line(line);
        assert_eq!(clipped.len(), COLUMNS);
        assert_eq!(clipped, &line[..COLUMNS]);
    }

    #[test]
    fn test_multibyte_line_clipped_on_char_boundary() {
        let mut line = heapless::String::<256>::new();
        for _ in 0..50 {
            let _ = line.push('é');
        }
        let clipped = clip_line(line.as_str());
        assert_eq!(clipped.chars().count(), COLUMNS);
    }

    #[test]
    fn test_rows_within_bounds_unchanged() {
        let rows = ["a", "b", "c"];
        assert_eq!(clip_rows(&rows), &rows);
    }

    #[test]
    fn test_rows_clipped_in_order() {
        let rows: [usize; 30] = core::array::from_fn(|i| i);
        let clipped = clip_rows(&rows);
        assert_eq!(clipped.len(), CONTENT_ROWS);
        assert_eq!(clipped[0], 0);
        assert_eq!(clipped[CONTENT_ROWS - 1], CONTENT_ROWS - 1);
    }

    proptest! {
        #[test]
        fn prop_clip_line_bounded(s in ".*") {
            prop_assert!(clip_line(&s).chars().count() <= COLUMNS);
        }

        #[test]
        fn prop_clip_line_identity_when_short(s in ".{0,40}") {
            prop_assert_eq!(clip_line(&s), s.as_str());
        }

        #[test]
        fn prop_clip_line_idempotent(s in ".*") {
            prop_assert_eq!(clip_line(clip_line(&s)), clip_line(&s));
        }

        #[test]
        fn prop_clip_rows_bounded(n in 0usize..64) {
            let rows: heapless::Vec<usize, 64> = (0..n).collect();
            prop_assert!(clip_rows(&rows).len() <= CONTENT_ROWS);
            prop_assert!(clip_rows(&rows).iter().eq(rows.iter().take(CONTENT_ROWS)));
        }
    }
}
