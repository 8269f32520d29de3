//! Header row layout
//!
//! The header packs three fields into exactly one grid row: the page
//! name on the left, the page token in the middle and the clock on the
//! right. The middle token is the zero-padded page number while a page
//! is displayed, or the partial keypad entry while digits are typed.

use heapless::String;

use crate::clock::TimeOfDay;
use crate::grid::COLUMNS;

/// Width of the right-aligned clock field
pub const CLOCK_WIDTH: usize = 8;

/// Width of the page token ("P" + 3 digits)
pub const PAGE_TOKEN_WIDTH: usize = 4;

/// The page token for a page number: `P` followed by the number
/// zero-padded to 3 digits
pub fn page_token(page: u16) -> String<PAGE_TOKEN_WIDTH> {
    use core::fmt::Write;
    let mut out = String::new();
    let _ = write!(out, "P{:03}", page);
    out
}

/// Format the header row for a displayed page.
///
/// The result is exactly [`COLUMNS`] characters when the caller keeps
/// `page_name` within the header budget (name + token + clock fit on
/// the row). Page names are not validated or clipped here; the
/// fixed-capacity buffer saturates at the grid edge on contract
/// violations rather than panicking.
pub fn format_header(page_name: &str, page: u16, time: TimeOfDay) -> String<COLUMNS> {
    format_header_token(page_name, page_token(page).as_str(), time)
}

/// Format the header row with an arbitrary middle token.
///
/// Used with the partial keypad entry (`"1.."`, `"12."`) in place of
/// the page token while digits are being typed. Padding between the
/// fields is split as evenly as possible; an odd remainder goes after
/// the middle token.
pub fn format_header_token(page_name: &str, token: &str, time: TimeOfDay) -> String<COLUMNS> {
    let mut line: String<COLUMNS> = String::new();
    let _ = line.push_str(page_name);

    let used = page_name.chars().count() + token.chars().count() + CLOCK_WIDTH;
    let pad = COLUMNS.saturating_sub(used);
    let before = pad / 2;
    let after = pad - before;

    for _ in 0..before {
        let _ = line.push(' ');
    }
    let _ = line.push_str(token);
    for _ in 0..after {
        let _ = line.push(' ');
    }
    let _ = line.push_str(time.hhmmss().as_str());
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_header_is_exactly_one_row() {
        let header = format_header("NEWS", 201, TimeOfDay::new(14, 30, 5));
        assert_eq!(header.len(), COLUMNS);
        assert!(header.starts_with("NEWS"));
        assert!(header.ends_with("14:30:05"));
        assert!(header.as_str().contains("P201"));
    }

    #[test]
    fn test_token_zero_padded() {
        assert_eq!(page_token(7).as_str(), "P007");
        assert_eq!(page_token(42).as_str(), "P042");
        assert_eq!(page_token(999).as_str(), "P999");
    }

    #[test]
    fn test_odd_padding_lands_after_token() {
        // 5 + 4 + 8 = 17 used, 23 spare: 11 before, 12 after
        let header = format_header("INDEX", 100, TimeOfDay::MIDNIGHT);
        assert_eq!(header.len(), COLUMNS);
        let token_at = header.as_str().find("P100").unwrap();
        assert_eq!(token_at, 5 + 11);
    }

    #[test]
    fn test_entry_token_header() {
        let header = format_header_token("INDEX", "30.", TimeOfDay::new(9, 0, 0));
        assert_eq!(header.len(), COLUMNS);
        assert!(header.as_str().contains("30."));
        assert!(header.ends_with("09:00:00"));
    }

    #[test]
    fn test_empty_page_name() {
        let header = format_header("", 100, TimeOfDay::MIDNIGHT);
        assert_eq!(header.len(), COLUMNS);
        assert!(header.ends_with("00:00:00"));
    }

    proptest! {
        #[test]
        fn prop_header_shape(name in "[A-Z]{0,16}", page in 0u16..1000, h in 0u8..24, m in 0u8..60, s in 0u8..60) {
            let time = TimeOfDay::new(h, m, s);
            let header = format_header(&name, page, time);
            prop_assert_eq!(header.len(), COLUMNS);
            prop_assert!(header.starts_with(name.as_str()));
            prop_assert!(header.ends_with(time.hhmmss().as_str()));
            prop_assert!(header.as_str().contains(page_token(page).as_str()));
        }
    }
}
