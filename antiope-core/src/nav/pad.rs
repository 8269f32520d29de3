//! The navigation pad: entry buffer and current page
//!
//! Digits accumulate in a 3-slot buffer. The moment the third digit
//! lands, the buffer resolves in one step: the entry parses as a base-10
//! integer, the current page updates, the buffer empties and a single
//! [`PageChange`] is returned. No caller can ever observe a 3-digit
//! buffer or a page update without the paired buffer reset.

use heapless::{String, Vec};

use super::keys::{classify, KeyClass};

/// Digits required to resolve a page entry
pub const ENTRY_DIGITS: usize = 3;

/// Emitted whenever navigation resolves, by keypad entry or directly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageChange {
    pub page: u16,
}

/// Keypad navigation state: current page plus the partial entry
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NavigationPad {
    current: u16,
    entry: Vec<u8, ENTRY_DIGITS>,
}

impl NavigationPad {
    /// Create a pad on the given page with an empty entry buffer
    pub fn new(initial: u16) -> Self {
        Self {
            current: initial,
            entry: Vec::new(),
        }
    }

    /// The page navigation last resolved to
    pub fn current(&self) -> u16 {
        self.current
    }

    /// Number of digits currently buffered (0-2 between calls)
    pub fn entry_len(&self) -> usize {
        self.entry.len()
    }

    /// Feed a raw key token. Non-digit keys are ignored.
    pub fn press(&mut self, token: &str) -> Option<PageChange> {
        match classify(token) {
            KeyClass::Digit(d) => self.push_digit(d),
            KeyClass::Ignored => None,
        }
    }

    /// Append one digit; resolves atomically on the third.
    ///
    /// Values above 9 are ignored.
    pub fn push_digit(&mut self, digit: u8) -> Option<PageChange> {
        if digit > 9 || self.entry.push(digit).is_err() {
            return None;
        }
        if self.entry.len() == ENTRY_DIGITS {
            let page = self.entry.iter().fold(0u16, |acc, &d| acc * 10 + d as u16);
            self.entry.clear();
            self.current = page;
            return Some(PageChange { page });
        }
        None
    }

    /// Empty the entry buffer without touching the current page
    pub fn clear_entry(&mut self) {
        self.entry.clear();
    }

    /// Navigate directly, bypassing the 3-digit entry.
    ///
    /// Used for programmatic navigation: the boot page and the index
    /// key. Always clears the entry buffer and emits the same event as
    /// a keypad-resolved navigation.
    pub fn jump_to(&mut self, page: u16) -> PageChange {
        self.entry.clear();
        self.current = page;
        PageChange { page }
    }

    /// The partial entry padded with dots to the full entry width.
    ///
    /// Empty buffer renders as the empty string; one digit as `"d.."`,
    /// two as `"dd."`. A full buffer is never observable.
    pub fn entry_display(&self) -> String<ENTRY_DIGITS> {
        let mut out = String::new();
        if self.entry.is_empty() {
            return out;
        }
        for &d in &self.entry {
            let _ = out.push((b'0' + d) as char);
        }
        for _ in self.entry.len()..ENTRY_DIGITS {
            let _ = out.push('.');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_three_digits_resolve() {
        let mut pad = NavigationPad::new(100);
        assert_eq!(pad.press("3"), None);
        assert_eq!(pad.press("0"), None);
        assert_eq!(pad.press("0"), Some(PageChange { page: 300 }));
        assert_eq!(pad.current(), 300);
        assert_eq!(pad.entry_len(), 0);
    }

    #[test]
    fn test_leading_zero_entry_is_literal() {
        let mut pad = NavigationPad::new(100);
        pad.press("0");
        pad.press("0");
        assert_eq!(pad.press("7"), Some(PageChange { page: 7 }));
        assert_eq!(pad.current(), 7);
    }

    #[test]
    fn test_entry_display_progression() {
        let mut pad = NavigationPad::new(100);
        assert_eq!(pad.entry_display().as_str(), "");
        pad.press("3");
        assert_eq!(pad.entry_display().as_str(), "3..");
        pad.press("0");
        assert_eq!(pad.entry_display().as_str(), "30.");
        pad.press("0");
        assert_eq!(pad.entry_display().as_str(), "");
    }

    #[test]
    fn test_non_digits_do_not_touch_entry() {
        let mut pad = NavigationPad::new(100);
        pad.press("2");
        pad.press("menu");
        pad.press("x");
        pad.press("1");
        assert_eq!(pad.entry_display().as_str(), "21.");
        assert_eq!(pad.press("9"), Some(PageChange { page: 219 }));
    }

    #[test]
    fn test_clear_entry_keeps_current() {
        let mut pad = NavigationPad::new(100);
        pad.press("4");
        pad.press("5");
        pad.clear_entry();
        assert_eq!(pad.entry_display().as_str(), "");
        assert_eq!(pad.current(), 100);
        // A fresh entry starts from scratch
        pad.press("2");
        pad.press("0");
        assert_eq!(pad.press("0"), Some(PageChange { page: 200 }));
    }

    #[test]
    fn test_jump_to_bypasses_entry() {
        let mut pad = NavigationPad::new(100);
        pad.press("9");
        let change = pad.jump_to(100);
        assert_eq!(change, PageChange { page: 100 });
        assert_eq!(pad.current(), 100);
        assert_eq!(pad.entry_len(), 0);
    }

    #[test]
    fn test_out_of_range_digit_ignored() {
        let mut pad = NavigationPad::new(100);
        assert_eq!(pad.push_digit(10), None);
        assert_eq!(pad.entry_len(), 0);
    }

    proptest! {
        #[test]
        fn prop_three_digits_always_resolve(d1 in 0u8..10, d2 in 0u8..10, d3 in 0u8..10) {
            let mut pad = NavigationPad::new(100);
            prop_assert!(pad.push_digit(d1).is_none());
            prop_assert!(pad.push_digit(d2).is_none());
            let expected = d1 as u16 * 100 + d2 as u16 * 10 + d3 as u16;
            prop_assert_eq!(pad.push_digit(d3), Some(PageChange { page: expected }));
            prop_assert_eq!(pad.current(), expected);
            prop_assert_eq!(pad.entry_len(), 0);
        }

        #[test]
        fn prop_ignored_keys_never_resolve(tokens in proptest::collection::vec("[a-z]{2,8}", 0..20)) {
            let mut pad = NavigationPad::new(100);
            for token in &tokens {
                prop_assert!(pad.press(token).is_none());
            }
            prop_assert_eq!(pad.current(), 100);
            prop_assert_eq!(pad.entry_len(), 0);
        }

        #[test]
        fn prop_first_three_digits_win(mix in proptest::collection::vec(
            proptest::sample::select(&["1", "7", "0", "menu", "hold", "x", "9", "enter"][..]),
            3..24,
        )) {
            let digits: heapless::Vec<u16, 32> = mix
                .iter()
                .filter_map(|t| match classify(t) {
                    KeyClass::Digit(d) => Some(d as u16),
                    KeyClass::Ignored => None,
                })
                .collect();

            let mut pad = NavigationPad::new(100);
            let mut resolved = None;
            for token in &mix {
                if let Some(change) = pad.press(token) {
                    resolved.get_or_insert(change.page);
                }
            }

            if digits.len() >= 3 {
                let expected = digits[0] * 100 + digits[1] * 10 + digits[2];
                prop_assert_eq!(resolved, Some(expected));
            } else {
                prop_assert_eq!(resolved, None);
            }
        }
    }
}
