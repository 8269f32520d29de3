//! Minimal TOML parser for the page registry
//!
//! Handles only the subset needed for pages.toml. It does NOT support
//! the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [[page]] and [[feed]] array-of-table headers
//! - Multi-line string arrays: lines = [ "...", ... ] with the closing
//!   bracket on its own line
//! - Arrays of inline tables, one per line:
//!   { row = 0, col = 0, color = "yellow" },
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings, datetimes, nested inline tables, dotted keys

use antiope_core::config::{FeedRouteConfig, StaticPageConfig, TerminalConfig};
use antiope_core::page::ColorMark;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unrecognised section header
    InvalidSection,
    /// A value could not be parsed for its key
    InvalidValue,
    /// Exceeded a heapless capacity
    TooManyItems,
    /// A colour mark inline table was malformed
    InvalidMark,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Page,
    Feed,
}

/// Which multi-line array is being accumulated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrayField {
    None,
    Lines,
    Colors,
}

/// Parse the page registry TOML into a TerminalConfig
pub fn parse_registry(input: &str) -> Result<TerminalConfig, ParseError> {
    let mut config = TerminalConfig::new();
    let mut section = Section::Root;
    let mut current_page: Option<StaticPageConfig> = None;
    let mut current_feed: Option<FeedRouteConfig> = None;
    let mut array = ArrayField::None;

    for raw in input.lines() {
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Inside a multi-line array: accumulate until the close bracket
        if array != ArrayField::None {
            if line.starts_with(']') {
                array = ArrayField::None;
                continue;
            }
            let item = line.trim_end_matches(',').trim();
            match array {
                ArrayField::Lines => {
                    let text = unquote(item).ok_or(ParseError::InvalidValue)?;
                    if let Some(page) = current_page.as_mut() {
                        push_clipped(&mut page.lines, text)?;
                    }
                }
                ArrayField::Colors => {
                    let mark = parse_color_mark(item)?;
                    if let Some(page) = current_page.as_mut() {
                        page.colors.push(mark).map_err(|_| ParseError::TooManyItems)?;
                    }
                }
                ArrayField::None => {}
            }
            continue;
        }

        // Section headers
        if line.starts_with("[[") && line.ends_with("]]") {
            save_section(section, &mut config, &mut current_page, &mut current_feed)?;
            section = match &line[2..line.len() - 2] {
                "page" => {
                    current_page = Some(StaticPageConfig::default());
                    Section::Page
                }
                "feed" => {
                    current_feed = Some(FeedRouteConfig::default());
                    Section::Feed
                }
                _ => return Err(ParseError::InvalidSection),
            };
            continue;
        }
        if line.starts_with('[') {
            return Err(ParseError::InvalidSection);
        }

        // Key = value
        let (key, value) = match line.split_once('=') {
            Some((k, v)) => (k.trim(), v.trim()),
            None => continue,
        };

        match section {
            Section::Root => match key {
                "service_name" => {
                    let name = unquote(value).ok_or(ParseError::InvalidValue)?;
                    set_clipped(&mut config.service_name, name);
                }
                "home_page" => {
                    config.home_page = parse_u16(value)?;
                }
                _ => {}
            },
            Section::Page => {
                let page = current_page.as_mut().ok_or(ParseError::InvalidSection)?;
                match key {
                    "number" => page.number = parse_u16(value)?,
                    "title" => {
                        let title = unquote(value).ok_or(ParseError::InvalidValue)?;
                        set_clipped(&mut page.title, title);
                    }
                    "lines" => {
                        if value != "[" && value != "[]" {
                            return Err(ParseError::InvalidValue);
                        }
                        if value == "[" {
                            array = ArrayField::Lines;
                        }
                    }
                    "colors" => {
                        if value != "[" && value != "[]" {
                            return Err(ParseError::InvalidValue);
                        }
                        if value == "[" {
                            array = ArrayField::Colors;
                        }
                    }
                    _ => {}
                }
            }
            Section::Feed => {
                let feed = current_feed.as_mut().ok_or(ParseError::InvalidSection)?;
                match key {
                    "category" => {
                        let name = unquote(value).ok_or(ParseError::InvalidValue)?;
                        set_clipped(&mut feed.category, name);
                    }
                    "page" => feed.page = parse_u16(value)?,
                    "title" => {
                        let title = unquote(value).ok_or(ParseError::InvalidValue)?;
                        set_clipped(&mut feed.title, title);
                    }
                    _ => {}
                }
            }
        }
    }

    if array != ArrayField::None {
        return Err(ParseError::InvalidValue);
    }
    save_section(section, &mut config, &mut current_page, &mut current_feed)?;
    Ok(config)
}

/// Commit the section being built, if any
fn save_section(
    section: Section,
    config: &mut TerminalConfig,
    current_page: &mut Option<StaticPageConfig>,
    current_feed: &mut Option<FeedRouteConfig>,
) -> Result<(), ParseError> {
    match section {
        Section::Page => {
            if let Some(page) = current_page.take() {
                config.pages.push(page).map_err(|_| ParseError::TooManyItems)?;
            }
        }
        Section::Feed => {
            if let Some(feed) = current_feed.take() {
                config.feeds.push(feed).map_err(|_| ParseError::TooManyItems)?;
            }
        }
        Section::Root => {}
    }
    Ok(())
}

/// Parse an inline table like { row = 0, col = 0, color = "yellow" }
fn parse_color_mark(item: &str) -> Result<ColorMark, ParseError> {
    let inner = item
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .ok_or(ParseError::InvalidMark)?;

    let mut mark = ColorMark::new(0, 0, "");
    let mut seen_color = false;
    for pair in inner.split(',') {
        let (key, value) = pair.split_once('=').ok_or(ParseError::InvalidMark)?;
        match key.trim() {
            "row" => mark.row = parse_u16(value.trim()).map_err(|_| ParseError::InvalidMark)? as u8,
            "col" => mark.col = parse_u16(value.trim()).map_err(|_| ParseError::InvalidMark)? as u8,
            "color" => {
                let name = unquote(value.trim()).ok_or(ParseError::InvalidMark)?;
                mark = ColorMark::new(mark.row, mark.col, name);
                seen_color = true;
            }
            _ => return Err(ParseError::InvalidMark),
        }
    }
    if !seen_color {
        return Err(ParseError::InvalidMark);
    }
    Ok(mark)
}

/// Strip surrounding double quotes
fn unquote(value: &str) -> Option<&str> {
    value.strip_prefix('"')?.strip_suffix('"')
}

fn parse_u16(value: &str) -> Result<u16, ParseError> {
    value.parse::<u16>().map_err(|_| ParseError::InvalidValue)
}

/// Set a heapless string, clipping at capacity
fn set_clipped<const N: usize>(dest: &mut heapless::String<N>, text: &str) {
    dest.clear();
    for ch in text.chars() {
        if dest.push(ch).is_err() {
            break;
        }
    }
}

/// Push a line into a heapless vec of strings, clipping the line at
/// capacity; too many lines is an error
fn push_clipped<const L: usize, const N: usize>(
    dest: &mut heapless::Vec<heapless::String<L>, N>,
    text: &str,
) -> Result<(), ParseError> {
    let mut line: heapless::String<L> = heapless::String::new();
    for ch in text.chars() {
        if line.push(ch).is_err() {
            break;
        }
    }
    dest.push(line).map_err(|_| ParseError::TooManyItems)
}
