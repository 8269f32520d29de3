//! Main terminal controller
//!
//! The controller is the central brain that:
//! - Classifies keypad input through the navigation pad
//! - Drives the screen sequencer
//! - Tracks the wall clock
//! - Rebuilds the screen buffer on renders, keypad entry and clock
//!   changes

use antiope_core::clock::{TimeOfDay, WallClock};
use antiope_core::compose::{format_header, format_header_token};
use antiope_core::config::{TerminalConfig, MAX_TITLE_LEN};
use antiope_core::nav::{NavigationPad, PageChange};
use antiope_core::page::{Category, PageStore};
use antiope_core::sequencer::{FetchRequest, Output, Phase, RenderRequest, Sequencer};
use antiope_core::cache::ArticleSet;
use antiope_display::Screen;
use antiope_protocol::KeyCode;

use heapless::String;

/// Controller state coordinating navigation, sequencing and the screen
pub struct Terminal {
    pad: NavigationPad,
    seq: Sequencer,
    clock: WallClock,
    screen: Screen,
    /// Title of the page on screen, for header-only refreshes
    title: String<MAX_TITLE_LEN>,
    /// Clock value last drawn into the header
    shown_time: TimeOfDay,
    /// Fetch request waiting for the gateway task
    pending_fetch: Option<FetchRequest>,
    /// Last tick timestamp (ms)
    last_tick_ms: u32,
}

impl Terminal {
    /// Create a controller from the parsed page registry
    pub fn new(config: TerminalConfig) -> Self {
        let store = PageStore::from_config(config);
        let seq = Sequencer::new(store);
        let pad = NavigationPad::new(seq.page());
        let mut terminal = Self {
            pad,
            seq,
            clock: WallClock::new(),
            screen: Screen::new(),
            title: String::new(),
            shown_time: TimeOfDay::MIDNIGHT,
            pending_fetch: None,
            last_tick_ms: 0,
        };
        terminal.render_boot();
        terminal
    }

    /// Current sequencer phase
    pub fn phase(&self) -> Phase {
        self.seq.phase()
    }

    /// Current page
    pub fn page(&self) -> u16 {
        self.seq.page()
    }

    /// The screen buffer as last rendered
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Whether the screen changed since the last sync
    pub fn screen_dirty(&self) -> bool {
        self.screen.is_dirty()
    }

    /// Mark the screen as synced to the display
    pub fn mark_screen_clean(&mut self) {
        self.screen.mark_clean()
    }

    /// Take the fetch request generated by the last input, if any
    pub fn take_fetch(&mut self) -> Option<FetchRequest> {
        self.pending_fetch.take()
    }

    /// Process one keypad press.
    ///
    /// Returns the page-change event when navigation resolved.
    pub fn handle_key(&mut self, key: KeyCode, now_ms: u32) -> Option<PageChange> {
        let change = match key {
            KeyCode::Index => Some(self.pad.jump_to(self.seq.home_page())),
            _ => {
                let change = self.pad.press(key.token());
                if change.is_none() && key.is_digit() {
                    // Partial entry is visible in the header
                    self.refresh_header(now_ms);
                }
                change
            }
        };

        if let Some(change) = change {
            if let Some(req) = self.seq.navigate(change.page) {
                self.pending_fetch = Some(req);
            }
            if self.seq.phase() == Phase::Clearing {
                // Blanked display while the page turn runs
                self.screen.clear();
            } else {
                // Same-page no-op: the entry still needs wiping
                self.refresh_header(now_ms);
            }
        }
        change
    }

    /// Periodic tick update. Call regularly with the uptime in ms.
    pub fn tick(&mut self, now_ms: u32) {
        let delta_ms = now_ms.wrapping_sub(self.last_tick_ms);
        self.last_tick_ms = now_ms;

        let now = self.clock.now(now_ms);
        match self.seq.tick(delta_ms, now) {
            Some(Output::Fetch(req)) => self.pending_fetch = Some(req),
            Some(Output::Render(render)) => self.apply_render(render, now),
            None => {
                if self.seq.phase() == Phase::Displaying && now != self.shown_time {
                    self.refresh_header(now_ms);
                }
            }
        }
    }

    /// Report a feed delivery from the gateway
    pub fn feed_delivered(
        &mut self,
        category: Category,
        generation: u16,
        articles: Option<ArticleSet>,
        now_ms: u32,
    ) {
        let now = self.clock.now(now_ms);
        if let Some(render) = self.seq.feed_delivered(category, generation, articles, now) {
            self.apply_render(render, now);
        }
    }

    /// Re-synchronise the wall clock from a gateway broadcast
    pub fn time_sync(&mut self, time: TimeOfDay, now_ms: u32) {
        self.clock.sync(time, now_ms);
        self.refresh_header(now_ms);
    }

    /// Copy a finished render into the screen buffer
    fn apply_render(&mut self, render: RenderRequest, now: TimeOfDay) {
        self.screen.clear();
        self.screen.set_line(0, render.header.as_str());
        for (i, row) in render.grid.rows.iter().enumerate() {
            self.screen.set_line(i + 1, row.as_str());
        }
        for cell in render.grid.colors.iter() {
            self.screen.set_color(cell.row + 1, cell.col, cell.color);
        }
        self.title = render.title;
        self.shown_time = now;
    }

    /// Redraw the header row alone: clock tick or keypad entry change
    fn refresh_header(&mut self, now_ms: u32) {
        if self.seq.phase() != Phase::Displaying {
            return;
        }
        let now = self.clock.now(now_ms);
        let entry = self.pad.entry_display();
        let header = if entry.is_empty() {
            format_header(self.title.as_str(), self.seq.page(), now)
        } else {
            format_header_token(self.title.as_str(), entry.as_str(), now)
        };
        self.screen.set_line(0, header.as_str());
        self.shown_time = now;
    }

    /// The power-on splash shown through the boot hold
    fn render_boot(&mut self) {
        self.screen.clear();
        self.screen.set_line(9, "               ANTIOPE");
        self.screen.set_line(11, "           TELETEXT SERVICE");
        self.screen.set_line(14, "             STARTING ...");
        self.screen.set_color(9, 0, antiope_core::palette::Color::Yellow);
        self.screen.set_color(14, 0, antiope_core::palette::Color::Cyan);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_registry;
    use antiope_core::sequencer::{BOOT_HOLD_MS, CLEAR_HOLD_MS};

    fn terminal() -> Terminal {
        let config = parse_registry(include_str!("../pages.toml")).unwrap();
        Terminal::new(config)
    }

    /// Step the terminal through time in tick-task sized steps
    fn run(terminal: &mut Terminal, from_ms: u32, to_ms: u32) {
        let mut now = from_ms;
        while now < to_ms {
            now += 50;
            terminal.tick(now);
        }
    }

    #[test]
    fn test_boot_to_home_page() {
        let mut terminal = terminal();
        assert_eq!(terminal.phase(), Phase::Booting);
        assert!(terminal.screen().line(9).contains("ANTIOPE"));

        run(&mut terminal, 0, BOOT_HOLD_MS + CLEAR_HOLD_MS);
        assert_eq!(terminal.phase(), Phase::Displaying);
        assert_eq!(terminal.page(), 100);
        assert!(terminal.screen().line(0).contains("P100"));
        assert!(terminal.screen().line(2).contains("WELCOME"));
    }

    #[test]
    fn test_keyed_navigation_to_unknown_page() {
        let mut terminal = terminal();
        run(&mut terminal, 0, 2_000);

        let mut now = 2_000;
        for key in [KeyCode::Digit(9), KeyCode::Digit(9)] {
            assert!(terminal.handle_key(key, now).is_none());
            now += 50;
        }
        // Partial entry is visible in the header
        assert!(terminal.screen().line(0).contains("99."));

        let change = terminal.handle_key(KeyCode::Digit(9), now).unwrap();
        assert_eq!(change.page, 999);

        run(&mut terminal, now, now + 500);
        assert_eq!(terminal.phase(), Phase::Displaying);
        let not_found = (0..24).any(|r| terminal.screen().line(r).contains("NOT FOUND"));
        assert!(not_found);
    }

    #[test]
    fn test_index_key_jumps_home() {
        let mut terminal = terminal();
        run(&mut terminal, 0, 2_000);

        let mut now = 2_000;
        for key in [KeyCode::Digit(1), KeyCode::Digit(0), KeyCode::Digit(1)] {
            terminal.handle_key(key, now);
            now += 50;
        }
        run(&mut terminal, now, now + 500);
        assert_eq!(terminal.page(), 101);

        let change = terminal.handle_key(KeyCode::Index, now + 500).unwrap();
        assert_eq!(change.page, 100);
        run(&mut terminal, now + 500, now + 1_000);
        assert_eq!(terminal.page(), 100);
    }

    #[test]
    fn test_feed_page_fetch_and_delivery() {
        let mut terminal = terminal();
        run(&mut terminal, 0, 2_000);

        let mut now = 2_000;
        for key in [KeyCode::Digit(2), KeyCode::Digit(0), KeyCode::Digit(0)] {
            terminal.handle_key(key, now);
            now += 50;
        }
        let fetch = terminal.take_fetch().expect("cold cache needs a fetch");
        assert_eq!(fetch.category, Category::News);

        run(&mut terminal, now, now + 150);
        let mut articles = ArticleSet::new();
        let _ = articles.push(antiope_core::cache::Article::new("HEADLINE ONE"));
        terminal.feed_delivered(Category::News, fetch.generation, Some(articles), now + 200);

        assert_eq!(terminal.phase(), Phase::Displaying);
        assert!(terminal.screen().line(2).contains("HEADLINE ONE"));
    }

    #[test]
    fn test_time_sync_updates_header() {
        let mut terminal = terminal();
        run(&mut terminal, 0, 2_000);

        terminal.time_sync(TimeOfDay::new(15, 45, 0), 2_000);
        assert!(terminal.screen().line(0).ends_with("15:45:00"));
    }
}
