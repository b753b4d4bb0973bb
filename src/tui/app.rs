//! TUI application state and event handling.

use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, warn};

use super::ui;
use crate::cli::output;
use crate::dataset::Restaurant;
use crate::gate::{local_now, LockState, SpinRecordStore};
use crate::presenter::Presenter;
use crate::session::SpinSession;
use crate::wheel::{geometry, WheelItem};

/// Events sent from the session to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    /// Labels of the wheel segments, in wheel order.
    Wheel(Vec<String>),
    /// A spin landed on this restaurant.
    Winner(Restaurant),
    /// Spinning is locked.
    Locked {
        /// Why, and until when.
        state: LockState,
        /// Seconds left on the countdown.
        remaining_secs: u64,
    },
    /// Spinning is allowed.
    Unlocked,
    /// Discount code for the winner.
    DiscountCode(String),
    /// Open a map at this location.
    OpenMap {
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
        /// Place name.
        name: String,
    },
    /// Share this text.
    Share(String),
}

/// Presenter that forwards everything to the TUI event channel.
#[derive(Debug, Clone)]
pub struct ChannelPresenter {
    tx: Sender<TuiEvent>,
}

impl ChannelPresenter {
    /// Wrap an existing sender.
    pub fn new(tx: Sender<TuiEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: TuiEvent) {
        // The receiver only goes away when the TUI is shutting down
        let _ = self.tx.send(event);
    }
}

/// Create a presenter and the receiver the TUI reads from.
pub fn channel() -> (ChannelPresenter, Receiver<TuiEvent>) {
    let (tx, rx) = mpsc::channel();
    (ChannelPresenter::new(tx), rx)
}

impl Presenter for ChannelPresenter {
    fn display_wheel(&mut self, items: &[WheelItem]) {
        self.send(TuiEvent::Wheel(
            items.iter().map(|i| i.label.clone()).collect(),
        ));
    }

    fn display_winner(&mut self, restaurant: &Restaurant) {
        self.send(TuiEvent::Winner(restaurant.clone()));
    }

    fn display_spin_locked(&mut self, state: &LockState, remaining_secs: u64) {
        self.send(TuiEvent::Locked {
            state: *state,
            remaining_secs,
        });
    }

    fn display_unlocked(&mut self) {
        self.send(TuiEvent::Unlocked);
    }

    fn display_discount_code(&mut self, code: &str) {
        self.send(TuiEvent::DiscountCode(code.to_string()));
    }

    fn open_external_map(&mut self, latitude: f64, longitude: f64, name: &str) {
        self.send(TuiEvent::OpenMap {
            latitude,
            longitude,
            name: name.to_string(),
        });
    }

    fn share_text(&mut self, text: &str) {
        self.send(TuiEvent::Share(text.to_string()));
    }
}

/// TUI application state (separate from terminal for borrowing).
#[derive(Debug, Clone, Default)]
pub struct TuiState {
    /// Segment labels in wheel order.
    pub labels: Vec<String>,
    /// Wheel orientation in radians.
    pub orientation: f64,
    /// Whether a spin is animating.
    pub spinning: bool,
    /// Lock state and seconds left, when locked.
    pub lock: Option<(LockState, u64)>,
    /// Spin window as text, e.g. "00:00-10:00".
    pub window: String,
    /// Last winner.
    pub winner: Option<Restaurant>,
    /// Code drawn for the last winner.
    pub discount_code: Option<String>,
    /// One-line message for the footer.
    pub notice: Option<String>,
    /// Spinner frame index.
    pub spinner_frame: usize,
    /// Whether the winner popup is open.
    pub show_winner: bool,
}

impl TuiState {
    /// Fold a session event into the state.
    ///
    /// Side-effect events (map, share, quit) leave the state untouched.
    pub fn apply(&mut self, event: &TuiEvent) {
        match event {
            TuiEvent::Wheel(labels) => self.labels = labels.clone(),
            TuiEvent::Winner(restaurant) => {
                self.winner = Some(restaurant.clone());
                self.discount_code = None;
                self.show_winner = true;
            }
            TuiEvent::Locked {
                state,
                remaining_secs,
            } => self.lock = Some((*state, *remaining_secs)),
            TuiEvent::Unlocked => self.lock = None,
            TuiEvent::DiscountCode(code) => self.discount_code = Some(code.clone()),
            TuiEvent::OpenMap { .. } | TuiEvent::Share(_) => {}
        }
    }

    /// Segment currently under the pointer.
    pub fn pointer_index(&self) -> Option<usize> {
        geometry::index_under_pointer(self.orientation, self.labels.len())
    }

    /// Whether spinning is locked.
    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }
}

/// TUI application.
pub struct TuiApp<S: SpinRecordStore> {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Event receiver fed by the session's presenter.
    rx: Receiver<TuiEvent>,
    /// The wheel session being shown.
    session: SpinSession<S, ChannelPresenter>,
    /// Application state.
    state: TuiState,
    /// Time between animation frames.
    frame_interval: Duration,
    /// Set once the user asks to leave.
    quit: bool,
}

impl<S: SpinRecordStore> TuiApp<S> {
    /// Take over the terminal to show `session`.
    ///
    /// `rx` must be the receiver paired with the session's presenter.
    pub fn new(
        session: SpinSession<S, ChannelPresenter>,
        rx: Receiver<TuiEvent>,
        frame_interval: Duration,
    ) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let state = TuiState {
            window: session.gate().window().to_string(),
            orientation: session.orientation(),
            ..TuiState::default()
        };

        Ok(Self {
            terminal,
            rx,
            session,
            state,
            frame_interval,
            quit: false,
        })
    }

    /// Run the TUI event loop until the user quits.
    pub fn run(&mut self) -> io::Result<()> {
        let mut last_frame = Instant::now();
        let mut last_second = Instant::now();
        let one_second = Duration::from_secs(1);

        loop {
            self.drain_events();
            self.state.orientation = self.session.orientation();
            self.state.spinning = self.session.is_spinning();

            let state = &self.state;
            self.terminal.draw(|f| ui::draw(f, state))?;

            let timeout = self.frame_interval.saturating_sub(last_frame.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            let dt = last_frame.elapsed();
            if dt >= self.frame_interval {
                last_frame = Instant::now();
                self.session.tick(local_now(), dt);
                if self.state.spinning {
                    self.state.spinner_frame = self.state.spinner_frame.wrapping_add(1);
                }
            }

            if last_second.elapsed() >= one_second {
                last_second = Instant::now();
                self.session.tick_second(local_now());
            }

            if self.quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Esc => {
                if self.state.show_winner {
                    self.state.show_winner = false;
                } else {
                    self.quit = true;
                }
            }
            KeyCode::Enter if self.state.show_winner => self.state.show_winner = false,
            KeyCode::Char(' ') | KeyCode::Enter => self.spin(),
            KeyCode::Char('m') => {
                if !self.session.open_winner_map() {
                    self.state.notice = Some("Spin the wheel first".to_string());
                }
            }
            KeyCode::Char('s') => {
                if !self.session.share_winner() {
                    self.state.notice = Some("Spin the wheel first".to_string());
                }
            }
            KeyCode::Char('R') => {
                self.state.notice = Some(match self.session.reset() {
                    Ok(()) => "Spin record cleared".to_string(),
                    Err(e) => format!("Unlocked, but {e}"),
                });
                self.state.show_winner = false;
            }
            _ => {}
        }
    }

    fn spin(&mut self) {
        self.state.show_winner = false;
        match self.session.request_spin(local_now()) {
            Ok(handle) => {
                debug!(handle = handle.id(), "Spin requested from TUI");
                self.state.notice = None;
            }
            Err(e) => self.state.notice = Some(e.to_string()),
        }
    }

    /// Process TUI events (non-blocking).
    fn drain_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: TuiEvent) {
        match &event {
            TuiEvent::OpenMap {
                latitude,
                longitude,
                name,
            } => {
                self.state.notice = Some(match output::open_map(*latitude, *longitude) {
                    Ok(()) => format!("Opened {name} on the map"),
                    Err(e) => {
                        warn!(error = %e, "Could not open map");
                        e.to_string()
                    }
                });
            }
            TuiEvent::Share(text) => {
                self.state.notice = Some(match output::set_clipboard(text) {
                    Ok(()) => "Share text copied to clipboard".to_string(),
                    Err(e) => {
                        warn!(error = %e, "Could not share");
                        e.to_string()
                    }
                });
            }
            _ => {}
        }
        self.state.apply(&event);
    }

    /// Clean up and restore terminal.
    pub fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl<S: SpinRecordStore> Drop for TuiApp<S> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn restaurant() -> Restaurant {
        Restaurant {
            id: 3,
            name: "Taqueria".into(),
            discount: "2 for 1".into(),
            address: "5 Elm".into(),
            latitude: 1.0,
            longitude: 2.0,
            cuisine: "Mexican".into(),
            rating: 4.0,
            open_until: "23:00".into(),
        }
    }

    #[test]
    fn test_channel_presenter_forwards_calls() {
        let (mut presenter, rx) = channel();
        presenter.display_wheel(&crate::wheel::items_from_labels(["A", "B"]));
        presenter.display_discount_code("SPIN10");
        presenter.share_text("hello");

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                TuiEvent::Wheel(vec!["A".into(), "B".into()]),
                TuiEvent::DiscountCode("SPIN10".into()),
                TuiEvent::Share("hello".into()),
            ]
        );
    }

    #[test]
    fn test_channel_presenter_survives_closed_receiver() {
        let (mut presenter, rx) = channel();
        drop(rx);
        presenter.display_unlocked();
    }

    #[test]
    fn test_state_tracks_winner_and_code() {
        let mut state = TuiState::default();
        state.apply(&TuiEvent::Winner(restaurant()));
        state.apply(&TuiEvent::DiscountCode("LUCKY15".into()));

        assert!(state.show_winner);
        assert_eq!(state.winner.as_ref().map(|r| r.id), Some(3));
        assert_eq!(state.discount_code.as_deref(), Some("LUCKY15"));

        // A new winner clears the previous code until its own arrives
        state.apply(&TuiEvent::Winner(restaurant()));
        assert_eq!(state.discount_code, None);
    }

    #[test]
    fn test_state_tracks_lock() {
        let until = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut state = TuiState::default();
        state.apply(&TuiEvent::Locked {
            state: LockState::LockedAlreadySpun { until },
            remaining_secs: 90,
        });
        assert!(state.is_locked());
        assert_eq!(state.lock.map(|(_, secs)| secs), Some(90));

        state.apply(&TuiEvent::Unlocked);
        assert!(!state.is_locked());
    }

    #[test]
    fn test_pointer_index_follows_orientation() {
        let mut state = TuiState::default();
        assert_eq!(state.pointer_index(), None);

        state.apply(&TuiEvent::Wheel(vec!["A".into(), "B".into(), "C".into(), "D".into()]));
        state.orientation = geometry::resting_rotation(2, 4, 0.0);
        assert_eq!(state.pointer_index(), Some(2));
    }
}
