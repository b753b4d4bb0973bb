//! Spin command implementation.
//!
//! This module implements `dinewheel spin`, either on the full wheel screen
//! or headless, printing the result to the terminal.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use crate::cli::output::ConsolePresenter;
use crate::config::{ConfigError, WheelConfig};
use crate::dataset::RestaurantDataset;
use crate::gate::{local_now, EligibilityGate, JsonFileStore, SpinRecordStore, TimeWindow};
use crate::presenter::Presenter;
use crate::session::{SessionOptions, SpinError, SpinSession};
use crate::tui::{self, TuiApp};
use crate::wheel::{AnimationEvent, SpinOutcome};

/// Result type for spin command operations.
pub type SpinCommandResult = Result<(), SpinCommandError>;

/// Error type for spin command operations.
#[derive(Debug, thiserror::Error)]
pub enum SpinCommandError {
    /// The config file could not be loaded.
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),

    /// The spin was refused.
    #[error("{0}")]
    SpinError(#[from] SpinError),

    /// The terminal could not be set up or drawn.
    #[error("Terminal error: {0}")]
    TerminalError(#[from] io::Error),

    /// The spin ended without landing, e.g. it was cancelled.
    #[error("The spin did not finish")]
    Unfinished,
}

/// How `dinewheel spin` should run.
#[derive(Debug, Clone, Default)]
pub struct SpinOptions {
    /// Print the result instead of opening the wheel screen.
    pub headless: bool,
    /// Fixed seed for a reproducible spin.
    pub seed: Option<u64>,
    /// After a headless spin, open the winner on a map.
    pub map: bool,
    /// After a headless spin, copy the share text to the clipboard.
    pub share: bool,
}

/// Execute the spin command.
pub fn spin(options: &SpinOptions) -> SpinCommandResult {
    let config = WheelConfig::load(None)?;
    let (dataset, load_error) = RestaurantDataset::load_or_empty(&config.dataset);
    if let Some(e) = load_error {
        eprintln!("\x1b[33mWarning:\x1b[0m {e}");
    }

    let now = local_now();
    let gate = EligibilityGate::open(
        TimeWindow::from(&config.window),
        JsonFileStore::default(),
        now,
    );
    let session_options = SessionOptions::from_config(&config, options.seed);
    let frame_interval = config.animation.frame_interval();

    if options.headless {
        let presenter = ConsolePresenter::new(true);
        let mut session =
            SpinSession::new(dataset.restaurants, gate, presenter, session_options, now);
        spin_to_completion(&mut session, frame_interval)?;
        if options.map {
            session.open_winner_map();
        }
        if options.share {
            session.share_winner();
        }
        Ok(())
    } else {
        let (presenter, rx) = tui::channel();
        let session = SpinSession::new(dataset.restaurants, gate, presenter, session_options, now);
        let mut app = TuiApp::new(session, rx, frame_interval)?;
        app.run()?;
        Ok(())
    }
}

/// Request a spin and drive it frame by frame until it lands.
pub fn spin_to_completion<S: SpinRecordStore, P: Presenter>(
    session: &mut SpinSession<S, P>,
    frame_interval: Duration,
) -> Result<SpinOutcome, SpinCommandError> {
    session.request_spin(local_now())?;
    println!("\x1b[2mSpinning...\x1b[0m");

    let mut last_frame = Instant::now();
    loop {
        thread::sleep(frame_interval);
        let dt = last_frame.elapsed();
        last_frame = Instant::now();
        match session.tick(local_now(), dt) {
            AnimationEvent::Completed { outcome, .. } => return Ok(outcome),
            AnimationEvent::Frame { .. } => {}
            AnimationEvent::Idle { .. } => return Err(SpinCommandError::Unfinished),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::MemoryStore;
    use crate::presenter::RecordingPresenter;

    fn session(store: MemoryStore) -> SpinSession<MemoryStore, RecordingPresenter> {
        let dataset = RestaurantDataset::bundled().unwrap();
        let now = local_now();
        let gate = EligibilityGate::open(TimeWindow::new(0, 24), store, now);
        let options = SessionOptions {
            spin_duration: Duration::from_millis(30),
            seed: Some(5),
            ..SessionOptions::default()
        };
        SpinSession::new(
            dataset.restaurants,
            gate,
            RecordingPresenter::new(),
            options,
            now,
        )
    }

    #[test]
    fn test_spin_to_completion_lands_on_winner() {
        let mut session = session(MemoryStore::default());
        let outcome = spin_to_completion(&mut session, Duration::from_millis(2)).unwrap();

        let winner = session.winner().unwrap();
        assert_eq!(winner.name, outcome.selected_item.label);
        assert_eq!(session.presenter().winners(), vec![winner.name.as_str()]);
        assert!(session.lock_state().is_locked());
    }

    #[test]
    fn test_spin_to_completion_refuses_second_spin() {
        let mut session = session(MemoryStore::default());
        spin_to_completion(&mut session, Duration::from_millis(2)).unwrap();

        let err = spin_to_completion(&mut session, Duration::from_millis(2)).unwrap_err();
        assert!(matches!(
            err,
            SpinCommandError::SpinError(SpinError::Locked(_))
        ));
    }

    #[test]
    fn test_spin_error_display_passes_through() {
        let err = SpinCommandError::from(SpinError::InvalidState(
            crate::wheel::InvalidState::EmptyWheel,
        ));
        assert_eq!(
            err.to_string(),
            crate::wheel::InvalidState::EmptyWheel.to_string()
        );
    }
}
