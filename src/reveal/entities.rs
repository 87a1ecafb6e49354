use std::time::Duration;

use bevy::prelude::*;

/// Progressive, cancellable reveal of one description string.
///
/// Produces the visible-length sequence `0, 1, …, total`, advancing at most
/// one character per tick once `cadence` of real time has passed since the
/// previous step. Cancelling is dropping the task.
#[derive(Clone, Debug)]
pub struct RevealTask {
    text: String,
    total: usize,
    revealed: usize,
    cadence: Duration,
    last_advance: Duration,
    running: bool,
}

impl RevealTask {
    /// Starts a reveal of `text` at real time `now`, with zero characters shown.
    pub fn new(text: impl Into<String>, cadence: Duration, now: Duration) -> Self {
        let text = text.into();
        let total = text.chars().count();
        Self {
            text,
            total,
            revealed: 0,
            cadence,
            last_advance: now,
            running: total > 0,
        }
    }

    /// Advances by one character if a full cadence has elapsed.
    ///
    /// Returns the new visible length when it changed.
    pub fn advance(&mut self, now: Duration) -> Option<usize> {
        if !self.running || now.saturating_sub(self.last_advance) < self.cadence {
            return None;
        }
        self.revealed += 1;
        self.last_advance = now;
        if self.revealed >= self.total {
            self.running = false;
        }
        Some(self.revealed)
    }

    /// Full text being revealed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters currently visible.
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// `false` once the last character is visible.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The revealed prefix of the text.
    pub fn visible_text(&self) -> &str {
        match self.text.char_indices().nth(self.revealed) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }
}

/// The info panel and the single reveal task allowed to write into it.
#[derive(Resource, Default, Debug)]
pub struct InfoPanel {
    shown: bool,
    title: String,
    reveal: Option<RevealTask>,
}

impl InfoPanel {
    /// Makes the panel visible under `title`.
    pub fn show(&mut self, title: &str) {
        self.shown = true;
        self.title = title.to_owned();
    }

    /// Replaces any running reveal with a new one over `text`.
    pub fn start_reveal(&mut self, text: &str, cadence: Duration, now: Duration) {
        if self.reveal.as_ref().is_some_and(RevealTask::is_running) {
            debug!("cancelling unfinished reveal");
        }
        self.reveal = Some(RevealTask::new(text, cadence, now));
    }

    /// Hides the panel and clears its text, abandoning any reveal.
    pub fn close(&mut self) {
        self.shown = false;
        self.title.clear();
        self.reveal = None;
    }

    /// Steps the current reveal, if any.
    pub fn advance(&mut self, now: Duration) -> Option<usize> {
        self.reveal.as_mut().and_then(|task| task.advance(now))
    }

    /// Whether the panel should be drawn.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Heading shown above the text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether a reveal is still typing.
    pub fn is_revealing(&self) -> bool {
        self.reveal.as_ref().is_some_and(RevealTask::is_running)
    }

    /// Current reveal task.
    pub fn reveal(&self) -> Option<&RevealTask> {
        self.reveal.as_ref()
    }

    /// Text to display right now.
    pub fn visible_text(&self) -> &str {
        self.reveal.as_ref().map_or("", RevealTask::visible_text)
    }
}
