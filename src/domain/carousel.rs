// Carousel controller - auto-advancing window over the asset type cards
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselSettings {
    pub visible: usize,
    pub advance_every: Duration,
    pub resume_after: Duration,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            visible: 3,
            advance_every: Duration::from_millis(5_000),
            resume_after: Duration::from_millis(10_000),
        }
    }
}

/// Plain view of the controller for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct CarouselSnapshot {
    pub current_index: usize,
    pub max_index: usize,
    pub is_auto_playing: bool,
}

/// Offset into a fixed-size window over `len` cards.
///
/// Time never flows inside the controller: callers pass `now` and a driver
/// sleeps until [`CarouselController::next_deadline`], then calls
/// [`CarouselController::fire_due`]. At most one advance tick and one
/// idle-resume deadline are armed at any moment.
#[derive(Debug, Clone)]
pub struct CarouselController {
    settings: CarouselSettings,
    len: usize,
    current_index: usize,
    is_auto_playing: bool,
    next_advance: Option<Instant>,
    resume_at: Option<Instant>,
}

impl CarouselController {
    pub fn new(settings: CarouselSettings) -> Self {
        Self {
            settings,
            len: 0,
            current_index: 0,
            is_auto_playing: true,
            next_advance: None,
            resume_at: None,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_auto_playing(&self) -> bool {
        self.is_auto_playing
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn max_index(&self) -> usize {
        self.len.saturating_sub(self.settings.visible)
    }

    /// Replaces the card count. When it changes, the advance timer is torn
    /// down and, while autoplaying over more cards than fit, re-armed from
    /// `now`. An unchanged count keeps the running cadence.
    pub fn set_len(&mut self, len: usize, now: Instant) {
        if len == self.len {
            return;
        }
        self.len = len;
        self.current_index = self.current_index.min(self.max_index());
        self.next_advance = None;
        self.arm_advance(now);
    }

    pub fn advance(&mut self, now: Instant) {
        self.step_forward();
        self.pause(now);
    }

    pub fn retreat(&mut self, now: Instant) {
        if self.current_index == 0 {
            self.current_index = self.max_index();
        } else {
            self.current_index -= 1;
        }
        self.pause(now);
    }

    pub fn go_to(&mut self, index: usize, now: Instant) {
        self.current_index = index.min(self.max_index());
        self.pause(now);
    }

    /// Stops autoplay and (re)arms the idle-resume deadline. Repeated calls
    /// push the deadline out rather than stacking.
    pub fn pause(&mut self, now: Instant) {
        self.is_auto_playing = false;
        self.next_advance = None;
        self.resume_at = Some(now + self.settings.resume_after);
    }

    /// Earliest instant at which `fire_due` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.next_advance, self.resume_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Applies every deadline that has passed by `now`. Returns true when
    /// the visible state changed.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let Some(resume_at) = self.resume_at {
            if resume_at <= now {
                self.resume_at = None;
                self.is_auto_playing = true;
                self.arm_advance(resume_at);
                changed = true;
            }
        }

        while let Some(due) = self.next_advance {
            if due > now {
                break;
            }
            self.step_forward();
            self.next_advance = Some(due + self.settings.advance_every);
            changed = true;
        }

        changed
    }

    /// Indices of the cards currently in view.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let end = (self.current_index + self.settings.visible).min(self.len);
        self.current_index.min(end)..end
    }

    pub fn visible_window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.visible_range();
        let end = range.end.min(items.len());
        &items[range.start.min(end)..end]
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            current_index: self.current_index(),
            max_index: self.max_index(),
            is_auto_playing: self.is_auto_playing(),
        }
    }

    fn step_forward(&mut self) {
        if self.current_index >= self.max_index() {
            self.current_index = 0;
        } else {
            self.current_index += 1;
        }
    }

    fn arm_advance(&mut self, from: Instant) {
        if self.is_auto_playing && self.len > self.settings.visible {
            self.next_advance = Some(from + self.settings.advance_every);
        }
    }
}
