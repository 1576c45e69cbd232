//! Screenshot carousel controller.
//!
//! A headless, deterministic model of the looping screenshot slider embedded
//! in every app page. The browser runtime (`static/carousel.js`) performs the
//! same transitions against the DOM; this module owns the rules and is what
//! the generator uses to lay out frames and indicators.
//!
//! # Display Ring
//!
//! For seamless looping the viewport scrolls over a padded copy of the list:
//!
//! ```text
//! images = [A, B, C]
//! ring   = [C, A, B, C, A]
//!           ^           ^
//!           |           appended first (padding)
//!           prepended last (padding)
//! ```
//!
//! When the viewport snaps onto a padding frame, the controller reports the
//! real index straight away and, after a short settle delay, jumps the
//! viewport (no animation) to the real frame showing the same image. Lists
//! of zero or one image are never padded.
//!
//! # Playback
//!
//! ```text
//!             scroll_to_index            quiet period elapses
//! Autoplaying ───────────────▶ Paused ─────────────────────▶ Autoplaying
//!      │                         ▲
//!      │ click_frame             │ close_modal
//!      ▼                         │
//!    Modal ──────────────────────┘
//! ```
//!
//! Lists of zero or one image stay [`Playback::Static`] for their whole
//! life: nothing ever advances on its own.
//!
//! # Time and Resources
//!
//! The host supplies time as a [`Duration`] since mount and calls
//! [`Carousel::advance`] to fire due timers. Timers (autoplay interval,
//! resume timeout, settle timeout) and listeners (scroll, keyboard) are
//! acquired only while their governing state needs them and released when
//! that state changes or on [`Carousel::teardown`]. Viewport movement is
//! emitted as [`ScrollCommand`]s drained with [`Carousel::take_commands`].

use crate::config::CarouselConfig;
use std::time::Duration;

/// Timer settings for one carousel instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Time between autoplay advances.
    pub autoplay_interval: Duration,
    /// Delay after manual interaction before autoplay resumes.
    pub quiet_period: Duration,
    /// Debounce before the instant boundary correction on padding frames.
    pub settle_delay: Duration,
}

impl Timings {
    /// Build timings, raising zero durations to one millisecond so interval
    /// timers always make progress.
    pub fn new(autoplay_interval: Duration, quiet_period: Duration, settle_delay: Duration) -> Self {
        let floor = Duration::from_millis(1);
        Self {
            autoplay_interval: autoplay_interval.max(floor),
            quiet_period: quiet_period.max(floor),
            settle_delay: settle_delay.max(floor),
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(5000),
            Duration::from_millis(3000),
            Duration::from_millis(50),
        )
    }
}

impl From<&CarouselConfig> for Timings {
    fn from(config: &CarouselConfig) -> Self {
        Self::new(
            Duration::from_millis(config.autoplay_interval_ms),
            Duration::from_millis(config.quiet_period_ms),
            Duration::from_millis(config.settle_delay_ms),
        )
    }
}

/// Build the display ring: `[last, ...images, first]` for more than one
/// image, otherwise the list unchanged.
pub fn display_ring<T: Clone>(images: &[T]) -> Vec<T> {
    match images {
        [first, .., last] => {
            let mut ring = Vec::with_capacity(images.len() + 2);
            ring.push(last.clone());
            ring.extend_from_slice(images);
            ring.push(first.clone());
            ring
        }
        _ => images.to_vec(),
    }
}

/// Autoplay state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Zero or one image: nothing to advance.
    Static,
    /// The interval timer advances the current image.
    Autoplaying,
    /// Manual navigation happened; autoplay resumes at `resume_at`.
    Paused { resume_at: Duration },
    /// The overlay viewer is open; autoplay is suspended.
    Modal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// A request for the host to move the viewport to a ring frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollCommand {
    pub frame: usize,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Settle,
    Resume,
    Autoplay,
}

/// Which event listeners are currently attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Listeners {
    pub scroll: bool,
    pub keyboard: bool,
}

/// Keys the overlay reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowRight" => Key::ArrowRight,
            "ArrowLeft" => Key::ArrowLeft,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// Click targets inside the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTarget {
    Backdrop,
    Image,
    CloseButton,
    PrevButton,
    NextButton,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    pub index: usize,
    pub active: bool,
}

/// What the overlay shows while open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView<'a> {
    pub index: usize,
    pub image: &'a str,
    /// `"2 / 5"` style counter.
    pub counter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingCorrection {
    due: Duration,
    frame: usize,
}

#[derive(Debug, Default)]
struct Timers {
    autoplay: Option<Duration>,
    resume: Option<Duration>,
    settle: Option<PendingCorrection>,
    created: usize,
}

impl Timers {
    fn arm_autoplay(&mut self, due: Duration) {
        self.autoplay = Some(due);
        self.created += 1;
    }

    fn arm_resume(&mut self, due: Duration) {
        self.resume = Some(due);
        self.created += 1;
    }

    fn arm_settle(&mut self, correction: PendingCorrection) {
        self.settle = Some(correction);
        self.created += 1;
    }

    fn clear(&mut self) {
        self.autoplay = None;
        self.resume = None;
        self.settle = None;
    }

    /// Earliest due timer at or before `now`. Ties fire settle, resume,
    /// then autoplay.
    fn next_due(&self, now: Duration) -> Option<(TimerKind, Duration)> {
        [
            self.settle.map(|c| (TimerKind::Settle, c.due)),
            self.resume.map(|d| (TimerKind::Resume, d)),
            self.autoplay.map(|d| (TimerKind::Autoplay, d)),
        ]
        .into_iter()
        .flatten()
        .filter(|(_, due)| *due <= now)
        .min_by_key(|(_, due)| *due)
    }
}

/// The carousel controller for one image list.
#[derive(Debug)]
pub struct Carousel {
    images: Vec<String>,
    timings: Timings,
    current: usize,
    modal: Option<usize>,
    playback: Playback,
    timers: Timers,
    listeners: Listeners,
    commands: Vec<ScrollCommand>,
    mounted: bool,
}

impl Carousel {
    /// Mount a carousel at time zero.
    ///
    /// A padded ring starts with the viewport on the first real frame, and
    /// autoplay is armed when there is more than one image.
    pub fn new(images: Vec<String>, timings: Timings) -> Self {
        let mut carousel = Self {
            images,
            timings,
            current: 0,
            modal: None,
            playback: Playback::Static,
            timers: Timers::default(),
            listeners: Listeners::default(),
            commands: Vec::new(),
            mounted: true,
        };
        if !carousel.images.is_empty() {
            carousel.listeners.scroll = true;
        }
        if carousel.is_padded() {
            carousel.commands.push(ScrollCommand {
                frame: 1,
                behavior: ScrollBehavior::Instant,
            });
            carousel.start_autoplay(Duration::ZERO);
        }
        carousel
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// Whether the ring carries padding frames (more than one image).
    pub fn is_padded(&self) -> bool {
        self.images.len() > 1
    }

    pub fn ring(&self) -> Vec<&str> {
        let refs: Vec<&str> = self.images.iter().map(String::as_str).collect();
        display_ring(&refs)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn is_autoplaying(&self) -> bool {
        self.playback == Playback::Autoplaying
    }

    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Number of timers ever armed by this instance.
    pub fn timers_created(&self) -> usize {
        self.timers.created
    }

    /// Timers currently pending, in firing-priority order.
    pub fn active_timers(&self) -> Vec<TimerKind> {
        let mut active = Vec::new();
        if self.timers.settle.is_some() {
            active.push(TimerKind::Settle);
        }
        if self.timers.resume.is_some() {
            active.push(TimerKind::Resume);
        }
        if self.timers.autoplay.is_some() {
            active.push(TimerKind::Autoplay);
        }
        active
    }

    /// One marker per real image; the current one is active.
    pub fn indicators(&self) -> Vec<Indicator> {
        (0..self.images.len())
            .map(|index| Indicator {
                index,
                active: index == self.current,
            })
            .collect()
    }

    pub fn modal(&self) -> Option<ModalView<'_>> {
        let index = self.modal?;
        Some(ModalView {
            index,
            image: &self.images[index],
            counter: format!("{} / {}", index + 1, self.images.len()),
        })
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.is_some()
    }

    /// Drain the viewport movements requested since the last call.
    pub fn take_commands(&mut self) -> Vec<ScrollCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Ring frame that displays real index `index`.
    pub fn frame_of(&self, index: usize) -> usize {
        if self.is_padded() { index + 1 } else { index }
    }

    /// Real index displayed by ring frame `frame`, clamped into the list.
    pub fn index_of_frame(&self, frame: usize) -> Option<usize> {
        let len = self.images.len();
        if len == 0 {
            return None;
        }
        if !self.is_padded() {
            return Some(frame.min(len - 1));
        }
        Some(match frame {
            0 => len - 1,
            f if f > len => 0,
            f => f - 1,
        })
    }

    // ------------------------------------------------------------------
    // Scroll tracking
    // ------------------------------------------------------------------

    /// Handle a viewport scroll event.
    ///
    /// `offset` and `width` are the viewport's scroll offset and client
    /// width. A zero, negative or non-finite width means there is no usable
    /// viewport and the event is ignored.
    pub fn on_scroll(&mut self, offset: f64, width: f64, now: Duration) {
        if !self.mounted || !self.listeners.scroll {
            return;
        }
        if !(width.is_finite() && width > 0.0 && offset.is_finite()) {
            return;
        }
        let frame = (offset / width).round().max(0.0) as usize;
        let len = self.images.len();

        let index = if self.is_padded() && (frame == 0 || frame > len) {
            let index = if frame == 0 { len - 1 } else { 0 };
            let correction = PendingCorrection {
                due: now + self.timings.settle_delay,
                frame: self.frame_of(index),
            };
            self.timers.arm_settle(correction);
            index
        } else {
            match self.index_of_frame(frame) {
                Some(index) => index,
                None => return,
            }
        };

        if index != self.current {
            self.current = index;
            if self.playback == Playback::Autoplaying {
                self.timers.arm_autoplay(now + self.timings.autoplay_interval);
            }
        }
    }

    // ------------------------------------------------------------------
    // Manual navigation
    // ------------------------------------------------------------------

    /// Smoothly scroll to real index `index` (clamped) and pause autoplay
    /// for the quiet period.
    pub fn scroll_to_index(&mut self, index: usize, now: Duration) {
        if !self.mounted || self.images.is_empty() {
            return;
        }
        let index = index.min(self.images.len() - 1);
        self.commands.push(ScrollCommand {
            frame: self.frame_of(index),
            behavior: ScrollBehavior::Smooth,
        });
        self.current = index;
        if self.playback != Playback::Modal {
            self.pause(now);
        }
    }

    fn pause(&mut self, now: Duration) {
        self.timers.autoplay = None;
        if !self.is_padded() {
            self.playback = Playback::Static;
            self.timers.resume = None;
            return;
        }
        let resume_at = now + self.timings.quiet_period;
        self.timers.arm_resume(resume_at);
        self.playback = Playback::Paused { resume_at };
    }

    fn start_autoplay(&mut self, now: Duration) {
        self.timers.resume = None;
        self.playback = Playback::Autoplaying;
        self.timers.arm_autoplay(now + self.timings.autoplay_interval);
    }

    // ------------------------------------------------------------------
    // Overlay viewer
    // ------------------------------------------------------------------

    /// Open the overlay on the image shown by ring frame `frame`.
    pub fn click_frame(&mut self, frame: usize, _now: Duration) {
        if !self.mounted {
            return;
        }
        let Some(index) = self.index_of_frame(frame) else {
            return;
        };
        self.modal = Some(index);
        self.listeners.keyboard = true;
        self.timers.autoplay = None;
        self.timers.resume = None;
        self.playback = Playback::Modal;
    }

    pub fn modal_next(&mut self) {
        let len = self.images.len();
        if let Some(index) = self.modal.as_mut() {
            *index = (*index + 1) % len;
        }
    }

    pub fn modal_prev(&mut self) {
        let len = self.images.len();
        if let Some(index) = self.modal.as_mut() {
            *index = (*index + len - 1) % len;
        }
    }

    /// Dismiss the overlay; autoplay resumes after the quiet period.
    pub fn close_modal(&mut self, now: Duration) {
        if self.modal.take().is_none() {
            return;
        }
        self.listeners.keyboard = false;
        self.pause(now);
    }

    /// Keyboard shortcuts, active only while the overlay is open.
    pub fn on_key(&mut self, key: Key, now: Duration) {
        if !self.listeners.keyboard {
            return;
        }
        match key {
            Key::ArrowRight => self.modal_next(),
            Key::ArrowLeft => self.modal_prev(),
            Key::Escape => self.close_modal(now),
            Key::Other => {}
        }
    }

    pub fn click_overlay(&mut self, target: OverlayTarget, now: Duration) {
        match target {
            OverlayTarget::Backdrop | OverlayTarget::CloseButton => self.close_modal(now),
            OverlayTarget::PrevButton => self.modal_prev(),
            OverlayTarget::NextButton => self.modal_next(),
            OverlayTarget::Image => {}
        }
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    /// Fire every timer due at or before `now`, in deadline order.
    pub fn advance(&mut self, now: Duration) {
        if !self.mounted {
            return;
        }
        while let Some((kind, due)) = self.timers.next_due(now) {
            match kind {
                TimerKind::Settle => self.fire_settle(),
                TimerKind::Resume => self.start_autoplay(due),
                TimerKind::Autoplay => self.fire_autoplay(due),
            }
        }
    }

    fn fire_settle(&mut self) {
        let Some(correction) = self.timers.settle.take() else {
            return;
        };
        self.commands.push(ScrollCommand {
            frame: correction.frame,
            behavior: ScrollBehavior::Instant,
        });
        if let Some(index) = self.index_of_frame(correction.frame) {
            self.current = index;
        }
    }

    fn fire_autoplay(&mut self, due: Duration) {
        let next = (self.current + 1) % self.images.len();
        self.commands.push(ScrollCommand {
            frame: self.frame_of(next),
            behavior: ScrollBehavior::Smooth,
        });
        self.current = next;
        self.timers.arm_autoplay(due + self.timings.autoplay_interval);
    }

    /// Release every timer and listener. The controller ignores all later
    /// events.
    pub fn teardown(&mut self) {
        self.timers.clear();
        self.listeners = Listeners::default();
        self.modal = None;
        self.mounted = false;
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.teardown();
    }
}
