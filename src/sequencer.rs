//! Beat-synchronized show driver tying input, power, and timeline together.
//!
//! Provides [`BeatSequencer`], which owns the whole firmware context (strip,
//! button, power controller, timeline cursor) and advances it one cooperative,
//! non-blocking [`tick`](BeatSequencer::tick) at a time. Also defines the
//! [`LedStrip`] trait for hardware abstraction.

use crate::button::{ButtonInput, ButtonLevel, Debouncer};
use crate::power::{PowerController, SleepControl};
use crate::time::{Clock, Tempo};
use crate::timeline::{Cursor, Timeline};
use crate::types::Zoning;
use palette::Srgb;

/// Trait for abstracting the LED strip hardware.
///
/// Implement this for your strip driver (WS2812, APA102, ...). Color
/// components are in the range 0.0-1.0; convert to your device's native
/// format (typically 8-bit per channel) in the implementation. `show` flushes
/// buffered pixel writes to the hardware and may block briefly for the
/// transmission protocol; the sequencer calls it once per tick.
pub trait LedStrip {
    /// Buffers a color for the pixel at `index`.
    fn set_pixel(&mut self, index: usize, color: Srgb);

    /// Flushes buffered pixel writes to the hardware.
    fn show(&mut self);

    /// Buffers "off" for every pixel.
    fn clear(&mut self);
}

/// The run state of a [`BeatSequencer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// In (or headed for) low-power sleep, waiting on the wake interrupt.
    Asleep,
    /// Awake and animating the show.
    Running,
    /// Manually stopped; awake and dark, the next press enters sleep.
    Stopped,
}

/// Static configuration for a [`BeatSequencer`].
#[derive(Debug, Clone, Copy)]
pub struct SequencerConfig {
    /// Tempo the show's keyframe offsets are expressed in.
    pub tempo: Tempo,

    /// Number of pixels on the strip.
    pub pixel_count: usize,

    /// Pixel-group mapping for dual-zone shows.
    pub zoning: Zoning,

    /// Debounce window for the button, in milliseconds.
    pub debounce_window_ms: u64,
}

impl SequencerConfig {
    /// Creates a single-zone configuration with the default debounce window.
    pub fn new(tempo: Tempo, pixel_count: usize) -> Self {
        Self {
            tempo,
            pixel_count,
            zoning: Zoning::Single,
            debounce_window_ms: crate::button::DEBOUNCE_WINDOW_MS,
        }
    }

    /// Sets the pixel-group mapping.
    pub fn zoning(mut self, zoning: Zoning) -> Self {
        self.zoning = zoning;
        self
    }
}

/// Drives one button-activated LED show.
///
/// Owns the full firmware context: the strip, the button input and its
/// debouncer, the power controller, the timeline, and the animation cursor.
/// The wake interrupt handler updates this same context through
/// [`on_wake_interrupt`](BeatSequencer::on_wake_interrupt) rather than
/// through ambient globals.
///
/// A session runs wake-to-sleep: the wake interrupt resets the animation
/// clock and cursor, [`tick`](BeatSequencer::tick) renders the show until the
/// timeline completes (or the button stops it), and the sequencer then puts
/// the device back to sleep.
///
/// # Type Parameters
/// * `'t` - Lifetime of the clock reference
/// * `C` - Clock implementation type
/// * `S` - LED strip implementation type
/// * `B` - Button input implementation type
/// * `W` - Sleep control implementation type
/// * `N` - Maximum number of keyframes in the timeline
pub struct BeatSequencer<'t, C, S, B, W, const N: usize>
where
    C: Clock,
    S: LedStrip,
    B: ButtonInput,
    W: SleepControl,
{
    clock: &'t C,
    strip: S,
    input: B,
    power: PowerController<W>,
    button: Debouncer,
    timeline: Timeline<N>,
    cursor: Cursor,
    config: SequencerConfig,
    stopped: bool,
}

impl<'t, C, S, B, W, const N: usize> BeatSequencer<'t, C, S, B, W, N>
where
    C: Clock,
    S: LedStrip,
    B: ButtonInput,
    W: SleepControl,
{
    /// Creates a sequencer in the asleep state with the strip dark.
    pub fn new(
        mut strip: S,
        input: B,
        clock: &'t C,
        sleep: W,
        timeline: Timeline<N>,
        config: SequencerConfig,
    ) -> Self {
        strip.clear();
        strip.show();

        Self {
            clock,
            strip,
            input,
            power: PowerController::new(sleep),
            button: Debouncer::new(config.debounce_window_ms),
            timeline,
            cursor: Cursor::new(),
            config,
            stopped: false,
        }
    }

    /// Runs one pass of the render loop.
    ///
    /// Non-blocking (except for the strip write, and for
    /// [`SleepControl::enter_lowest_power_mode`] when a sleep transition is
    /// triggered). Call as fast as the strip write allows; all timing is
    /// wall-clock based, so the tick rate only affects animation smoothness.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        let raw = self.input.level();

        if let Some(level) = self.button.poll(raw, now) {
            match level {
                // A full press-and-release while the show runs stops it.
                ButtonLevel::Released if self.state() == RunState::Running => {
                    self.stopped = true;
                }
                // The next press while stopped puts the device to sleep.
                ButtonLevel::Pressed if self.state() == RunState::Stopped => {
                    self.sleep();
                }
                _ => {}
            }
        }

        if self.state() != RunState::Running {
            self.strip.clear();
            self.strip.show();
            return;
        }

        let wake_ms = self.power.wake_time_ms().unwrap_or(now);
        let elapsed_beats = self.config.tempo.beats(now.saturating_sub(wake_ms));
        let (colors, done) = self.timeline.sample(&mut self.cursor, elapsed_beats);

        for pixel in 0..self.config.pixel_count {
            let zone = self.config.zoning.zone_of(pixel);
            self.strip.set_pixel(pixel, colors.for_zone(zone));
        }
        self.strip.show();

        if done {
            self.sleep();
        }
    }

    /// Records a wake transition.
    ///
    /// This is the controlled entry point for the button-edge wake interrupt
    /// handler, which runs with interrupts masked. It only mutates state:
    /// disarms the wake source, flips the awake flag, resets the animation
    /// clock and cursor, and forces the debouncer to released so a button
    /// still held from the wake press does not immediately stop the show.
    /// No strip access, no delays.
    pub fn on_wake_interrupt(&mut self) {
        let now = self.clock.now_ms();
        self.power.on_wake(now);
        self.cursor.reset();
        self.button.reset(ButtonLevel::Released, now);
        self.stopped = false;
    }

    /// Returns the current run state.
    pub fn state(&self) -> RunState {
        if !self.power.is_awake() {
            RunState::Asleep
        } else if self.stopped {
            RunState::Stopped
        } else {
            RunState::Running
        }
    }

    /// Returns true while the show is animating.
    pub fn is_running(&self) -> bool {
        self.state() == RunState::Running
    }

    /// Returns a reference to the loaded timeline.
    pub fn timeline(&self) -> &Timeline<N> {
        &self.timeline
    }

    /// Arms the wake interrupt and enters low-power sleep.
    fn sleep(&mut self) {
        self.stopped = false;
        self.power.enter_sleep();
    }
}
