//! Ready-made show data.
//!
//! The keyframe table of the shipped firmware: a 117 BPM song-synchronized
//! show that pre-rolls 28 beats so its first visible change lands on the
//! song's entry cue. Pure configuration data; the engineering lives in
//! [`timeline`](crate::timeline) and [`sequencer`](crate::sequencer).

use crate::colors::{
    BLUE, BRIGHT_BLUE, BRIGHT_PURPLE, BRIGHT_WHITE, BRIGHT_WHITE_BLUE, DIM_WHITE, GREEN, OFF,
    PURPLE, RED, WHITE_BLUE, WHITE_RED, YELLOW,
};
use crate::time::Tempo;
use crate::timeline::Timeline;
use crate::types::TimelineError;

/// Tempo of the demo show's soundtrack.
pub const DEMO_TEMPO: Tempo = Tempo::bpm(117.0);

/// Beats of pre-roll before the demo show's first visible change.
pub const DEMO_START_OFFSET: f32 = 28.0;

/// Maximum keyframe count of the demo show's timeline type.
pub const DEMO_CAPACITY: usize = 40;

/// Builds the demo show timeline.
///
/// Ends on [`OFF`] so the strip is dark when the show completes and the
/// device drops back to sleep.
pub fn demo_show() -> Result<Timeline<DEMO_CAPACITY>, TimelineError> {
    Timeline::builder()
        .start_offset(DEMO_START_OFFSET)
        .frame(WHITE_BLUE, 0.0)
        .frame(BRIGHT_WHITE_BLUE, 4.0)
        .frame(OFF, 4.0)
        .frame(OFF, 5.0)
        .frame(DIM_WHITE, 8.0)
        // Chorus
        .frame(BRIGHT_WHITE, 8.0)
        .frame(BRIGHT_WHITE, 11.9)
        .frame(BRIGHT_PURPLE, 12.1)
        .frame(BRIGHT_PURPLE, 15.9)
        .frame(BRIGHT_BLUE, 16.1)
        .frame(BRIGHT_BLUE, 19.9)
        .frame(BRIGHT_WHITE_BLUE, 20.1)
        .frame(BRIGHT_WHITE_BLUE, 23.9)
        // Call-and-response
        .frame(WHITE_RED, 24.1)
        .frame(WHITE_RED, 27.9)
        .frame(WHITE_BLUE, 28.1)
        .frame(WHITE_BLUE, 31.9)
        .frame(WHITE_RED, 32.1)
        .frame(WHITE_RED, 35.9)
        .frame(WHITE_BLUE, 36.1)
        .frame(WHITE_BLUE, 37.9)
        .frame(YELLOW, 38.1)
        .frame(YELLOW, 40.0)
        // Slow alternation
        .frame(BLUE, 40.0)
        .frame(BLUE, 44.0)
        .frame(RED, 44.0)
        .frame(RED, 48.0)
        .frame(BLUE, 48.0)
        .frame(BLUE, 56.0)
        // Bridge
        .frame(PURPLE, 56.0)
        .frame(PURPLE, 57.9)
        .frame(GREEN, 58.1)
        .frame(GREEN, 59.9)
        .frame(WHITE_BLUE, 60.1)
        .frame(WHITE_BLUE, 72.0)
        .frame(OFF, 72.0)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::Cursor;

    #[test]
    fn demo_show_builds() {
        let timeline = demo_show().unwrap();
        assert_eq!(timeline.len(), 36);
        assert_eq!(timeline.start_offset(), DEMO_START_OFFSET);
    }

    #[test]
    fn demo_show_holds_first_color_through_preroll() {
        let timeline = demo_show().unwrap();
        let mut cursor = Cursor::new();

        let (colors, done) = timeline.sample(&mut cursor, 10.0);
        assert_eq!(colors.a, WHITE_BLUE);
        assert!(!done);
    }

    #[test]
    fn demo_show_ends_dark() {
        let timeline = demo_show().unwrap();
        let mut cursor = Cursor::new();

        let (colors, done) = timeline.sample(&mut cursor, 28.0 + 72.0);
        assert_eq!(colors.a, OFF);
        assert!(done);
    }
}
