//! Sleep/wake power management.
//!
//! The device spends most of its life in the lowest-power sleep mode and is
//! woken by a button-edge interrupt. [`PowerController`] owns the awake flag
//! and wake timestamp and drives the hardware's sleep primitive through the
//! [`SleepControl`] trait, keeping the interrupt discipline in one place:
//! the wake interrupt is armed only immediately before the blocking sleep
//! call, and disarmed as the very first action on the wake path.

/// Trait for abstracting the hardware's low-power sleep primitive.
///
/// Implement this for your microcontroller. On hosted platforms (tests,
/// simulators) `enter_lowest_power_mode` can simply return, letting the test
/// drive wake transitions explicitly.
pub trait SleepControl {
    /// Enables the button-edge wake interrupt source.
    fn arm_wake_interrupt(&mut self);

    /// Suspends execution in the lowest-power sleep mode.
    ///
    /// On real hardware this blocks until the armed wake interrupt fires.
    /// Interrupt delivery is assumed reliable; there is no retry.
    fn enter_lowest_power_mode(&mut self);

    /// Disables the button-edge wake interrupt source.
    fn disarm_wake_interrupt(&mut self);
}

/// Owns the awake/asleep state and the wake timestamp.
///
/// Awake transitions are edge-triggered by the wake interrupt (via
/// [`on_wake`](PowerController::on_wake)); asleep transitions are explicit
/// calls from the render loop.
#[derive(Debug)]
pub struct PowerController<W: SleepControl> {
    sleep: W,
    awake: bool,
    wake_time_ms: Option<u64>,
}

impl<W: SleepControl> PowerController<W> {
    /// Creates a controller in the asleep state.
    pub fn new(sleep: W) -> Self {
        Self {
            sleep,
            awake: false,
            wake_time_ms: None,
        }
    }

    /// Arms the wake interrupt and enters the lowest-power sleep mode.
    ///
    /// On real hardware this call does not return until the wake interrupt
    /// fires. The main loop only runs while the interrupt is disarmed, so the
    /// arm-then-sleep ordering here is what makes shared state updates from
    /// the wake handler safe without any locking.
    pub fn enter_sleep(&mut self) {
        self.awake = false;
        self.wake_time_ms = None;
        self.sleep.arm_wake_interrupt();
        self.sleep.enter_lowest_power_mode();
    }

    /// Records a wake transition at the given timestamp.
    ///
    /// Called from the wake interrupt path. Disarms the interrupt source
    /// first, then flips the awake flag and records the wake timestamp.
    /// Performs no blocking work.
    pub fn on_wake(&mut self, now_ms: u64) {
        self.sleep.disarm_wake_interrupt();
        self.awake = true;
        self.wake_time_ms = Some(now_ms);
    }

    /// Returns true while the system is awake.
    pub fn is_awake(&self) -> bool {
        self.awake
    }

    /// Returns the timestamp of the last wake, if awake.
    pub fn wake_time_ms(&self) -> Option<u64> {
        self.wake_time_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::rc::Rc;
    use std::vec::Vec;
    use core::cell::RefCell;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum SleepEvent {
        Arm,
        Sleep,
        Disarm,
    }

    struct MockSleep {
        events: Rc<RefCell<Vec<SleepEvent>>>,
    }

    impl SleepControl for MockSleep {
        fn arm_wake_interrupt(&mut self) {
            self.events.borrow_mut().push(SleepEvent::Arm);
        }

        fn enter_lowest_power_mode(&mut self) {
            self.events.borrow_mut().push(SleepEvent::Sleep);
        }

        fn disarm_wake_interrupt(&mut self) {
            self.events.borrow_mut().push(SleepEvent::Disarm);
        }
    }

    fn controller() -> (PowerController<MockSleep>, Rc<RefCell<Vec<SleepEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sleep = MockSleep {
            events: Rc::clone(&events),
        };
        (PowerController::new(sleep), events)
    }

    #[test]
    fn starts_asleep() {
        let (power, _) = controller();
        assert!(!power.is_awake());
        assert!(power.wake_time_ms().is_none());
    }

    #[test]
    fn enter_sleep_arms_before_sleeping() {
        let (mut power, events) = controller();
        power.on_wake(100);
        power.enter_sleep();

        assert!(!power.is_awake());
        assert!(power.wake_time_ms().is_none());
        assert_eq!(
            events.borrow().as_slice(),
            &[SleepEvent::Disarm, SleepEvent::Arm, SleepEvent::Sleep]
        );
    }

    #[test]
    fn on_wake_disarms_and_records_timestamp() {
        let (mut power, events) = controller();
        power.on_wake(1234);

        assert!(power.is_awake());
        assert_eq!(power.wake_time_ms(), Some(1234));
        assert_eq!(events.borrow().as_slice(), &[SleepEvent::Disarm]);
    }

    #[test]
    fn wake_timestamp_tracks_latest_wake() {
        let (mut power, _) = controller();
        power.on_wake(100);
        power.enter_sleep();
        power.on_wake(9000);
        assert_eq!(power.wake_time_ms(), Some(9000));
    }
}
