//! Interruptible timed wait with progress bar

/// Progress-bar steps per page hold
pub const BAR_STEPS: u8 = 32;

/// What the wait needs from its surroundings
pub trait WaitHost {
    /// Milliseconds since boot
    fn now_ms(&self) -> u32;

    /// Service input once; called continuously while waiting
    fn service(&mut self);

    /// Whether the current step should end now
    fn interrupted(&self) -> bool;

    /// Invert progress-bar column `step`
    fn progress(&mut self, step: u8);
}

/// Result of one wait
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaitOutcome {
    /// Steps that ran their full length
    pub completed_steps: u8,
    /// Whether any step was cut short
    pub interrupted: bool,
}

/// Step-wise wait state
///
/// The checkpoint survives between waits and only moves when a step runs
/// its full length. Time spent outside a wait (loading a page, sitting in
/// a menu) therefore counts against the first step of the next wait.
#[derive(Debug, Clone, Default)]
pub struct TimedWait {
    checkpoint_ms: u32,
}

impl TimedWait {
    pub const fn new() -> Self {
        Self { checkpoint_ms: 0 }
    }

    /// Time the last full step ended
    pub fn checkpoint_ms(&self) -> u32 {
        self.checkpoint_ms
    }

    /// Run [`BAR_STEPS`] steps of `step_ms` each
    ///
    /// Before each step the matching bar column is inverted unless the
    /// host is interrupted. An interruption ends the current step early
    /// and moves on to the next one, so an interrupted wait finishes
    /// within a few polls.
    pub fn run<H: WaitHost + ?Sized>(&mut self, host: &mut H, step_ms: u32) -> WaitOutcome {
        let mut outcome = WaitOutcome::default();

        for step in 0..BAR_STEPS {
            if !host.interrupted() {
                host.progress(step);
            }

            loop {
                host.service();
                let now = host.now_ms();

                if host.interrupted() {
                    outcome.interrupted = true;
                    break;
                }

                if now.wrapping_sub(self.checkpoint_ms) >= step_ms {
                    self.checkpoint_ms = now;
                    outcome.completed_steps += 1;
                    break;
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct Host {
        now: Cell<u32>,
        services: u32,
        drawn: u32,
        interrupt_at: Option<u32>,
    }

    impl Host {
        fn new() -> Self {
            Self {
                now: Cell::new(0),
                services: 0,
                drawn: 0,
                interrupt_at: None,
            }
        }
    }

    impl WaitHost for Host {
        fn now_ms(&self) -> u32 {
            let now = self.now.get();
            self.now.set(now + 1);
            now
        }

        fn service(&mut self) {
            self.services += 1;
        }

        fn interrupted(&self) -> bool {
            self.interrupt_at.is_some_and(|t| self.now.get() >= t)
        }

        fn progress(&mut self, step: u8) {
            self.drawn |= 1 << step;
        }
    }

    #[test]
    fn test_full_wait() {
        let mut host = Host::new();
        let mut wait = TimedWait::new();
        let outcome = wait.run(&mut host, 10);

        assert_eq!(outcome.completed_steps, BAR_STEPS);
        assert!(!outcome.interrupted);
        assert_eq!(host.drawn, u32::MAX);
        // 32 steps of 10 ms, the first one already due at t=10
        assert_eq!(wait.checkpoint_ms(), 320);
        assert!(host.services >= 320);
    }

    #[test]
    fn test_zero_step_completes_each_step_at_once() {
        let mut host = Host::new();
        let mut wait = TimedWait::new();
        let outcome = wait.run(&mut host, 0);

        assert_eq!(outcome.completed_steps, BAR_STEPS);
        assert_eq!(host.services, BAR_STEPS as u32);
    }

    #[test]
    fn test_interrupt_skips_remaining_time() {
        let mut host = Host::new();
        host.interrupt_at = Some(25);
        let mut wait = TimedWait::new();
        let outcome = wait.run(&mut host, 10);

        assert!(outcome.interrupted);
        assert_eq!(outcome.completed_steps, 2);
        // Only the first three columns were drawn before the interrupt
        assert_eq!(host.drawn, 0b111);
        // Checkpoint stays at the last full step
        assert_eq!(wait.checkpoint_ms(), 20);
        // Remaining steps each end after a single poll
        assert!(host.now.get() < 60);
    }

    #[test]
    fn test_checkpoint_carries_over() {
        let mut host = Host::new();
        let mut wait = TimedWait::new();
        wait.run(&mut host, 10);

        // Time passes outside the wait
        host.now.set(1000);
        let outcome = wait.run(&mut host, 10);

        // First step is already overdue and ends on the first poll
        assert_eq!(outcome.completed_steps, BAR_STEPS);
        assert_eq!(wait.checkpoint_ms(), 1310);
    }
}
