//! Fixed timestep scheduling.
//!
//! [`FixedTimestep`] turns wall clock time into a whole number of simulation
//! steps of exactly [`FIXED_STEP`] seconds. Whatever is left over is carried to
//! the next frame in an accumulator, so frame rate never changes the outcome of
//! the simulation.

/// Length of one simulation step in seconds.
pub const FIXED_STEP: f32 = 0.0166666;

/// What the scheduler should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
    Continue,
    /// Skip the remaining steps of this frame.
    Halt,
}

#[derive(Debug, Clone, Default)]
pub struct FixedTimestep {
    last_ticks: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts measuring from `now` instead of zero.
    pub fn starting_at(now: f32) -> Self {
        Self {
            last_ticks: now,
            accumulator: 0.0,
        }
    }

    /// Runs as many fixed steps as the time elapsed since the last call allows
    /// and returns how many ran.
    ///
    /// `now` is the wall clock in seconds and must not go backwards. `step` is
    /// always called with [`FIXED_STEP`].
    pub fn advance<F>(&mut self, now: f32, mut step: F) -> u32
    where
        F: FnMut(f32) -> StepControl,
    {
        let mut delta = now - self.last_ticks;
        self.last_ticks = now;
        delta += self.accumulator;

        let mut steps = 0;
        while delta >= FIXED_STEP {
            let control = step(FIXED_STEP);
            delta -= FIXED_STEP;
            steps += 1;
            if control == StepControl::Halt {
                break;
            }
        }

        self.accumulator = delta;
        steps
    }

    /// Time carried over to the next frame.
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    pub fn last_ticks(&self) -> f32 {
        self.last_ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_frame_only_accumulates() {
        let mut timestep = FixedTimestep::new();
        let steps = timestep.advance(0.01, |_| StepControl::Continue);
        assert_eq!(steps, 0);
        assert!((timestep.accumulator() - 0.01).abs() < 1e-7);

        let steps = timestep.advance(0.02, |_| StepControl::Continue);
        assert_eq!(steps, 1);
        assert!((timestep.accumulator() - (0.02 - FIXED_STEP)).abs() < 1e-6);
    }

    #[test]
    fn test_step_count_and_remainder() {
        let mut timestep = FixedTimestep::new();
        let mut deltas = Vec::new();
        let steps = timestep.advance(0.05, |dt| {
            deltas.push(dt);
            StepControl::Continue
        });
        assert_eq!(steps, 3);
        assert_eq!(deltas, vec![FIXED_STEP; 3]);
        assert!((timestep.accumulator() - 0.0000002).abs() < 1e-6);
        assert_eq!(timestep.last_ticks(), 0.05);
    }

    #[test]
    fn test_halt_stops_the_frame() {
        let mut timestep = FixedTimestep::new();
        let mut calls = 0;
        let steps = timestep.advance(0.1, |_| {
            calls += 1;
            if calls == 2 {
                StepControl::Halt
            } else {
                StepControl::Continue
            }
        });
        assert_eq!(steps, 2);
        assert_eq!(calls, 2);
        assert!((timestep.accumulator() - (0.1 - 2.0 * FIXED_STEP)).abs() < 1e-6);
    }

    #[test]
    fn test_no_time_is_lost_across_frames() {
        let mut timestep = FixedTimestep::starting_at(1.0);
        let mut total = 0;
        let mut now = 1.0;
        for _ in 0..120 {
            now += 0.007;
            total += timestep.advance(now, |_| StepControl::Continue);
        }
        let elapsed = now - 1.0;
        let expected = (elapsed / FIXED_STEP).floor() as u32;
        assert!(total == expected || total + 1 == expected);
        assert!(timestep.accumulator() < FIXED_STEP);
    }
}
