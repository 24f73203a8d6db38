//! Fixed timestep accumulator

/// Turns variable frame times into a whole number of fixed ticks
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Seconds per tick
    dt: f32,
    /// Leftover time not yet spent on a tick
    accumulator: f32,
    max_substeps: u32,
}

impl FixedTimestep {
    pub fn new(hz: f32, max_substeps: u32) -> Self {
        Self {
            dt: 1.0 / hz,
            accumulator: 0.0,
            max_substeps: max_substeps.max(1),
        }
    }

    /// Add frame time and return how many ticks to run.
    ///
    /// Backlog beyond `max_substeps` ticks is dropped so a long stall
    /// doesn't snowball into ever longer frames.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        if self.accumulator >= self.dt * self.max_substeps as f32 {
            self.accumulator = 0.0;
            return self.max_substeps;
        }
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// How far into the next tick we are (0.0 to 1.0), for interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }
}
