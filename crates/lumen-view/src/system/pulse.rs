use std::time::{Duration, Instant};

/// Timing snapshot for one render pulse.
#[derive(Debug, Copy, Clone)]
pub struct PulseTime {
    /// Seconds since the previous pulse, clamped.
    pub dt: f32,
    pub now: Instant,
    pub frame_index: u64,
}

/// Pulse clock driving the render loop.
///
/// Delta time is clamped to avoid pathological values when the host is
/// paused by a debugger, minimized, or stalls.
#[derive(Debug, Clone)]
pub struct Pulse {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl Pulse {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
        }
    }

    /// Resets the baseline, e.g. after resuming from suspension.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns the snapshot for this pulse.
    pub fn advance(&mut self) -> PulseTime {
        let now = Instant::now();
        let raw = now.duration_since(self.last);
        let dt = raw.clamp(self.dt_min, self.dt_max);
        self.last = now;
        self.frame_index += 1;
        PulseTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        }
    }
}

impl Default for Pulse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_is_clamped_and_frames_count_up() {
        let mut pulse = Pulse::new();
        let a = pulse.advance();
        let b = pulse.advance();
        assert_eq!(a.frame_index + 1, b.frame_index);
        assert!(b.dt >= 0.0001 - f32::EPSILON);
        assert!(b.dt <= 0.25 + f32::EPSILON);
    }
}
