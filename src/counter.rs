//! Numeric count-up animation stepped on a fixed tick.

#[derive(Clone, Debug)]
pub struct Counter {
    target: f64,
    increment: f64,
    current: f64,
    done: bool,
}

impl Counter {
    /// Counts from zero to `target` in `duration_ms / tick_ms` steps.
    pub fn new(target: f64, duration_ms: f64, tick_ms: f64) -> Self {
        let steps = duration_ms / tick_ms;
        let increment = if steps > 0.0 { target / steps } else { target };
        Self {
            target,
            increment,
            current: 0.0,
            done: false,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advances one tick and returns the value to display, or `None` once the
    /// target has been shown.
    pub fn tick(&mut self) -> Option<i64> {
        if self.done {
            return None;
        }
        self.current += self.increment;
        // A non-positive increment would never reach the target.
        if self.current >= self.target || self.increment <= 0.0 {
            self.done = true;
            Some(self.target.round() as i64)
        } else {
            Some(self.current.round() as i64)
        }
    }
}
