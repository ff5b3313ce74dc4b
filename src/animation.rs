//! Per-frame value animators used by the early lectures.
//!
//! Both advance by a fixed step each frame, not by elapsed time, so their
//! speed follows the frame rate.

#[derive(Debug, Clone, Copy, PartialEq)]
enum Bounds {
    /// Turn around once `|value| >= max`.
    Symmetric { max: f32 },
    /// Shrink once `value >= max`, grow once `value <= min`.
    Range { min: f32, max: f32 },
}

/// A value moving back and forth by a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    value: f32,
    step: f32,
    increasing: bool,
    bounds: Bounds,
}

impl Oscillator {
    /// Offset starting at 0 and moving towards `+max_offset` first.
    pub fn translation(max_offset: f32, step: f32) -> Self {
        Self {
            value: 0.0,
            step,
            increasing: true,
            bounds: Bounds::Symmetric { max: max_offset },
        }
    }

    /// Scale starting at `max` and shrinking towards `min` first.
    pub fn scale(min: f32, max: f32, step: f32) -> Self {
        Self {
            value: max,
            step,
            increasing: false,
            bounds: Bounds::Range { min, max },
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Moves one step and returns the new value. The direction flips after
    /// the step that reaches a bound.
    pub fn advance(&mut self) -> f32 {
        if self.increasing {
            self.value += self.step;
        } else {
            self.value -= self.step;
        }

        match self.bounds {
            Bounds::Symmetric { max } => {
                if self.value.abs() >= max {
                    self.increasing = !self.increasing;
                }
            }
            Bounds::Range { min, max } => {
                if self.value >= max {
                    self.increasing = false;
                } else if self.value <= min {
                    self.increasing = true;
                }
            }
        }
        self.value
    }
}

/// An angle in degrees growing by a fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spinner {
    angle: f32,
    step: f32,
    restart: f32,
}

impl Spinner {
    pub const FULL_TURN: f32 = 360.0;

    /// Starts at 0 and wraps back to 0 once a full turn is reached.
    pub fn new(step: f32) -> Self {
        Self {
            angle: 0.0,
            step,
            restart: 0.0,
        }
    }

    /// Like [`Spinner::new`] but restarts at `restart` instead of 0.
    pub fn restarting_at(step: f32, restart: f32) -> Self {
        Self {
            angle: 0.0,
            step,
            restart,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn advance(&mut self) -> f32 {
        self.angle += self.step;
        if self.angle >= Self::FULL_TURN {
            self.angle = self.restart;
        }
        self.angle
    }
}
