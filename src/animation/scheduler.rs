use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::error::{ChartError, ChartResult};

/// Default reveal duration.
pub const DEFAULT_DURATION_MS: f64 = 900.0;

/// Lifecycle of one surface's reveal animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AnimationPhase {
    Idle,
    Running { start_ms: f64 },
    Done,
}

/// Result of advancing the scheduler by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationFrame {
    /// Linear progress in `[0, 1]`.
    pub progress: f64,
    /// Eased progress used to interpolate geometry.
    pub eased: f64,
    /// `true` while another frame must be scheduled.
    pub needs_next_frame: bool,
}

/// Drives a single reveal animation for one drawing surface.
///
/// The host owns the frame clock and calls [`Self::tick`] from its frame
/// callback. Starting while already running resets the start time; no queue
/// of pending animations is kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationScheduler {
    phase: AnimationPhase,
    duration_ms: f64,
    easing: Easing,
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self {
            phase: AnimationPhase::Idle,
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::default(),
        }
    }
}

impl AnimationScheduler {
    pub fn new(duration_ms: f64, easing: Easing) -> ChartResult<Self> {
        if !duration_ms.is_finite() || duration_ms < 0.0 {
            return Err(ChartError::InvalidConfig(
                "animation duration must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self {
            phase: AnimationPhase::Idle,
            duration_ms,
            easing,
        })
    }

    #[must_use]
    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.phase, AnimationPhase::Running { .. })
    }

    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Enters `Running` from any phase, superseding a running animation.
    pub fn start(&mut self, now_ms: f64) {
        self.phase = AnimationPhase::Running { start_ms: now_ms };
    }

    /// Stops without finishing; the next draw starts from scratch.
    pub fn cancel(&mut self) {
        self.phase = AnimationPhase::Idle;
    }

    /// Computes the frame at `now_ms`.
    ///
    /// Returns `None` unless running. The frame that reaches full progress
    /// moves the scheduler to `Done`.
    pub fn tick(&mut self, now_ms: f64) -> Option<AnimationFrame> {
        let AnimationPhase::Running { start_ms } = self.phase else {
            return None;
        };
        let progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            let elapsed = now_ms - start_ms;
            if elapsed.is_finite() {
                (elapsed / self.duration_ms).clamp(0.0, 1.0)
            } else {
                1.0
            }
        };
        let needs_next_frame = progress < 1.0;
        if !needs_next_frame {
            self.phase = AnimationPhase::Done;
        }
        Some(AnimationFrame {
            progress,
            eased: self.easing.apply(progress),
            needs_next_frame,
        })
    }

    /// Eased progress at `now_ms` without changing state.
    ///
    /// Idle and finished animations report full progress.
    #[must_use]
    pub fn eased_progress_at(&self, now_ms: f64) -> f64 {
        match self.phase {
            AnimationPhase::Running { start_ms } if self.duration_ms > 0.0 => {
                let elapsed = now_ms - start_ms;
                if elapsed.is_finite() {
                    self.easing
                        .apply((elapsed / self.duration_ms).clamp(0.0, 1.0))
                } else {
                    1.0
                }
            }
            _ => 1.0,
        }
    }
}
