use crate::status::{EventCode, Status};
use serde::Serialize;
use std::sync::{Mutex, PoisonError};

pub const PROFILE_LABEL: &str = "AR2208";
pub const WEIGHT_STEP: f64 = 1.0;
/// How far past the set-point the weight may go before the cycle restarts.
pub const RESET_MARGIN: f64 = 1.0;
/// Largest set-point whose whole cycle stays exactly representable, so
/// each step still moves the weight and the reset still fires.
pub const MAX_SET_POINT: f64 = 9_007_199_254_740_990.0; // 2^53 - 2

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorState {
    pub current_weight: f64,
    pub set_point: f64,
}

impl SimulatorState {
    pub fn new(set_point: f64) -> Self {
        Self {
            current_weight: 0.0,
            set_point,
        }
    }
    /// Moves the weight one step along the sawtooth and classifies the
    /// result.
    pub fn advance(&mut self) -> StatusSnapshot {
        self.current_weight += WEIGHT_STEP;
        if self.current_weight > self.set_point + RESET_MARGIN {
            log::debug!(
                "weight {} passed set-point {}, restarting cycle",
                self.current_weight,
                self.set_point
            );
            self.current_weight = 0.0;
        }
        let snapshot = StatusSnapshot::new(self.current_weight, self.set_point);
        if snapshot.event == EventCode::Overshoot {
            log::debug!("overshoot at weight {}", snapshot.weight);
        }
        snapshot
    }
}

/// Result of one poll, in the shape the front-end reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusSnapshot {
    #[serde(rename = "s0")]
    pub set_point: f64,
    #[serde(rename = "s1")]
    pub weight: f64,
    #[serde(rename = "s2")]
    pub status: Status,
    #[serde(rename = "s3")]
    pub event: EventCode,
    #[serde(rename = "s4")]
    pub profile_label: &'static str,
}

impl StatusSnapshot {
    fn new(weight: f64, set_point: f64) -> Self {
        Self {
            set_point,
            weight,
            status: Status::classify(weight, set_point),
            event: EventCode::classify(weight, set_point),
            profile_label: PROFILE_LABEL,
        }
    }
    pub fn reclassify(&self) -> (Status, EventCode) {
        (
            Status::classify(self.weight, self.set_point),
            EventCode::classify(self.weight, self.set_point),
        )
    }
}

/// Shared handle to the simulator state. Every poll goes through
/// [`ChargeModeSimulator::advance`], which holds the lock for the whole
/// read-modify-write.
#[derive(Debug)]
pub struct ChargeModeSimulator {
    state: Mutex<SimulatorState>,
}

impl ChargeModeSimulator {
    pub fn new(set_point: f64) -> Self {
        Self {
            state: Mutex::new(SimulatorState::new(set_point)),
        }
    }
    pub fn advance(&self) -> StatusSnapshot {
        // a panic elsewhere can't leave the state half-written, so a
        // poisoned lock is still safe to use
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.advance()
    }
}

impl Default for ChargeModeSimulator {
    fn default() -> Self {
        Self::new(0.0)
    }
}
