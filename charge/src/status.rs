use crate::error::CodeError;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Progress of the charge relative to the set-point.
///
/// Code 2 is not a status; it belongs to [`EventCode::Overshoot`].
#[repr(u8)]
#[derive(PartialEq, Debug, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Status {
    /// No set-point configured.
    Idle = 0,
    Filling = 1,
    /// At or past the set-point.
    Overshot = 3,
}

impl Status {
    pub fn classify(weight: f64, set_point: f64) -> Self {
        if set_point == 0.0 {
            Status::Idle
        } else if weight < set_point {
            Status::Filling
        } else {
            Status::Overshot
        }
    }
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl From<Status> for u8 {
    fn from(status: Status) -> Self {
        status.code()
    }
}

impl TryFrom<u8> for Status {
    type Error = CodeError;
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Status::Idle),
            1 => Ok(Status::Filling),
            3 => Ok(Status::Overshot),
            _ => Err(CodeError::Status(code)),
        }
    }
}

/// One-shot signal raised on the poll that finds the weight strictly
/// above the set-point.
#[repr(u8)]
#[derive(PartialEq, Debug, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum EventCode {
    None = 0,
    Overshoot = 2,
}

impl EventCode {
    // strictly greater: a weight sitting exactly on the set-point is
    // Overshot by status but raises no event
    pub fn classify(weight: f64, set_point: f64) -> Self {
        if weight > set_point && set_point != 0.0 {
            EventCode::Overshoot
        } else {
            EventCode::None
        }
    }
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl From<EventCode> for u8 {
    fn from(event: EventCode) -> Self {
        event.code()
    }
}

impl TryFrom<u8> for EventCode {
    type Error = CodeError;
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(EventCode::None),
            2 => Ok(EventCode::Overshoot),
            _ => Err(CodeError::Event(code)),
        }
    }
}
