//! Simulated charge-mode state machine for the trickler mock server.

pub mod error;
pub mod simulator;
pub mod status;

pub use error::CodeError;
pub use simulator::{
    ChargeModeSimulator, SimulatorState, StatusSnapshot, MAX_SET_POINT, PROFILE_LABEL,
};
pub use status::{EventCode, Status};
