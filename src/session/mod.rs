//! Session orchestration: the connect → sign → verify → disconnect state
//! machine over a detected wallet provider.

pub mod controller;

pub use controller::{SessionController, SessionError, SessionPhase, Verification};
