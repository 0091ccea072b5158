//! Concurrency primitives

mod single_flight;

pub use single_flight::{FlightSnapshot, FlightState, SingleFlight};
