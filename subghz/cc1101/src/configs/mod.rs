//! Radio profiles exported from TI SmartRF Studio.

mod gfsk_1k2_433;

pub use gfsk_1k2_433::GFSK_1K2_433;
