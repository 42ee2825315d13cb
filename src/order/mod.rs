//! Display-order construction module

pub mod shuffle;


pub use shuffle::*;
