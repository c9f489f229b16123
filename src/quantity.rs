#[macro_use]
mod macros;

pub mod rate;
pub mod volume;
