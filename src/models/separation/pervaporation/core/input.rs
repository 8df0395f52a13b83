mod conditions;
mod permeate;
mod program;

pub use conditions::Conditions;
pub use permeate::PermeateCondition;
pub use program::{TemperatureProgram, TemperatureProgramError};
