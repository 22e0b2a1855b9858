pub mod round;
pub mod selection;
