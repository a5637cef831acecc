//! Geneva drive parts
//!
//! Each constructor turns [`GenevaParams`](crate::params::GenevaParams) into
//! a [`Part`](crate::part::Part) whose features mirror how the piece would be
//! modelled by hand. Parameters are assumed to be validated.

mod bearing;
mod disk;
mod plate;
mod wheel;

pub use bearing::ball_bearing_626d;
pub use disk::drive_disk;
pub use plate::base_plate;
pub use wheel::geneva_wheel;
