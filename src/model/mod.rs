mod announcement;
mod device;
mod staged;

pub use announcement::*;
pub use device::*;
pub use staged::*;
