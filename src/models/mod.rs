pub mod appointment;
pub mod enums;
pub mod notification;
pub mod patient;

pub use appointment::*;
pub use enums::*;
pub use notification::*;
pub use patient::*;
