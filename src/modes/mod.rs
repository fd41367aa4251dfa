pub mod human;
pub mod tick_driver;

pub use human::HumanMode;
pub use tick_driver::TickDriver;
