pub mod human;
pub mod retry;

pub use human::HumanMode;
pub use retry::RetryControl;
