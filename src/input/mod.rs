pub mod handler;

pub use handler::{InputAction, InputHandler};
