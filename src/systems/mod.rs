pub mod marble;
pub mod marble_system;
pub mod spawn;
