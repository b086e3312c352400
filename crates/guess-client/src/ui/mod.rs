pub mod alert;
pub mod game;
pub mod setup;
pub mod waiting;
