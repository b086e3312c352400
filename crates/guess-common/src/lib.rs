pub mod game;
pub mod lobby;
pub mod phase;
pub mod protocol;
pub mod setup;
