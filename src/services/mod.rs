pub mod console;
pub mod player;
pub mod shutdown;
pub mod twitch;
