mod events;
mod init;
mod render;
mod state;
mod step;
mod watchers;

pub use state::App;
