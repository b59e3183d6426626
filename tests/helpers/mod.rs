mod setup;

pub use setup::spawn_app;
