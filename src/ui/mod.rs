pub mod app;
mod board;
mod dialogs;
mod hud;
mod presenter;
mod scene;
mod scheduler;
mod state;
