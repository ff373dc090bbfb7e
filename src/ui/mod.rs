//! Terminal UI: menus, settings, and one play scene per game.

mod app;
mod board_widget;
mod game_view;
mod menu_view;

pub use app::{App, Scene, human_turn};
