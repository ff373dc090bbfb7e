//! # AI Game Suite
//!
//! Tic-Tac-Toe, Rock-Paper-Scissors, and Connect 4 against computer
//! opponents of increasing strength, played in a terminal UI built with
//! Ratatui.
//!
//! ## Modules
//!
//! - [`game`]: Rules engines: boards, turn order, win/draw detection, scoring
//! - [`ai`]: Random, greedy, minimax, behavioral prediction, and Q-learning players
//! - [`persistence`]: Loading and saving the learned Q-table as JSON
//! - [`session`]: Engines plus learned state for one run of the program
//! - [`ui`]: Terminal UI: menus, settings, play scenes
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod persistence;
pub mod session;
pub mod ui;
