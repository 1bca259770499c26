//! TUI module for the interactive slide viewer.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (App, Screen, Action, Transition)
//! - `update`: Pure state transitions
//! - `view`: Pure rendering (state in, widgets out)
//! - `run`: Effects boundary (terminal, threads, event loop)
//! - `theme`: Shared style constants

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

pub use run::run;
