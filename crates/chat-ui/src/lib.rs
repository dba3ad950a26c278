//! UI layer: egui panels over the conversation state.
//!
//! Panels are plain functions that render from shared state and return
//! actions for the app layer to execute. No panel owns domain state and
//! none performs I/O.

pub mod panels;
pub mod state;
pub mod theme;

#[cfg(test)]
mod tests;
