// Presentation layer - Terminal rendering and user commands
pub mod charts;
pub mod commands;
pub mod input;
pub mod terminal;
