//! A four-function keypad calculator.
//!
//! [`calculator::Calculator`] is the engine; [`input`] routes key presses
//! into it and [`ui`] renders its projection for a terminal.

pub mod calculator;
pub mod config;
pub mod input;
pub mod logging;
pub mod ui;
