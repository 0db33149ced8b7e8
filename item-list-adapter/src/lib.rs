//! Widget-pattern adapters for the `item-list` crate.
//!
//! `item-list` owns the collection, highlight, selection and typeahead state. This crate maps
//! keyboard and pointer input onto it the way common widget patterns expect:
//!
//! - listbox / select (vertical arrows, Home/End, Enter/Space, typeahead)
//! - combobox (vertical arrows and Enter while focus stays in a text input)
//! - menu (horizontal or vertical arrows, typeahead)
//! - grid (two-dimensional arrows over a fixed column count, e.g. a calendar)
//!
//! This crate is framework-agnostic. With `feature = "crossterm"` it can also translate
//! crossterm key events.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
#[cfg(feature = "crossterm")]
mod terminal;
mod pattern;


pub use controller::Controller;
#[cfg(feature = "crossterm")]
pub use terminal::key_input_from_crossterm;
pub use pattern::{Orientation, Pattern};
