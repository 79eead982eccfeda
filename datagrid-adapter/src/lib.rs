//! Adapter utilities for the `datagrid` crate.
//!
//! The `datagrid` crate is UI-agnostic and owns the row window, layout and editing state. This
//! crate provides small, framework-neutral helpers that hosts commonly need on top of it:
//!
//! - A [`Controller`] that forwards viewport and scroll events and debounces `is_scrolling`
//! - Tween-based smooth scrolling to a row or an offset (adapter-driven)
//! - Scroll anchoring, so replacing the items (e.g. loading older rows above) does not jump
//!
//! No toolkit bindings live here.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod anchor;
mod controller;
mod tween;


pub use anchor::{ScrollAnchor, apply_anchor, capture_first_displayed_anchor};
pub use controller::{Align, Controller, DEFAULT_IS_SCROLLING_RESET_DELAY_MS};
pub use tween::{Easing, Tween};
