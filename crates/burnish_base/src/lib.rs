//! # burnish-base
//!
//! Pure structural atoms for the burnish ecosystem.
//!
//! This crate provides the foundational types used throughout burnish:
//!
//! - [`Arena`]/[`Idx`] — slotted index arena with stable, recyclable handles
//! - [`SourcePos`] — input position tracking
//! - [`SpannedError`]/[`Result`] — errors with input positions
//!
//! # Design Principles
//!
//! This crate has **no knowledge of any programming language or I/O**. It
//! provides only generic, reusable infrastructure that the formatting crate
//! builds upon.
//!
//! # Example
//!
//! ```
//! use burnish_base::{Arena, Idx, SourcePos};
//!
//! let mut arena: Arena<&str> = Arena::new();
//! let id = arena.alloc("token");
//!
//! assert_eq!(*arena.get(id).unwrap(), "token");
//! assert!(Idx::NONE.is_none());
//! let pos = SourcePos::new(1, 1, 6);
//! assert_eq!(pos.width(), 5);
//! ```

pub mod arena;
pub mod error;
pub mod pos;

pub use arena::{Arena, Idx};
pub use error::{Result, SpannedError};
pub use pos::SourcePos;
