//! **pacgrid-core**: grid model for a target-collecting agent.
//!
//! This crate provides the foundational types used across the *pacgrid*
//! workspace: geometry primitives, cell states, the [`Grid`] with its agent,
//! target set and visited overlay, and the [`Observer`] hook through which
//! renderers watch a run.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod observe;

pub use cell::Cell;
pub use error::{GridError, MapError};
pub use geom::{Point, Range};
pub use grid::Grid;
pub use observe::{Event, Observer, Recorder};
