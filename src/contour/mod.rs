//! Multi-level contour extraction core.
//!
//! The pipeline runs in one direction: noise estimation scales the threshold
//! sequence, the region grower floods one connected region per threshold from
//! the frame center, and the builder folds the per-level masks into a single
//! integer contour map.
//!
//! # Module Organization
//!
//! - **noise**: darkest-corner noise scale estimation
//! - **neighborhood**: 4-connected, boundary-excluding frontier expansion
//! - **mask**: explicit per-cell visit state machine
//! - **region**: generational breadth-first flood fill
//! - **builder**: threshold orchestration, accumulation and diagnostics

pub mod builder;
pub mod mask;
pub mod neighborhood;
pub mod noise;
pub mod region;

pub use builder::{ContourBuilder, ContourOutcome, LevelDiagnostic, LevelSpec, LevelStatus};
pub use mask::{CellState, Mask};
pub use neighborhood::unvisited_neighbors;
pub use noise::estimate_noise;
pub use region::{grow, GrowOutcome};
