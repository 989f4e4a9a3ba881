#![forbid(unsafe_code)]
//! graft-project: the projection engine.
//!
//! `Projector::project(source, rules, fat)` reshapes a tree by running each
//! rule through four walks that share one path vocabulary:
//! - `skeleton`: thin mode only, pre-creates containers along the destination;
//! - `overlap`: re-anchors a rule per element when origin and destination
//!   share a leading prefix;
//! - `collect`: gathers leaf values along the origin, fanning out over arrays;
//! - `assign`: writes the refined value along the destination.
//!
//! Everything here is synchronous and allocation-only; no IO.

pub mod assign;
pub mod bag;
pub mod collect;
pub mod overlap;
pub mod page;
pub mod projector;
pub mod skeleton;

pub use bag::Bag;
pub use overlap::overlap_prefix;
pub use page::Page;
pub use projector::Projector;
