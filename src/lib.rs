//! Airibes floorplan panel: the editor session host.
//!
//! The geometry, placement rules and editor live in the `floorplan` crate.
//! This crate binds an editor to its storage and host registry, loads its
//! configuration, and ships the `airibes-panel` binary.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `AIRIBES_*` environment configuration |
//! | [`services`] | Storage collaborator trait and implementations |
//! | [`state`] | [`state::EditorSession`]: load, save, device refresh |

pub mod config;
pub mod services;
pub mod state;
