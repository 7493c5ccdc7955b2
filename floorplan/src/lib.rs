//! Floorplan geometry and layout engine for radar presence sensing.
//!
//! This crate owns everything about an apartment floorplan that is not I/O:
//! the entity model and its id pools, placement rules (minimum sizes, door
//! snapping, per-room capacities), the pointer-driven editor, the read-only
//! dashboard scene, and the compiled per-radar payload a sensor consumes.
//! Hosts feed it pointer events, palette drops and device states, and carry
//! out the [`engine::Action`]s it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | The [`engine::Editor`]: gestures, drops and edits |
//! | [`doc`] | Entity types and the in-memory [`doc::DocStore`] |
//! | [`ids`] | Per-kind id pools with recycling |
//! | [`catalog`] | Sticker catalogue and monitor area tags |
//! | [`geom`] | Rectangles, walls and door-on-wall geometry |
//! | [`layout`] | Placement rules, snapping and capacity checks |
//! | [`camera`] | Real/display unit conversion and fit-to-viewport |
//! | [`input`] | Tools, palette items and the gesture state machine |
//! | [`hit`] | Hit-testing against placed entities |
//! | [`status`] | Host device states and room tints |
//! | [`scene`] | Dashboard scene composition |
//! | [`sender`] | Per-radar sender data compilation |
//! | [`codec`] | Stored floorplan document encode/decode |
//! | [`consts`] | Shared numeric constants |

pub mod camera;
pub mod catalog;
pub mod codec;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod ids;
pub mod input;
pub mod layout;
pub mod scene;
pub mod sender;
pub mod status;
