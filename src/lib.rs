//! audiomark - inline audio players for documents
//!
//! Parses LRC and SRT/VTT cue documents into bookmark lists, coordinates a
//! single shared media handle across every player rendered in a session,
//! and routes timestamp links to the right player on the same page or, via a
//! single-slot handoff, on another page.
//!
//! Host glue stays behind traits: [`coordinator::MediaHandle`],
//! [`render::Vault`], [`link::LinkResolver`], [`clipboard::CopyTool`] and
//! [`coordinator::Notifier`].

pub mod bookmarks;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod coordinator;
pub mod cues;
pub mod link;
pub mod player;
pub mod render;
pub mod seek;
pub mod timecode;

pub use bookmarks::{Bookmark, BookmarkList};
pub use config::Config;
pub use coordinator::Coordinator;
pub use cues::{CueFormat, Cues};
pub use timecode::{format_time, parse_time, TimeCode};
