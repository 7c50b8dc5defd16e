//! # Splitzip Core Library
//!
//! This crate packs a directory tree into a single deterministic ZIP
//! container and splits that container into fixed-size, base64-encoded
//! fragment files that survive transport through channels that mangle
//! binary data (mail, chat, text-only media). The reverse pipeline
//! discovers the fragments by name, reorders them by their embedded
//! sequence number, and restores the original tree byte-for-byte.
//!
//! ## Key Modules
//!
//! - [`archive`]: Builds the intermediate ZIP container from a source tree.
//! - [`split`]: The split pipeline: container → encoded fragment files.
//! - [`join`]: The join pipeline: fragment files → container → extracted tree.
//! - [`extract`]: Expands a container into a destination directory.
//! - [`fragment`]: The `<base>.part<NNN>.<ext>` naming scheme.
//! - [`progress`]: The four-phase progress callback contract.
//!
//! ## Example
//!
//! ```no_run
//! use splitzip::{split, join, SplitOptions};
//!
//! let parts = split("photos".as_ref(), "outbox".as_ref(), &SplitOptions::default(), None)?;
//! println!("wrote {} fragments", parts.len());
//! join("outbox/photos".as_ref(), "restored".as_ref(), "b64", None)?;
//! # Ok::<(), splitzip::SplitzipError>(())
//! ```

pub mod archive;
pub mod cli;
pub mod error;
pub mod extract;
pub mod fragment;
pub mod join;
pub mod progress;
pub mod split;

pub use error::SplitzipError;
pub use join::join;
pub use progress::{Phase, ProgressCallback};
pub use split::{split, SplitOptions, DEFAULT_CHUNK_SIZE};
