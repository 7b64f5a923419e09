#![allow(clippy::multiple_crate_versions)]

//! classdump-rs: Objective-C class dump commands for debugger sessions.
//!
//! The crate implements two commands, `pmethods` and `pproperties`, that
//! print the methods and declared properties of an Objective-C class (or of
//! the class of an instance) as Objective-C-like declarations. Runtime
//! metadata is requested through the `host::Host` trait, which a debugger
//! integration backs with its expression evaluator; `snapshot::Snapshot`
//! answers the same queries from a JSON dump of class metadata.
//!
//! See `bin/classdump.rs` for the small REPL front-end.

pub mod command;
pub mod diag;
pub mod encoding;
pub mod handler;
pub mod host;
pub mod method;
pub mod param;
pub mod property;
pub mod query;
pub mod repl;
pub mod session;
pub mod snapshot;
