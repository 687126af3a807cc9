// Copyright (c) 2016-2021 Fabian Schuiki

//! This crate contains the fundamental utilities used by the rest of the
//! boolnet tools: the session, diagnostics, and the source file table.

#[macro_use]
extern crate bitflags;

pub mod errors;
pub mod source;

use crate::errors::{DiagBuilder2, DiagEmitter, Severity};
use std::cell::Cell;

/// A session that carries the options of an invocation and collects the
/// diagnostics emitted along the way.
pub struct Session {
    pub opts: SessionOptions,
    /// Whether an error has been produced.
    failed: Cell<bool>,
}

impl Session {
    /// Create a new session with default options.
    pub fn new() -> Session {
        Session {
            opts: Default::default(),
            failed: Cell::new(false),
        }
    }

    /// Check whether an error has been emitted during this session.
    pub fn failed(&self) -> bool {
        self.failed.get()
    }

    /// Check whether a verbosity option is set.
    pub fn has_verbosity(&self, verb: Verbosity) -> bool {
        self.opts.verbosity.contains(verb)
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}

impl DiagEmitter for Session {
    fn emit(&self, diag: DiagBuilder2) {
        if diag.severity >= Severity::Error {
            self.failed.set(true);
        }
        eprintln!("{}", diag);
    }
}

/// A set of options for a session.
///
/// The arguments passed on the command line are intended to modify these
/// values in order to configure the execution of the program.
#[derive(Debug)]
pub struct SessionOptions {
    /// Additional verbose output.
    pub verbosity: Verbosity,
    /// Reject trees with malformed identifiers.
    pub check_idents: bool,
    /// The column limit for pretty printed output.
    pub width: usize,
}

impl Default for SessionOptions {
    fn default() -> SessionOptions {
        SessionOptions {
            verbosity: Verbosity::empty(),
            check_idents: false,
            width: 80,
        }
    }
}

bitflags! {
    /// A set of verbosity options for a session.
    ///
    /// These flags control how much information the tools emit on stderr.
    pub struct Verbosity: u8 {
        /// Print every tree as it is read.
        const TREES = 1 << 0;
        /// Print the flattened form of every tree.
        const FLAT  = 1 << 1;
        /// Print node counts and depths.
        const STATS = 1 << 2;
    }
}
