// Copyright (c) 2016-2021 Fabian Schuiki

//! The boolean expression IR handed to netlist synthesis.
//!
//! A design is a tree of [`Expr`] nodes. Trees are assembled bottom-up with
//! the constructors in [`builder`], which are the only way to create a node
//! and guarantee that every node has the number of children its kind asks
//! for. Once built, a tree is an immutable value that can be printed, read
//! back, walked, or flattened into the index-linked form an e-graph ingests.

#![deny(missing_docs)]

pub mod builder;
mod error;
mod expr;
pub mod flat;
pub mod ident;
mod kind;
pub mod parse;
pub mod print;
mod query;
pub mod visit;

pub use crate::builder::*;
pub use crate::error::*;
pub use crate::expr::*;
pub use crate::kind::*;
