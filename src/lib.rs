// Copyright (c) 2016-2021 Fabian Schuiki

//! A boolean expression IR for netlist synthesis.

// Re-export everything from the common crate.
pub use boolnet_common as common;
pub use crate::common::*;

pub use boolnet_ir as ir;
