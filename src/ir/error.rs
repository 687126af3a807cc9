// Copyright (c) 2016-2021 Fabian Schuiki

use crate::kind::{Arity, ExprKind};
use boolnet_common::errors::DiagBuilder2;
use std::fmt;

/// A reason why a node could not be constructed.
///
/// The plain `build_*` constructors never fail. These conditions only arise
/// from the checked constructors and from rebuilding trees out of external
/// data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// A let, bit, or symbol name that is not a valid identifier.
    MalformedIdentifier {
        /// The kind of node the name was meant for.
        kind: ExprKind,
        /// The offending name.
        name: String,
    },
    /// A node with the wrong number of children for its kind.
    Arity {
        /// The kind of node.
        kind: ExprKind,
        /// The number of children the kind accepts.
        expected: Arity,
        /// The number of children provided.
        found: usize,
    },
    /// A node whose label does not match the fixed label of its kind.
    Label {
        /// The kind of node.
        kind: ExprKind,
        /// The only label the kind accepts.
        expected: &'static str,
        /// The label provided.
        found: String,
    },
    /// An operator that does not name any node kind.
    UnknownOperator(String),
    /// A flat node that refers to a child that does not precede it.
    DanglingIndex {
        /// The index of the referring node.
        node: usize,
        /// The index it refers to.
        child: usize,
    },
    /// A flat expression without any nodes.
    Empty,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BuildError::MalformedIdentifier { kind, name } => {
                write!(f, "malformed identifier `{}` for {}", name, kind)
            }
            BuildError::Arity {
                kind,
                expected,
                found,
            } => write!(f, "{} expects {}, found {}", kind, expected, found),
            BuildError::Label {
                kind,
                expected,
                found,
            } => write!(f, "{} must be labeled `{}`, found `{}`", kind, expected, found),
            BuildError::UnknownOperator(op) => write!(f, "unknown operator `{}`", op),
            BuildError::DanglingIndex { node, child } => write!(
                f,
                "node _{} refers to _{}, which does not precede it",
                node, child
            ),
            BuildError::Empty => write!(f, "expression has no nodes"),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<BuildError> for DiagBuilder2 {
    fn from(err: BuildError) -> DiagBuilder2 {
        DiagBuilder2::error(format!("{}", err))
    }
}
