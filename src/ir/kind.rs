// Copyright (c) 2016-2021 Fabian Schuiki

//! Node kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a node plays in an expression tree.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum ExprKind {
    /// A group of statements.
    Module,
    /// A name bound to an expression.
    Let,
    /// Logical conjunction of two operands.
    And,
    /// Logical disjunction of two operands.
    Or,
    /// Logical negation of one operand.
    Not,
    /// A reference to a concrete hardware bit or signal.
    Bit,
    /// A reference to a free or bound variable.
    Symbol,
}

/// The number of children a node kind accepts.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Arity {
    /// Exactly this many children.
    Exactly(usize),
    /// Any number of children, including none.
    Any,
}

impl Arity {
    /// Check whether `count` children satisfy this arity.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => n == count,
            Arity::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Arity::Exactly(1) => write!(f, "1 operand"),
            Arity::Exactly(n) => write!(f, "{} operands", n),
            Arity::Any => write!(f, "any number of operands"),
        }
    }
}

impl ExprKind {
    /// All node kinds, in declaration order.
    pub const ALL: [ExprKind; 7] = [
        ExprKind::Module,
        ExprKind::Let,
        ExprKind::And,
        ExprKind::Or,
        ExprKind::Not,
        ExprKind::Bit,
        ExprKind::Symbol,
    ];

    /// The number of children nodes of this kind carry.
    pub fn arity(self) -> Arity {
        match self {
            ExprKind::Module => Arity::Any,
            ExprKind::Let => Arity::Exactly(1),
            ExprKind::And => Arity::Exactly(2),
            ExprKind::Or => Arity::Exactly(2),
            ExprKind::Not => Arity::Exactly(1),
            ExprKind::Bit => Arity::Exactly(0),
            ExprKind::Symbol => Arity::Exactly(0),
        }
    }

    /// The fixed label of this kind. Kinds whose label is a user-chosen name
    /// return `None`.
    pub fn glyph(self) -> Option<&'static str> {
        match self {
            ExprKind::Module => Some("module"),
            ExprKind::And => Some("&"),
            ExprKind::Or => Some("|"),
            ExprKind::Not => Some("!"),
            ExprKind::Let | ExprKind::Bit | ExprKind::Symbol => None,
        }
    }

    /// Find the kind whose fixed label is `glyph`.
    pub fn from_glyph(glyph: &str) -> Option<ExprKind> {
        match glyph {
            "module" => Some(ExprKind::Module),
            "&" => Some(ExprKind::And),
            "|" => Some(ExprKind::Or),
            "!" => Some(ExprKind::Not),
            _ => None,
        }
    }

    /// Whether the label of this kind is a name chosen by the caller.
    pub fn is_named(self) -> bool {
        self.glyph().is_none()
    }

    /// Whether nodes of this kind never have children.
    pub fn is_leaf(self) -> bool {
        self.arity() == Arity::Exactly(0)
    }

    /// Whether this kind is a logic operator.
    pub fn is_operator(self) -> bool {
        match self {
            ExprKind::And | ExprKind::Or | ExprKind::Not => true,
            ExprKind::Module | ExprKind::Let | ExprKind::Bit | ExprKind::Symbol => false,
        }
    }

    /// A human-readable description of this kind.
    pub fn desc(self) -> &'static str {
        match self {
            ExprKind::Module => "module",
            ExprKind::Let => "let binding",
            ExprKind::And => "and",
            ExprKind::Or => "or",
            ExprKind::Not => "not",
            ExprKind::Bit => "bit",
            ExprKind::Symbol => "symbol",
        }
    }
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.desc())
    }
}
