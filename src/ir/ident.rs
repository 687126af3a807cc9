// Copyright (c) 2016-2021 Fabian Schuiki

//! Identifier checks
//!
//! The plain builders accept any name. The checks in this module are used by
//! the checked builders and by tools that want to reject trees with names a
//! netlist could not carry.

use crate::error::BuildError;
use crate::expr::Expr;
use crate::kind::ExprKind;
use crate::visit::{walk_expr, Visitor};
use log::trace;

/// Check whether `name` is a well-formed identifier.
///
/// Identifiers start with an ASCII letter or underscore, followed by ASCII
/// letters, digits, or any of `_ $ . [ ]`. This admits bus bits such as
/// `data[3]` and hierarchical names such as `core.alu.c0`.
pub fn is_valid_ident(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => (),
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || "_$.[]".contains(c))
}

/// Fail with [`BuildError::MalformedIdentifier`] unless `name` is a
/// well-formed identifier for a node of the given `kind`.
pub fn check_ident(kind: ExprKind, name: &str) -> Result<(), BuildError> {
    if is_valid_ident(name) {
        Ok(())
    } else {
        Err(BuildError::MalformedIdentifier {
            kind,
            name: name.to_string(),
        })
    }
}

/// Check every let, bit, and symbol name in a tree.
///
/// Names are checked in pre-order and the first malformed one is reported.
pub fn validate(expr: &Expr) -> Result<(), BuildError> {
    struct Validator {
        error: Option<BuildError>,
    }

    impl<'a> Visitor<'a> for Validator {
        fn visit_expr(&mut self, expr: &'a Expr) {
            if self.error.is_some() {
                return;
            }
            let kind = expr.kind();
            if kind.is_named() {
                trace!("checking {} `{}`", kind, expr.label());
                if let Err(e) = check_ident(kind, expr.label()) {
                    self.error = Some(e);
                    return;
                }
            }
            walk_expr(self, expr);
        }
    }

    let mut v = Validator { error: None };
    v.visit_expr(expr);
    match v.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
