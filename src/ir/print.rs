// Copyright (c) 2016-2021 Fabian Schuiki

//! A printer for expression trees.
//!
//! Trees print as S-expressions that use the operator glyphs as heads:
//! `(module (let t (& a $x)) (! $t))`. Bits print as their bare name and
//! symbols carry a `$` sigil, which is also what the [`parse`] module
//! expects.
//!
//! The operator heads match the synthesis engine's language, but the sigil
//! does not: the engine writes a symbol reference as a bare name and would
//! read `$t` as a symbol literally named `$t`. The text form is therefore this
//! crate's own format. Use the serde form to exchange trees with the engine.
//!
//! [`parse`]: crate::parse

use crate::expr::Expr;
use crate::kind::ExprKind;
use std::fmt::{self, Write};

/// The sigil that marks a symbol in printed form.
pub const SYMBOL_SIGIL: char = '$';

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_atom_or_head(f, self)?;
        if !self.kind().is_leaf() {
            for child in self.children() {
                write!(f, " {}", child)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// Write a leaf, or the opening parenthesis and head of a list.
fn write_atom_or_head(f: &mut impl Write, expr: &Expr) -> fmt::Result {
    match expr.kind() {
        ExprKind::Bit => write!(f, "{}", expr.label()),
        ExprKind::Symbol => write!(f, "{}{}", SYMBOL_SIGIL, expr.label()),
        ExprKind::Let => write!(f, "(let {}", expr.label()),
        ExprKind::Module | ExprKind::And | ExprKind::Or | ExprKind::Not => {
            write!(f, "({}", expr.label())
        }
    }
}

/// Pretty print `expr` such that lines stay within `width` columns where
/// possible.
///
/// A list that does not fit on the current line is broken up with each child
/// on its own line, indented by two spaces. Leaves are never broken.
pub fn write_pretty(f: &mut impl Write, expr: &Expr, width: usize) -> fmt::Result {
    write_pretty_at(f, expr, 0, width)
}

fn write_pretty_at(f: &mut impl Write, expr: &Expr, indent: usize, width: usize) -> fmt::Result {
    let fits = width
        .checked_sub(indent)
        .and_then(|budget| flat_width(expr, budget))
        .is_some();
    if expr.children().is_empty() || fits {
        return write!(f, "{}", expr);
    }
    write_atom_or_head(f, expr)?;
    for child in expr.children() {
        write!(f, "\n{:indent$}", "", indent = indent + 2)?;
        write_pretty_at(f, child, indent + 2, width)?;
    }
    write!(f, ")")
}

/// The number of characters `expr` takes up when printed on one line, or
/// `None` if that exceeds `budget`. Gives up as soon as the budget is spent.
fn flat_width(expr: &Expr, budget: usize) -> Option<usize> {
    let label = expr.label().chars().count();
    let mut used = match expr.kind() {
        ExprKind::Bit => label,
        ExprKind::Symbol => 1 + label,
        ExprKind::Let => "(let ".len() + label,
        ExprKind::Module | ExprKind::And | ExprKind::Or | ExprKind::Not => 1 + label,
    };
    if !expr.kind().is_leaf() {
        for child in expr.children() {
            let rest = budget.checked_sub(used + 1)?;
            used += 1 + flat_width(child, rest)?;
        }
        used += 1;
    }
    if used > budget {
        None
    } else {
        Some(used)
    }
}

/// Pretty print `expr` into a string. See [`write_pretty`].
pub fn pretty(expr: &Expr, width: usize) -> String {
    let mut s = String::new();
    write_pretty(&mut s, expr, width).unwrap();
    s
}
