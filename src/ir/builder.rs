// Copyright (c) 2016-2021 Fabian Schuiki

//! Expression builders
//!
//! Each constructor creates exactly one node from children that have already
//! been built. Children are moved into the new node, so a subtree always has
//! a single owner. The constructors are pure and total; none of them reads or
//! writes shared state.

use crate::error::BuildError;
use crate::expr::Expr;
use crate::ident::check_ident;
use crate::kind::ExprKind;

/// Group a sequence of statements into a module.
pub fn build_module<I>(statements: I) -> Expr
where
    I: IntoIterator<Item = Expr>,
{
    Expr::new_unchecked(
        ExprKind::Module,
        "module".to_string(),
        statements.into_iter().collect(),
    )
}

/// Bind `name` to the value of `expr`.
pub fn build_let(name: impl Into<String>, expr: Expr) -> Expr {
    Expr::new_unchecked(ExprKind::Let, name.into(), vec![expr])
}

/// Conjunction of `lhs` and `rhs`. Operand order is kept as given.
pub fn build_and(lhs: Expr, rhs: Expr) -> Expr {
    Expr::new_unchecked(ExprKind::And, "&".to_string(), vec![lhs, rhs])
}

/// Disjunction of `lhs` and `rhs`. Operand order is kept as given.
pub fn build_or(lhs: Expr, rhs: Expr) -> Expr {
    Expr::new_unchecked(ExprKind::Or, "|".to_string(), vec![lhs, rhs])
}

/// Negation of `expr`.
pub fn build_not(expr: Expr) -> Expr {
    Expr::new_unchecked(ExprKind::Not, "!".to_string(), vec![expr])
}

/// A reference to the hardware bit `name`.
pub fn build_bit(name: impl Into<String>) -> Expr {
    Expr::new_unchecked(ExprKind::Bit, name.into(), vec![])
}

/// A reference to the variable `name`.
pub fn build_symbol(name: impl Into<String>) -> Expr {
    Expr::new_unchecked(ExprKind::Symbol, name.into(), vec![])
}

/// Like [`build_let`], but rejects a malformed `name`.
pub fn try_build_let(name: impl Into<String>, expr: Expr) -> Result<Expr, BuildError> {
    let name = name.into();
    check_ident(ExprKind::Let, &name)?;
    Ok(build_let(name, expr))
}

/// Like [`build_bit`], but rejects a malformed `name`.
pub fn try_build_bit(name: impl Into<String>) -> Result<Expr, BuildError> {
    let name = name.into();
    check_ident(ExprKind::Bit, &name)?;
    Ok(build_bit(name))
}

/// Like [`build_symbol`], but rejects a malformed `name`.
pub fn try_build_symbol(name: impl Into<String>) -> Result<Expr, BuildError> {
    let name = name.into();
    check_ident(ExprKind::Symbol, &name)?;
    Ok(build_symbol(name))
}

/// Build a node of any kind from its parts.
///
/// Dispatches to the constructor for `kind` after checking that `children`
/// has the right length and that `label` matches the fixed label of
/// operators and modules. Names are not validated.
pub fn build(kind: ExprKind, label: String, children: Vec<Expr>) -> Result<Expr, BuildError> {
    if !kind.arity().accepts(children.len()) {
        return Err(BuildError::Arity {
            kind,
            expected: kind.arity(),
            found: children.len(),
        });
    }
    if let Some(glyph) = kind.glyph() {
        if label != glyph {
            return Err(BuildError::Label {
                kind,
                expected: glyph,
                found: label,
            });
        }
    }
    let mut children = children.into_iter();
    Ok(match kind {
        ExprKind::Module => build_module(children),
        ExprKind::Let => build_let(label, take(&mut children)?),
        ExprKind::And => {
            let lhs = take(&mut children)?;
            build_and(lhs, take(&mut children)?)
        }
        ExprKind::Or => {
            let lhs = take(&mut children)?;
            build_or(lhs, take(&mut children)?)
        }
        ExprKind::Not => build_not(take(&mut children)?),
        ExprKind::Bit => build_bit(label),
        ExprKind::Symbol => build_symbol(label),
    })
}

fn take(children: &mut std::vec::IntoIter<Expr>) -> Result<Expr, BuildError> {
    children.next().ok_or(BuildError::Empty)
}
