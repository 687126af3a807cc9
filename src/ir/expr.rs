// Copyright (c) 2016-2021 Fabian Schuiki

//! Expression nodes

use crate::builder;
use crate::error::BuildError;
use crate::kind::ExprKind;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// A node in a boolean expression tree.
///
/// Nodes own their children exclusively and cannot be modified once built.
/// Two trees are equal if their kinds, labels, and children are recursively
/// equal. Use the constructors in [`builder`] to create nodes.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawExpr")]
pub struct Expr {
    kind: ExprKind,
    label: String,
    children: Vec<Expr>,
}

impl Expr {
    /// Assemble a node without checking it. Callers guarantee the arity and
    /// label of `kind`.
    pub(crate) fn new_unchecked(kind: ExprKind, label: String, children: Vec<Expr>) -> Expr {
        debug_assert!(kind.arity().accepts(children.len()));
        Expr {
            kind,
            label,
            children,
        }
    }

    /// The role of this node.
    pub fn kind(&self) -> ExprKind {
        self.kind
    }

    /// The label of this node.
    ///
    /// This is `"module"` for modules, the operator glyph for logic
    /// operators, and the name for lets, bits, and symbols.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The children of this node, in order.
    pub fn children(&self) -> &[Expr] {
        &self.children
    }

    /// Take this node apart into its kind, label, and children.
    pub fn into_parts(self) -> (ExprKind, String, Vec<Expr>) {
        (self.kind, self.label, self.children)
    }
}

/// The unchecked shape of a node, as it appears in serialized data.
#[derive(Deserialize)]
struct RawExpr {
    kind: ExprKind,
    label: String,
    children: Vec<Expr>,
}

impl TryFrom<RawExpr> for Expr {
    type Error = BuildError;

    fn try_from(raw: RawExpr) -> Result<Expr, BuildError> {
        builder::build(raw.kind, raw.label, raw.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn nodes_cross_threads() {
        assert_send_sync::<Expr>();
        let handles: Vec<_> = (0..4)
            .map(|i| std::thread::spawn(move || build_not(build_bit(format!("b{}", i)))))
            .collect();
        let built: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let module = build_module(built);
        assert_eq!(module.children().len(), 4);
        assert_eq!(module.children()[2].children()[0].label(), "b2");
    }

    #[test]
    fn clone_is_deep_and_equal() {
        let a = build_and(build_bit("a"), build_symbol("b"));
        let b = a.clone();
        assert_eq!(a, b);
        let (kind, label, children) = b.into_parts();
        assert_eq!(kind, ExprKind::And);
        assert_eq!(label, "&");
        assert_eq!(children, a.children());
    }

    #[test]
    fn hash_follows_structure() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(build_or(build_bit("x"), build_bit("y")));
        assert!(set.contains(&build_or(build_bit("x"), build_bit("y"))));
        assert!(!set.contains(&build_or(build_bit("y"), build_bit("x"))));
        assert!(!set.contains(&build_or(build_bit("x"), build_symbol("y"))));
    }
}
