// Copyright (c) 2016-2021 Fabian Schuiki

//! A visitor for expression trees.
//!
//! Every node kind has its own `visit_*` method. The defaults walk the
//! children of the node, so an implementation only overrides the kinds it
//! cares about. Dispatch in [`walk_expr`] matches on all kinds, so adding a
//! kind forces every visitor to be revisited.

use crate::expr::Expr;
use crate::kind::ExprKind;

/// A visitor over an expression tree.
#[allow(missing_docs)]
pub trait Visitor<'a> {
    /// Visit any node. Dispatches to the method for the node's kind.
    fn visit_expr(&mut self, expr: &'a Expr) {
        walk_expr(self, expr)
    }

    fn visit_module(&mut self, expr: &'a Expr) {
        walk_children(self, expr)
    }

    fn visit_let(&mut self, expr: &'a Expr) {
        walk_children(self, expr)
    }

    fn visit_and(&mut self, expr: &'a Expr) {
        walk_children(self, expr)
    }

    fn visit_or(&mut self, expr: &'a Expr) {
        walk_children(self, expr)
    }

    fn visit_not(&mut self, expr: &'a Expr) {
        walk_children(self, expr)
    }

    fn visit_bit(&mut self, _expr: &'a Expr) {}

    fn visit_symbol(&mut self, _expr: &'a Expr) {}
}

/// Call the `visit_*` method of `visitor` that matches the kind of `expr`.
pub fn walk_expr<'a, V>(visitor: &mut V, expr: &'a Expr)
where
    V: Visitor<'a> + ?Sized,
{
    match expr.kind() {
        ExprKind::Module => visitor.visit_module(expr),
        ExprKind::Let => visitor.visit_let(expr),
        ExprKind::And => visitor.visit_and(expr),
        ExprKind::Or => visitor.visit_or(expr),
        ExprKind::Not => visitor.visit_not(expr),
        ExprKind::Bit => visitor.visit_bit(expr),
        ExprKind::Symbol => visitor.visit_symbol(expr),
    }
}

/// Visit each child of `expr` in order.
pub fn walk_children<'a, V>(visitor: &mut V, expr: &'a Expr)
where
    V: Visitor<'a> + ?Sized,
{
    for child in expr.children() {
        visitor.visit_expr(child);
    }
}

/// Count the nodes in a tree.
pub fn count_nodes(expr: &Expr) -> usize {
    struct Counter(usize);
    impl<'a> Visitor<'a> for Counter {
        fn visit_expr(&mut self, expr: &'a Expr) {
            self.0 += 1;
            walk_expr(self, expr);
        }
    }
    let mut counter = Counter(0);
    counter.visit_expr(expr);
    counter.0
}

/// The number of nodes on the longest path from `expr` down to a leaf.
pub fn depth(expr: &Expr) -> usize {
    struct Depth {
        current: usize,
        max: usize,
    }
    impl<'a> Visitor<'a> for Depth {
        fn visit_expr(&mut self, expr: &'a Expr) {
            self.current += 1;
            self.max = std::cmp::max(self.max, self.current);
            walk_expr(self, expr);
            self.current -= 1;
        }
    }
    let mut d = Depth { current: 0, max: 0 };
    d.visit_expr(expr);
    d.max
}

/// Collect the symbols in a tree that no `let` binds, in order of their first
/// occurrence.
///
/// A `let` statement in a module binds its name for the statements that
/// follow it in that module and in modules nested within them. The bound
/// expression itself does not see the binding.
pub fn free_symbols(expr: &Expr) -> Vec<&str> {
    #[derive(Default)]
    struct FreeSymbols<'a> {
        bound: Vec<&'a str>,
        free: Vec<&'a str>,
    }
    impl<'a> Visitor<'a> for FreeSymbols<'a> {
        fn visit_module(&mut self, expr: &'a Expr) {
            let scope = self.bound.len();
            for stmt in expr.children() {
                self.visit_expr(stmt);
                if let Some(name) = stmt.let_name() {
                    self.bound.push(name);
                }
            }
            self.bound.truncate(scope);
        }

        fn visit_symbol(&mut self, expr: &'a Expr) {
            let name = expr.label();
            if !self.bound.contains(&name) && !self.free.contains(&name) {
                self.free.push(name);
            }
        }
    }
    let mut v = FreeSymbols::default();
    v.visit_expr(expr);
    v.free
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::*;

    fn sample() -> Expr {
        build_module(vec![
            build_let("t", build_and(build_bit("a"), build_symbol("u"))),
            build_or(build_symbol("t"), build_not(build_symbol("v"))),
            build_symbol("u"),
        ])
    }

    #[test]
    fn counts_nodes() {
        assert_eq!(count_nodes(&build_bit("a")), 1);
        assert_eq!(count_nodes(&sample()), 10);
        assert_eq!(count_nodes(&build_module(vec![])), 1);
    }

    #[test]
    fn measures_depth() {
        assert_eq!(depth(&build_bit("a")), 1);
        assert_eq!(depth(&build_not(build_not(build_bit("a")))), 3);
        assert_eq!(depth(&sample()), 4);
    }

    #[test]
    fn finds_free_symbols() {
        assert_eq!(free_symbols(&sample()), vec!["u", "v"]);
    }

    #[test]
    fn binding_not_visible_to_itself() {
        let e = build_module(vec![build_let("x", build_symbol("x")), build_symbol("x")]);
        assert_eq!(free_symbols(&e), vec!["x"]);
    }

    #[test]
    fn binding_scoped_to_module() {
        let e = build_module(vec![
            build_module(vec![build_let("x", build_bit("a")), build_symbol("x")]),
            build_symbol("x"),
        ]);
        assert_eq!(free_symbols(&e), vec!["x"]);
    }

    #[test]
    fn bit_visitor_sees_every_bit() {
        struct Bits<'a>(Vec<&'a str>);
        impl<'a> Visitor<'a> for Bits<'a> {
            fn visit_bit(&mut self, expr: &'a Expr) {
                self.0.push(expr.label());
            }
        }
        let e = build_and(build_bit("p"), build_or(build_bit("q"), build_symbol("r")));
        let mut v = Bits(vec![]);
        v.visit_expr(&e);
        assert_eq!(v.0, vec!["p", "q"]);
    }
}
