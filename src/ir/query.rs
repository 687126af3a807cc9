// Copyright (c) 2016-2021 Fabian Schuiki

//! Accessors that take a tree apart by kind.

use crate::expr::Expr;
use crate::kind::ExprKind;

impl Expr {
    /// The statements of a module.
    pub fn module_body(&self) -> Option<&[Expr]> {
        if self.kind() == ExprKind::Module {
            Some(self.children())
        } else {
            None
        }
    }

    /// Take the statements out of a module. Returns the node unchanged if it
    /// is not a module.
    pub fn into_module_body(self) -> Result<Vec<Expr>, Expr> {
        if self.kind() == ExprKind::Module {
            Ok(self.into_parts().2)
        } else {
            Err(self)
        }
    }

    /// The name a let binds.
    pub fn let_name(&self) -> Option<&str> {
        if self.kind() == ExprKind::Let {
            Some(self.label())
        } else {
            None
        }
    }

    /// The expression a let binds.
    pub fn let_expr(&self) -> Option<&Expr> {
        if self.kind() == ExprKind::Let {
            self.children().first()
        } else {
            None
        }
    }

    /// Take the name and bound expression out of a let. Returns the node
    /// unchanged if it is not a let.
    pub fn into_let(self) -> Result<(String, Expr), Expr> {
        if self.kind() != ExprKind::Let {
            return Err(self);
        }
        let (_, name, children) = self.into_parts();
        let mut children = children.into_iter();
        match children.next() {
            Some(expr) => Ok((name, expr)),
            None => unreachable!("let without bound expression"),
        }
    }

    /// The name of a bit.
    pub fn bit_name(&self) -> Option<&str> {
        if self.kind() == ExprKind::Bit {
            Some(self.label())
        } else {
            None
        }
    }

    /// The name of a symbol.
    pub fn symbol_name(&self) -> Option<&str> {
        if self.kind() == ExprKind::Symbol {
            Some(self.label())
        } else {
            None
        }
    }

    /// Whether this node is a bit.
    pub fn is_bit(&self) -> bool {
        self.kind() == ExprKind::Bit
    }

    /// Whether this node is a symbol.
    pub fn is_symbol(&self) -> bool {
        self.kind() == ExprKind::Symbol
    }

    /// The operands of a logic operator.
    pub fn operands(&self) -> Option<&[Expr]> {
        if self.kind().is_operator() {
            Some(self.children())
        } else {
            None
        }
    }
}
