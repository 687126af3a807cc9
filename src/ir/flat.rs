// Copyright (c) 2016-2021 Fabian Schuiki

//! Flat, index-linked expressions.
//!
//! A [`FlatExpr`] lists the nodes of a tree in post-order, with children
//! referred to by their index in the list. Identical subtrees are stored
//! once. This is the shape in which an e-graph ingests an expression.

use crate::builder::build;
use crate::error::BuildError;
use crate::expr::Expr;
use crate::kind::ExprKind;
use crate::print::SYMBOL_SIGIL;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A node whose children are indices into the enclosing [`FlatExpr`].
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FlatNode {
    /// The role of the node.
    pub kind: ExprKind,
    /// The label of the node.
    pub label: String,
    /// The indices of the children.
    pub children: Vec<usize>,
}

/// A post-order list of nodes. Children always precede their parents and the
/// root comes last.
#[derive(Clone, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
pub struct FlatExpr {
    nodes: Vec<FlatNode>,
}

impl FlatExpr {
    /// Wrap a list of nodes. The list is checked when converted back into a
    /// tree.
    pub fn from_nodes(nodes: Vec<FlatNode>) -> FlatExpr {
        FlatExpr { nodes }
    }

    /// The nodes, in post-order.
    pub fn nodes(&self) -> &[FlatNode] {
        &self.nodes
    }

    /// The number of distinct nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether there are no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The index of the root node.
    pub fn root(&self) -> Option<usize> {
        self.nodes.len().checked_sub(1)
    }

    /// The number of nodes the tree rooted at the last node has once shared
    /// nodes are expanded.
    ///
    /// Returns `None` if the list is empty, if a node refers to a child that
    /// does not precede it, or if the count does not fit in a `usize`.
    pub fn expanded_len(&self) -> Option<usize> {
        let mut sizes: Vec<usize> = Vec::with_capacity(self.nodes.len());
        for (index, node) in self.nodes.iter().enumerate() {
            let mut size: usize = 1;
            for &child in &node.children {
                if child >= index {
                    return None;
                }
                size = size.checked_add(sizes[child])?;
            }
            sizes.push(size);
        }
        sizes.pop()
    }

    /// Rebuild the tree rooted at the last node.
    ///
    /// Shared nodes are expanded into independent copies. Fails if a node
    /// refers to a child that does not precede it, or if a node has the wrong
    /// number of children or the wrong label for its kind.
    ///
    /// The rebuilt tree can be exponentially larger than the list: a chain of
    /// `n` nodes that each use the previous one twice expands into `2^n - 1`
    /// tree nodes. Check [`expanded_len`] first when the list comes from
    /// outside the program.
    ///
    /// [`expanded_len`]: FlatExpr::expanded_len
    pub fn to_expr(&self) -> Result<Expr, BuildError> {
        let mut built: Vec<Expr> = Vec::with_capacity(self.nodes.len());
        for (index, node) in self.nodes.iter().enumerate() {
            let mut children = Vec::with_capacity(node.children.len());
            for &child in &node.children {
                if child >= index {
                    return Err(BuildError::DanglingIndex { node: index, child });
                }
                children.push(built[child].clone());
            }
            built.push(build(node.kind, node.label.clone(), children)?);
        }
        built.pop().ok_or(BuildError::Empty)
    }
}

/// Flatten a tree, storing identical subtrees once.
pub fn flatten(expr: &Expr) -> FlatExpr {
    let mut f = Flattener::default();
    f.add(expr);
    debug!(
        "flattened {} into {} distinct nodes",
        expr.kind(),
        f.nodes.len()
    );
    FlatExpr { nodes: f.nodes }
}

#[derive(Default)]
struct Flattener {
    nodes: Vec<FlatNode>,
    memo: HashMap<FlatNode, usize>,
}

impl Flattener {
    fn add(&mut self, expr: &Expr) -> usize {
        let children = expr.children().iter().map(|c| self.add(c)).collect();
        let node = FlatNode {
            kind: expr.kind(),
            label: expr.label().to_string(),
            children,
        };
        if let Some(&index) = self.memo.get(&node) {
            return index;
        }
        let index = self.nodes.len();
        self.nodes.push(node.clone());
        self.memo.insert(node, index);
        index
    }
}

impl fmt::Display for FlatNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let operands = self.children.iter().map(|c| format!("_{}", c)).join(" ");
        match self.kind {
            ExprKind::Bit => write!(f, "{}", self.label),
            ExprKind::Symbol => write!(f, "{}{}", SYMBOL_SIGIL, self.label),
            ExprKind::Let => write!(f, "let {} {}", self.label, operands),
            ExprKind::Module if self.children.is_empty() => write!(f, "{}", self.label),
            ExprKind::Module | ExprKind::And | ExprKind::Or | ExprKind::Not => {
                write!(f, "{} {}", self.label, operands)
            }
        }
    }
}

impl fmt::Display for FlatExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, node) in self.nodes.iter().enumerate() {
            write!(f, "_{} = {}\n", index, node)?;
        }
        Ok(())
    }
}
