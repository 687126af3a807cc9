// Copyright (c) 2016-2021 Fabian Schuiki
#![allow(dead_code)]

//! Utilities for IR tests.

pub use boolnet_ir::*;

/// Install a logger for the test run. Later calls are no-ops.
pub fn init_logger() {
    simple_logger::init().is_ok();
}

/// A handful of trees that cover every node kind.
pub fn samples() -> Vec<Expr> {
    vec![
        build_bit("a"),
        build_symbol("s"),
        build_module(vec![]),
        build_and(build_bit("a"), build_not(build_symbol("b"))),
        build_or(build_symbol("x"), build_bit("data[3]")),
        build_module(vec![
            build_let(
                "carry",
                build_or(
                    build_and(build_bit("a"), build_bit("b")),
                    build_and(build_bit("cin"), build_or(build_bit("a"), build_bit("b"))),
                ),
            ),
            build_let("sum", build_not(build_symbol("carry"))),
            build_module(vec![build_symbol("sum"), build_bit("a")]),
        ]),
    ]
}

/// Parse a single expression, panicking with the diagnostic on failure.
pub fn parse(text: &str) -> Expr {
    match parse::parse_expr(text) {
        Ok(e) => e,
        Err(d) => panic!("{}", d),
    }
}
