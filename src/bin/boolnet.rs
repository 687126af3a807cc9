// Copyright (c) 2016-2021 Fabian Schuiki

//! Read, check, and convert boolean expression trees.

#[macro_use]
extern crate log;

use boolnet::errors::*;
use boolnet::ir::{self, flat, ident, parse, print, visit, Expr};
use boolnet::source::get_source_manager;
use boolnet::{Session, Verbosity};
use clap::{App, Arg, ArgMatches};
use std::io::Read;
use std::str::FromStr;

/// The form in which trees are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emit {
    Sexpr,
    Pretty,
    Json,
    Flat,
    FlatJson,
    Debug,
}

impl FromStr for Emit {
    type Err = ();

    fn from_str(s: &str) -> Result<Emit, ()> {
        match s {
            "sexpr" => Ok(Emit::Sexpr),
            "pretty" => Ok(Emit::Pretty),
            "json" => Ok(Emit::Json),
            "flat" => Ok(Emit::Flat),
            "flat-json" => Ok(Emit::FlatJson),
            "debug" => Ok(Emit::Debug),
            _ => Err(()),
        }
    }
}

fn main() {
    let matches = App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Read, check, and convert boolean expression trees for netlist synthesis.")
        .arg(
            Arg::with_name("verbosity")
                .short("v")
                .multiple(true)
                .help("Increase message verbosity"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .help("Silence all log output"),
        )
        .arg(
            Arg::with_name("verbosity-opts")
                .short("V")
                .help("Print additional information on stderr")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .possible_values(&["trees", "flat", "stats"]),
        )
        .arg(
            Arg::with_name("emit")
                .long("emit")
                .value_name("FORMAT")
                .help("Output format")
                .takes_value(true)
                .default_value("sexpr")
                .possible_values(&["sexpr", "pretty", "json", "flat", "flat-json", "debug"]),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .value_name("COLUMNS")
                .help("Line width for pretty printed output")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("check")
                .long("check")
                .help("Reject trees with malformed let, bit, or symbol names"),
        )
        .arg(
            Arg::with_name("wrap")
                .long("wrap")
                .help("Wrap the statements of each input file in a module"),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("The input files to read, or `-` for stdin")
                .multiple(true)
                .required(true),
        )
        .get_matches();

    // Configure the logger.
    let level = if matches.is_present("quiet") {
        log::LevelFilter::Off
    } else {
        match matches.occurrences_of("verbosity") {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    let mut logger = pretty_env_logger::formatted_builder();
    logger.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    // Configure the session.
    let mut session = Session::new();
    session.opts.check_idents = matches.is_present("check");
    if let Some(width) = matches.value_of("width") {
        session.opts.width = usize::from_str(width).unwrap_or_else(|_| {
            clap::Error {
                message: format!("invalid value for 'width': `{}`", width),
                kind: clap::ErrorKind::InvalidValue,
                info: None,
            }
            .exit()
        });
    }
    for v in matches
        .values_of("verbosity-opts")
        .into_iter()
        .flat_map(|v| v)
    {
        session.opts.verbosity |= match v {
            "trees" => Verbosity::TREES,
            "flat" => Verbosity::FLAT,
            "stats" => Verbosity::STATS,
            _ => unreachable!(),
        };
    }
    debug!("{:?}", session.opts);

    let emit = matches
        .value_of("emit")
        .and_then(|v| Emit::from_str(v).ok())
        .unwrap_or(Emit::Sexpr);
    process(&session, &matches, emit);

    if session.failed() {
        std::process::exit(1);
    }
}

fn process(sess: &Session, matches: &ArgMatches, emit: Emit) {
    let sm = get_source_manager();
    for filename in matches.values_of("INPUT").into_iter().flat_map(|v| v) {
        let source = if filename == "-" {
            let mut content = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut content) {
                sess.emit(DiagBuilder2::fatal(format!("unable to read stdin: {}", e)));
                continue;
            }
            sm.add_anonymous(content)
        } else {
            match sm.open(filename) {
                Ok(s) => s,
                Err(e) => {
                    sess.emit(DiagBuilder2::fatal(format!(
                        "unable to open input file `{}`: {}",
                        filename, e
                    )));
                    continue;
                }
            }
        };
        info!("reading {}", filename);

        let exprs = match parse::parse(source) {
            Ok(x) => x,
            Err(diag) => {
                sess.emit(diag);
                continue;
            }
        };
        let exprs = if matches.is_present("wrap") {
            vec![ir::build_module(exprs)]
        } else {
            exprs
        };
        for expr in &exprs {
            emit_expr(sess, filename, expr, emit);
        }
    }
}

fn emit_expr(sess: &Session, filename: &str, expr: &Expr, emit: Emit) {
    if sess.opts.check_idents {
        if let Err(e) = ident::validate(expr) {
            sess.emit(DiagBuilder2::from(e).add_note(format!("in `{}`", filename)));
            return;
        }
    }

    if sess.has_verbosity(Verbosity::TREES) {
        eprintln!("{:#?}", expr);
    }
    if sess.has_verbosity(Verbosity::FLAT) {
        eprint!("{}", flat::flatten(expr));
    }
    if sess.has_verbosity(Verbosity::STATS) {
        eprintln!(
            "{}: {} nodes, depth {}, free symbols [{}]",
            filename,
            visit::count_nodes(expr),
            visit::depth(expr),
            visit::free_symbols(expr).join(", ")
        );
    }

    match emit {
        Emit::Sexpr => println!("{}", expr),
        Emit::Pretty => println!("{}", print::pretty(expr, sess.opts.width)),
        Emit::Json => match serde_json::to_string(expr) {
            Ok(s) => println!("{}", s),
            Err(e) => sess.emit(DiagBuilder2::bug(format!("unable to serialize tree: {}", e))),
        },
        Emit::Flat => print!("{}", flat::flatten(expr)),
        Emit::FlatJson => match serde_json::to_string(&flat::flatten(expr)) {
            Ok(s) => println!("{}", s),
            Err(e) => sess.emit(DiagBuilder2::bug(format!("unable to serialize tree: {}", e))),
        },
        Emit::Debug => println!("{:#?}", expr),
    }
}
