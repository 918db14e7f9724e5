#![allow(dead_code)]
use std::fs;
use std::path::Path;

use cantolang::ast::Program;
use cantolang::parser;
use test_support::load_cases;

/// Fixture programs that opt into benchmarking, as `(label, path)` pairs.
pub fn workloads() -> Vec<(String, String)> {
    let cases = load_cases(Path::new("tests/programs")).unwrap_or_else(|err| panic!("{err:#}"));
    cases
        .into_iter()
        .filter(|case| case.spec.bench.enabled)
        .map(|case| (case.name, case.program_path.display().to_string()))
        .collect()
}

pub fn load_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|err| panic!("read {path}: {err}"))
}

pub fn load_program(path: &str) -> Program {
    let source = load_source(path);
    parser::parse(&source).unwrap_or_else(|err| panic!("parse {path}: {err}"))
}
