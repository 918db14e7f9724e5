use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

pub const PROGRAM_FILE: &str = "program.canto";

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CaseClass {
    RuntimeSuccess,
    ParseError,
    RuntimeError,
}

impl CaseClass {
    /// Exit status the binary uses for this class of outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            CaseClass::RuntimeSuccess => 0,
            CaseClass::RuntimeError => 1,
            CaseClass::ParseError => 2,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BenchConfig {
    pub enabled: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExpectedOutcome {
    pub exit_code: i32,
    pub stdout_file: Option<String>,
    pub stderr_file: Option<String>,
    pub stderr_contains_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CaseSpec {
    pub class: CaseClass,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub bench: BenchConfig,
    pub expected: ExpectedOutcome,
}

#[derive(Debug, Clone)]
pub struct Case {
    pub name: String,
    pub dir: PathBuf,
    pub program_path: PathBuf,
    pub spec: CaseSpec,
}

impl Case {
    pub fn read_text(&self, relative_path: &str) -> Result<String> {
        fs::read_to_string(self.dir.join(relative_path))
            .with_context(|| format!("Reading {} fixture file {}", self.name, relative_path))
    }

    pub fn read_program(&self) -> Result<String> {
        fs::read_to_string(&self.program_path)
            .with_context(|| format!("Reading program for {}", self.name))
    }
}

pub fn load_cases(programs_dir: &Path) -> Result<Vec<Case>> {
    let mut cases = Vec::new();

    for entry in
        fs::read_dir(programs_dir).with_context(|| format!("Reading {}", programs_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }

        let case_path = path.join("case.yaml");
        if !case_path.exists() {
            continue;
        }

        let program_path = path.join(PROGRAM_FILE);
        ensure!(
            program_path.exists(),
            "Missing {PROGRAM_FILE} for case {}",
            path.display()
        );

        let case_name = path
            .file_name()
            .and_then(|value| value.to_str())
            .map(str::to_string)
            .with_context(|| format!("Invalid case directory name {}", path.display()))?;
        let case_raw = fs::read_to_string(&case_path)
            .with_context(|| format!("Reading {}", case_path.display()))?;
        let spec: CaseSpec = serde_yaml::from_str(&case_raw)
            .with_context(|| format!("Parsing {}", case_path.display()))?;
        ensure!(
            spec.expected.exit_code == spec.class.exit_code(),
            "Case {case_name} expects exit code {} but its class implies {}",
            spec.expected.exit_code,
            spec.class.exit_code()
        );

        cases.push(Case {
            name: case_name,
            dir: path,
            program_path,
            spec,
        });
    }

    ensure!(
        !cases.is_empty(),
        "No test cases found in {}",
        programs_dir.display()
    );
    cases.sort_by(|left, right| left.name.cmp(&right.name));
    Ok(cases)
}

pub fn normalize_output(output: &str) -> String {
    output.replace("\r\n", "\n").trim_end().to_string()
}

/// Runs the interpreter binary on a case's program with the case's extra arguments.
pub fn run_binary(binary: &Path, case: &Case) -> Result<Output> {
    Command::new(binary)
        .args(&case.spec.args)
        .arg(&case.program_path)
        .output()
        .with_context(|| format!("Running {} on {}", binary.display(), case.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_yaml() {
        let raw = "
class: runtime_error
args: [--max-depth, '10']
expected:
  exit_code: 1
  stderr_contains_file: expected_error
";
        let spec: CaseSpec = serde_yaml::from_str(raw).expect("case should parse");
        assert_eq!(spec.class, CaseClass::RuntimeError);
        assert_eq!(spec.args, vec!["--max-depth", "10"]);
        assert!(!spec.bench.enabled);
        assert_eq!(
            spec.expected.stderr_contains_file.as_deref(),
            Some("expected_error")
        );
    }

    #[test]
    fn normalizes_line_endings_and_trailing_space() {
        assert_eq!(normalize_output("a\r\nb\n\n"), "a\nb");
    }
}
