use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::process::ExitCode;
use std::thread;

use anyhow::{Context, Result, anyhow, bail};
use log::debug;

use cantolang::parser::ParseErrors;
use cantolang::{EvalConfig, Environment, Interpreter, Object};

/// Evaluation recurses on the host stack, so give it room for the default call depth.
const WORKER_STACK_SIZE: usize = 64 * 1024 * 1024;

const EXIT_RUNTIME_ERROR: u8 = 1;
const EXIT_PARSE_ERROR: u8 = 2;

struct Options {
    config: EvalConfig,
    input_path: Option<String>,
}

fn parse_args() -> Result<Options> {
    let mut args = std::env::args().skip(1);
    let mut config = EvalConfig::default();
    let mut input_path: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--max-depth" | "-d" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("Missing call depth after {arg}"))?;
                config.max_call_depth = value
                    .parse()
                    .with_context(|| format!("Invalid call depth '{value}'"))?;
            }
            _ => {
                input_path = Some(arg);
                if args.next().is_some() {
                    bail!("Only one input file is supported");
                }
                break;
            }
        }
    }

    Ok(Options { config, input_path })
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let options = parse_args()?;

    let worker = thread::Builder::new()
        .name("cantolang".to_string())
        .stack_size(WORKER_STACK_SIZE)
        .spawn(move || run(options))
        .context("Spawning interpreter thread")?;
    let status = worker
        .join()
        .map_err(|_| anyhow!("Interpreter thread panicked"))??;
    Ok(ExitCode::from(status))
}

fn run(options: Options) -> Result<u8> {
    let interpreter = Interpreter::with_config(options.config);
    let source = match options.input_path.as_deref() {
        None => {
            repl(&interpreter)?;
            return Ok(0);
        }
        Some("-") => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Reading stdin")?;
            buffer
        }
        Some(path) => fs::read_to_string(path).with_context(|| format!("Reading {path}"))?,
    };

    let mut environment = Environment::new();
    let status = match interpreter.run(&source, &mut environment) {
        Err(errors) => {
            report_parse_errors(&errors);
            EXIT_PARSE_ERROR
        }
        Ok(Object::Error(error)) => {
            eprintln!("{error}");
            EXIT_RUNTIME_ERROR
        }
        Ok(value) => {
            debug!("program finished with {}", value.inspect());
            0
        }
    };
    Ok(status)
}

fn report_parse_errors(errors: &ParseErrors) {
    for error in &errors.0 {
        eprintln!("{error}");
    }
}

/// Line-at-a-time prompt. Every line runs in the same root scope, so earlier
/// definitions stay visible.
fn repl(interpreter: &Interpreter) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut environment = Environment::new();
    let mut line = String::new();

    loop {
        write!(stdout, ">> ")?;
        stdout.flush().context("Flushing prompt")?;
        line.clear();
        if stdin
            .lock()
            .read_line(&mut line)
            .context("Reading stdin")?
            == 0
        {
            writeln!(stdout)?;
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }

        match interpreter.run(&line, &mut environment) {
            Err(errors) => report_parse_errors(&errors),
            Ok(Object::Error(error)) => eprintln!("{error}"),
            Ok(Object::Null) => {}
            Ok(value) => writeln!(stdout, "{}", value.inspect())?,
        }
    }
}
