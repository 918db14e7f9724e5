mod common;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use cantolang::builtins::PRINT;
use cantolang::{Environment, Interpreter, Object};

/// `講` would flood the bench output, so it is swapped for a silent stand-in.
fn quiet_interpreter() -> Interpreter {
    fn discard(_: &[Object]) -> Object {
        Object::Null
    }
    let mut interpreter = Interpreter::new();
    interpreter.builtins_mut().register(PRINT, discard);
    interpreter
}

fn bench_interpreter(c: &mut Criterion) {
    let interpreter = quiet_interpreter();
    for (label, path) in common::workloads() {
        let program = common::load_program(&path);

        c.bench_function(&format!("interpreter_total_{label}"), |b| {
            b.iter(|| {
                let mut environment = Environment::new();
                let result = interpreter.evaluate(black_box(&program), &mut environment);
                assert!(!result.is_error(), "{label} failed: {}", result.inspect());
                black_box(result);
            })
        });
    }
}

criterion_group!(benches, bench_interpreter);
criterion_main!(benches);
