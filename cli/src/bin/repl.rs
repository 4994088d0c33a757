use cli::format_answer;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tinyfn::Defn;

/// Reads s-expression fragments one line at a time. Definitions
/// accumulate across the session; an expression triggers a compile
/// and run against everything accumulated so far. The virtual
/// machine instance is reused, but `execute` resets its own state on
/// every call, so nothing leaks between evaluations.
fn main() {
    let mut editor = DefaultEditor::new().expect("failed to initialize line editor");
    let mut defns: Vec<Defn> = Vec::new();
    let mut vm = tinyfn::Vm::new();

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                eval_line(&line, &mut defns, &mut vm);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("readline error: {}", err);
                break;
            }
        }
    }
}

fn eval_line(line: &str, defns: &mut Vec<Defn>, vm: &mut tinyfn::Vm) {
    let program = match lang_parser::parse(line) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("{}", err);
            return;
        }
    };

    for defn in program.defns {
        if defns.iter().any(|d| d.name == defn.name) {
            eprintln!("function `{}` defined more than once", defn.name);
            return;
        }
        defns.push(defn);
    }

    let Some(body) = program.body else { return };

    let instrs = match tinyfn::compile(&defns[..], Some(&body)) {
        Ok(instrs) => instrs,
        Err(err) => {
            eprintln!("{}", err);
            return;
        }
    };

    match vm.execute(&instrs) {
        Ok(answer) => println!("{}", format_answer(answer)),
        Err(err) => eprintln!("{}", err),
    }
}
