use std::cell::RefCell;
use std::env;
use std::rc::Rc;

use alang_fsa::{compile, parse, MutableAlphabet};

fn main() {
    let mut args = env::args().skip(1);
    let pattern = match args.next() {
        Some(s) => s,
        None => {
            eprintln!("Usage: fsa-cli <pattern> [symbol ...]");
            return;
        }
    };

    let symbols: Vec<String> = args.collect();

    match parse(&pattern) {
        Ok(expr) => {
            println!("Pattern: {pattern}");
            println!("Expression: {expr}");

            let alphabet = Rc::new(RefCell::new(MutableAlphabet::new()));
            let mfa = compile(&expr, alphabet);
            println!("MFA: {mfa}");

            if !symbols.is_empty() {
                let refs: Vec<&str> = symbols.iter().map(String::as_str).collect();
                println!("Input: {symbols:?}");
                println!("Accepts: {}", mfa.accepts(refs));
            }
        }
        Err(e) => eprintln!("Parse error: {e}"),
    }
}
