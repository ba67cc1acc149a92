use std::{
    error::Error,
    io::{self, Write},
};

use minic::{lexer, parser, util::tree};

fn main() {
    if let Err(error) = run() {
        println!("failed to run: {error}");
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        input.clear();
        let n = io::stdin().read_line(&mut input)?;

        if n == 0 {
            println!("^D");
            return Ok(());
        }

        let tokens = match lexer::tokenize(&input) {
            Ok(tokens) => tokens,
            Err(error) => {
                println!("lexical error: {error}");
                continue;
            }
        };
        println!("{tokens:?}");

        match parser::parse(&tokens) {
            Ok(program) => print!("{}", tree::print_program_string(&program)),
            Err(error) => println!("syntax error: {error}"),
        }
    }
}
