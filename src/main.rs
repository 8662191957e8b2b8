mod cli;

use std::process;

use clap::Parser as _;
use stylescript::syntax::{Lexer, Parser};

use crate::cli::{Cli, Command};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Parse { expr } => {
            let mut parser = Parser::new(&expr);
            match parser.parse() {
                Ok(ast) => println!("{ast:#?}"),
                Err(why) => {
                    eprintln!("{why}");
                    process::exit(1);
                }
            }
        }
        Command::Lex { expr } => {
            for token in Lexer::new(&expr) {
                println!("{:>3}:{:<3} {:?}", token.pos.line, token.pos.offset, token.kind);
            }
        }
    }
}
