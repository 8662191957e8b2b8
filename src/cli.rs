#[derive(clap::Parser, Debug)]
#[clap(about, long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Command {
    /// Parse an expression and print its AST
    Parse { expr: String },

    /// Print the token stream for an expression
    Lex { expr: String },
}
