use clap::{Parser as ClapParser, Subcommand};
use mbql_expr::cli::{self, CliError, ExpressionOptions};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "mbqlx")]
#[command(about = "mbqlx - quote, classify and format custom expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote text as a literal or identifier
    Quote {
        text: String,

        /// Quote character: ", ' or [ (empty for none)
        #[arg(short, long, default_value = "\"")]
        style: String,
    },

    /// Reverse quoting; the style is taken from the first character
    Unquote { text: String },

    /// Format a column, metric or segment name as an identifier
    Identifier {
        name: String,

        /// Quote character to use when quoting is needed
        #[arg(short, long)]
        style: Option<String>,

        /// Leave plain words unquoted
        #[arg(long)]
        allow_bare: bool,

        /// Editor configuration file (JSON)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Classify an MBQL expression
    Classify {
        #[command(flatten)]
        args: ExpressionArgs,
    },

    /// Format an MBQL expression as editor text
    Format {
        #[command(flatten)]
        args: ExpressionArgs,
    },

    /// Tokenize custom-expression text
    Tokenize {
        text: String,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

#[derive(clap::Args)]
struct ExpressionArgs {
    /// MBQL expression as JSON (reads from stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Query metadata file (JSON)
    #[arg(short, long)]
    metadata: Option<String>,

    /// Editor configuration file (JSON)
    #[arg(short, long)]
    config: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Quote { text, style } => cli::execute_quote(&text, &style).map(print_line),
        Commands::Unquote { text } => cli::execute_unquote(&text).map(print_line),
        Commands::Identifier {
            name,
            style,
            allow_bare,
            config,
        } => read_file(config).and_then(|config| {
            cli::execute_identifier(&name, style.as_deref(), allow_bare, config.as_deref())
                .map(print_line)
        }),
        Commands::Classify { args } => expression_options(args)
            .and_then(|options| cli::execute_classify(&options))
            .and_then(|value| serde_json::to_string_pretty(&value).map_err(CliError::Json))
            .map(print_line),
        Commands::Format { args } => expression_options(args)
            .and_then(|options| cli::execute_format(&options))
            .map(print_line),
        Commands::Tokenize { text, pretty } => {
            let tokenized = cli::execute_tokenize(&text);
            let json = if pretty {
                serde_json::to_string_pretty(&tokenized)
            } else {
                serde_json::to_string(&tokenized)
            };
            json.map(print_line).map_err(CliError::Json)
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn print_line(output: String) {
    println!("{}", output);
}

fn read_file(path: Option<String>) -> Result<Option<String>, CliError> {
    path.map(std::fs::read_to_string)
        .transpose()
        .map_err(CliError::Io)
}

fn expression_options(args: ExpressionArgs) -> Result<ExpressionOptions, CliError> {
    let input = match args.input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    Ok(ExpressionOptions {
        input,
        metadata: read_file(args.metadata)?,
        config: read_file(args.config)?,
    })
}
