use clap::{Parser, Subcommand};

mod cli;

use cli::convert::FloatFormatArg;

#[derive(Parser)]
#[command(name = "fixvm")]
#[command(about = "Fixed-point constant evaluator steps")]
struct Cli {
    /// Byte order for encode/decode (le, be). Falls back to FIXVM_BYTE_ORDER.
    #[arg(long = "byte-order", global = true)]
    byte_order: Option<String>,
    /// Print one JSON object instead of key=value lines.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs one primitive step, e.g. `eval add 3.5@s8.4 4.5@s8.4`.
    Eval {
        /// Destination width of a binary step; unary steps reject it.
        #[arg(long)]
        width: Option<u16>,
        op: String,
        #[arg(required = true, num_args = 1..=2, allow_hyphen_values = true)]
        operands: Vec<String>,
    },
    Convert {
        #[arg(long = "range-only")]
        range_only: bool,
        #[arg(allow_hyphen_values = true)]
        value: String,
        semantics: String,
    },
    ToInt {
        #[arg(allow_hyphen_values = true)]
        value: String,
        bits: u16,
    },
    FromInt {
        #[arg(allow_hyphen_values = true)]
        integer: String,
        semantics: String,
    },
    Float {
        #[arg(long, value_enum, default_value_t = FloatFormatArg::Double)]
        format: FloatFormatArg,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    FromFloat {
        #[arg(allow_hyphen_values = true)]
        number: f64,
        semantics: String,
    },
    Compare {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,
    },
    Encode {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    Decode {
        hex: String,
    },
}

fn main() {
    cli::init_tracing();
    let cli = Cli::parse();
    if let Err(err) = cli::configure_byte_order(cli.byte_order.as_deref()) {
        eprintln!("{}", err);
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Eval {
            width,
            op,
            operands,
        } => cli::eval::run_eval(&op, &operands, width),
        Commands::Convert {
            range_only,
            value,
            semantics,
        } => cli::convert::run_convert(&value, &semantics, range_only),
        Commands::ToInt { value, bits } => cli::convert::run_to_int(&value, bits),
        Commands::FromInt { integer, semantics } => {
            cli::convert::run_from_int(&integer, &semantics)
        }
        Commands::Float { format, value } => cli::convert::run_float(&value, format),
        Commands::FromFloat { number, semantics } => {
            cli::convert::run_from_float(number, &semantics)
        }
        Commands::Compare { a, b } => cli::convert::run_compare(&a, &b),
        Commands::Encode { value } => cli::codec::run_encode(&value),
        Commands::Decode { hex } => cli::codec::run_decode(&hex),
    };

    match result {
        Ok(report) => report.print(cli.json),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
