use clap::Parser;
use concalc::get_result;

/// concalc is an embeddable calculator engine with complex numbers, arrays
/// and polynomials.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Computes factorials with a gamma approximation instead of the exact
    /// big-integer product.
    #[arg(short, long)]
    fast: bool,

    /// The expression to evaluate; `:` separates multiple terms.
    expression: String,
}

fn main() {
    let args = Args::parse();

    match get_result(&args.expression, args.fast) {
        Ok(values) => {
            for value in values {
                println!("{value}");
            }
        },
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}
