//! JSON host boundary for the Earth Mover's Distance.
//!
//! Accepts the four signature columns as JSON arrays and prints the
//! marshalled result: a bare number, or with --flows a 2-tuple of the
//! distance and the (from, to, amount) flow list.

use clap::Parser;
use earthmover::*;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Features of the first signature, a JSON array of numbers.
    #[arg(long)]
    feature1: String,
    /// Features of the second signature, a JSON array of numbers.
    #[arg(long)]
    feature2: String,
    /// Weights of the first signature, same length as feature1.
    #[arg(long)]
    weight1: String,
    /// Weights of the second signature, same length as feature2.
    #[arg(long)]
    weight2: String,
    /// Also emit the optimal flows.
    #[arg(long)]
    flows: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(value) => println!("{}", value),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let feature1 = serde_json::from_str::<serde_json::Value>(&args.feature1)?;
    let feature2 = serde_json::from_str::<serde_json::Value>(&args.feature2)?;
    let weight1 = serde_json::from_str::<serde_json::Value>(&args.weight1)?;
    let weight2 = serde_json::from_str::<serde_json::Value>(&args.weight2)?;
    let outcome = Query {
        feature1: &feature1,
        feature2: &feature2,
        weight1: &weight1,
        weight2: &weight2,
        return_flows: args.flows,
    }
    .resolve()?;
    Ok(serde_json::Value::from(outcome))
}
