// order-export: render an order snapshot into a paginated PDF report

use clap::Parser;
use std::path::Path;

use order_export::{default_output_name, export_order, load_order, ExportError, Variant};

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Render an order snapshot into a PDF report")]
struct Args {
    /// Order snapshot file (JSON)
    #[arg(short = 'O', long)]
    order: String,

    /// Report audience
    #[arg(short, long, value_enum, default_value_t = Variant::Seller)]
    variant: Variant,

    /// Output filename (defaults to order_<id>.pdf)
    #[arg(short, long)]
    output: Option<String>,
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ExportError> {
    let args = Args::parse();

    let order = load_order(&args.order)?;
    let output = args
        .output
        .unwrap_or_else(|| default_output_name(&order.id));

    let summary = export_order(&order, args.variant, Path::new(&output))?;

    println!("✓ Generated: {}", output);
    println!("  Order: {}", order.id);
    println!("  Variant: {:?}", args.variant);
    println!("  Pages: {}", summary.pages);

    Ok(())
}
