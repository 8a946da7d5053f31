use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use vitrine::{config, listing, output, pipeline};

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Static catalog generator for a second-hand shop inventory")]
#[command(long_about = "\
Static catalog generator for a second-hand shop inventory

Every markdown document in the content directory describes one item. A header
block holds the item's fields, the body holds its title, photos and sections.

Content structure:

  objets/
  ├── config.toml                  # Optional, see 'vitrine gen-config'
  ├── 001-cheval-a-bascule.md
  └── 002-lampe-champignon.md

Document layout:

  ---
  id: 12
  catégorie: jouets
  prix_vente_souhaité: 45
  statut: en_stock
  tags: [bois, vintage]
  ---
  # Cheval à bascule
  ![[cheval-1.jpg]]
  ## Description commerciale
  Cheval en bois massif.

Output (in the output directory):

  index.html                       # Catalog with category filters
  produit-<id>.html                # One detail page per item
  js/filter.js
  css/style.css                    # Written only if missing

Run without a command to build.")]
#[command(version)]
struct Cli {
    /// Content directory holding the item documents
    #[arg(long, default_value = "objets", global = true)]
    source: PathBuf,

    /// Output directory for the generated pages
    #[arg(long, default_value = ".", global = true)]
    output: PathBuf,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the detail pages, the index page and the filter script
    Build,
    /// Parse every document and report, without writing anything
    Check,
    /// Write index.json listing the documents of the content directory
    Index,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;
            let outcome = pipeline::build(&cli.source, &cli.output, &site_config)?;
            output::print_build_outcome(&outcome);
        }
        Command::Check => {
            let site_config = config::load_config(&cli.source)?;
            let outcome = pipeline::check(&cli.source, &site_config)?;
            output::print_build_outcome(&outcome);
        }
        Command::Index => {
            let outcome = listing::write_listing(&cli.source)?;
            output::print_listing(&outcome);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn setup_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::new("vitrine=warn"),
        1 => EnvFilter::new("vitrine=info"),
        _ => EnvFilter::new("vitrine=debug"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
