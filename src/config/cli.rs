use crate::core::catalog::ComponentFilter;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "energy-seller")]
#[command(about = "Quote, preview and publish energy offerings")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// JSON catalog replacing the demo offerings (overrides catalog.seed_file)
    #[arg(long)]
    pub catalog: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List offerings matching a search
    Offerings {
        /// Case-insensitive match on title, city or component
        #[arg(short, long, default_value = "")]
        query: String,

        /// Component name, or "All"
        #[arg(long, default_value = "All")]
        component: ComponentFilter,

        #[arg(long)]
        only_available: bool,
    },

    /// Price an energy block
    Quote {
        /// Energy in kWh
        #[arg(long)]
        energy: String,

        /// Unit price in INR/kWh
        #[arg(long, required_unless_present = "offering", conflicts_with = "offering")]
        price: Option<String>,

        /// Take the unit price from this offering and clamp energy to its range
        #[arg(long)]
        offering: Option<String>,
    },

    /// Print or save the payload that publishing would send
    Preview {
        #[arg(long)]
        offering: String,

        /// Energy in kWh (defaults to the offering minimum)
        #[arg(long)]
        energy: Option<String>,

        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Publish an offering through the configured order-intake service
    Publish {
        #[arg(long)]
        offering: String,

        /// Energy in kWh (defaults to the offering minimum)
        #[arg(long)]
        energy: Option<String>,
    },
}
