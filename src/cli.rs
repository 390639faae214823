/*
 * Responsibility
 * - Command-line surface of the console; parsing only, no behavior
 */
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "birdworld-console",
    version,
    about = "Administrative console for the Birds of the World catalog"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current session and role
    Whoami,
    /// Browse and manage birds
    Birds {
        #[command(subcommand)]
        command: BirdsCommand,
    },
    /// Browse and manage habitats
    Habitats {
        #[command(subcommand)]
        command: HabitatsCommand,
    },
    /// Browse global regions
    Regions {
        #[command(subcommand)]
        command: RegionsCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum BirdsCommand {
    /// List one page of birds
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show a single bird
    Show { id: u64 },
    /// Add a new bird (owner only)
    Add {
        #[arg(long)]
        common_name: String,
        #[arg(long)]
        species: String,
        #[arg(long, default_value = "")]
        image_link: String,
        /// Habitat id to attach; repeatable
        #[arg(long = "habitat")]
        habitats: Vec<u64>,
        /// Create this habitat inline and attach it to the new bird
        #[arg(long, requires = "new_habitat_region")]
        new_habitat: Option<String>,
        /// Region id for the inline habitat
        #[arg(long)]
        new_habitat_region: Option<u64>,
    },
    /// Edit an existing bird (owner only)
    Edit {
        id: u64,
        #[arg(long)]
        common_name: Option<String>,
        #[arg(long)]
        species: Option<String>,
        #[arg(long)]
        image_link: Option<String>,
        /// Replace the habitat list; repeatable
        #[arg(long = "habitat")]
        habitats: Vec<u64>,
    },
    /// Delete a bird (owner only)
    Delete { id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum HabitatsCommand {
    /// List one page of habitats
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show a single habitat
    Show { id: u64 },
    /// Typeahead search over habitat names
    Search { query: String },
    /// Add a new habitat (owner only)
    Add {
        #[arg(long)]
        name: String,
        /// Region id the habitat belongs to
        #[arg(long)]
        region: u64,
    },
    /// Edit an existing habitat (owner only)
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        region: Option<u64>,
    },
    /// Delete a habitat (owner only)
    Delete { id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum RegionsCommand {
    /// List all regions
    List,
}
