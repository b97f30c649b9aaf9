use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// idcard - issue and manage employee ID cards
#[derive(Parser, Debug)]
#[command(name = "idcard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding ids.json and domains.json (overrides IDCARD_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List domains sorted by name
    Domains {
        /// Filter by name or code
        #[arg(long, short)]
        query: Option<String>,

        /// Print as a JSON object {name: code}
        #[arg(long)]
        json: bool,
    },

    /// Register a new domain
    AddDomain {
        name: String,
        /// Positive numeric code, unique across domains
        code: String,
    },

    /// Show the id a card would get, without issuing it
    Preview(PreviewArgs),

    /// Issue a new card
    Create(CreateArgs),

    /// List issued cards, most recent first
    #[command(alias = "ls")]
    List {
        /// Case-insensitive match on id, name or domain
        query: Option<String>,
    },

    /// Show one card
    Show { id: String },

    /// Change a card; its id is recomputed
    Edit(EditArgs),

    /// Delete a card
    #[command(alias = "rm")]
    Delete { id: String },

    /// List selectable years of joining
    Years,
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// P (permanent) or T (temporary)
    #[arg(long = "type", short = 't', default_value = "P")]
    pub employee_type: String,

    #[arg(long, short, default_value = "")]
    pub year: String,

    #[arg(long, short, default_value = "")]
    pub domain: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long, short)]
    pub name: String,

    #[arg(long, short)]
    pub year: String,

    /// P (permanent) or T (temporary)
    #[arg(long = "type", short = 't', default_value = "P")]
    pub employee_type: String,

    #[arg(long, short)]
    pub domain: String,

    /// Image file to embed on the card
    #[arg(long, short)]
    pub photo: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Current id of the card
    pub id: String,

    #[arg(long, short)]
    pub name: Option<String>,

    #[arg(long, short)]
    pub year: Option<String>,

    #[arg(long = "type", short = 't')]
    pub employee_type: Option<String>,

    #[arg(long, short)]
    pub domain: Option<String>,

    /// Replace the photo with this image file
    #[arg(long, short, conflicts_with = "clear_photo")]
    pub photo: Option<PathBuf>,

    /// Remove the photo
    #[arg(long)]
    pub clear_photo: bool,
}
