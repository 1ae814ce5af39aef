use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the canonical form of a filter string
    Normalize {
        #[arg(long, help = "Filter string")]
        filter: String,
    },
    /// List the parsed terms in order
    Terms {
        #[arg(long, help = "Filter string")]
        filter: String,

        #[arg(long, help = "If set, prints the terms as JSON instead of a table")]
        json: bool,
    },
    Get {
        #[arg(long, help = "Filter string")]
        filter: String,

        #[arg(long, help = "Keyword to look up")]
        keyword: String,
    },
    Set {
        #[arg(long, help = "Filter string")]
        filter: String,

        #[arg(long)]
        keyword: String,

        #[arg(long)]
        value: String,

        /// One of "~", "=", ">", "<", ":"
        #[arg(long, default_value = "=")]
        relation: String,
    },
    Delete {
        #[arg(long, help = "Filter string")]
        filter: String,

        #[arg(long)]
        keyword: String,
    },
    /// Filter for the next page
    Next {
        #[arg(long, help = "Filter string")]
        filter: String,
    },
    /// Filter for the previous page
    Previous {
        #[arg(long, help = "Filter string")]
        filter: String,
    },
    /// Filter for the first page
    First {
        #[arg(long, help = "Filter string")]
        filter: String,
    },
    /// Filter returning all rows on one page
    All {
        #[arg(long, help = "Filter string")]
        filter: String,
    },
    /// Filter without paging and sorting keywords
    Simple {
        #[arg(long, help = "Filter string")]
        filter: String,
    },
    /// Selection criteria only, without paging and sorting
    Criteria {
        #[arg(long, help = "Filter string")]
        filter: String,
    },
    Equals {
        #[arg(long, help = "Filter string")]
        filter: String,

        #[arg(long, help = "Filter string to compare against")]
        other: String,
    },
    /// Convert a saved filter record (JSON) into a filter string
    FromRecord {
        #[arg(long, help = "Path to the JSON record")]
        path: String,
    },
}
