use clap::{Parser, Subcommand};
use shelf::model::BookId;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shelf", bin_name = "shelf", version)]
#[command(about = "Keep track of the books you own and have read", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $SHELF_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Fields shared by `add` and `edit`. Numbers are taken as text and checked
/// by the form, so bad input is reported the same way everywhere.
#[derive(clap::Args, Debug, Default)]
pub struct BookFields {
    /// Book title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Author name
    #[arg(short, long)]
    pub author: Option<String>,

    /// Publication year
    #[arg(short, long)]
    pub year: Option<String>,

    /// Number of pages
    #[arg(short, long)]
    pub pages: Option<String>,

    /// Cover image file
    #[arg(short, long, value_name = "IMAGE")]
    pub cover: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List books
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only show books whose title contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Search books by title
    #[command(display_order = 2)]
    Search { query: String },

    /// Add a book
    #[command(alias = "n", display_order = 3)]
    Add {
        #[command(flatten)]
        fields: BookFields,
    },

    /// Edit a book (only the given fields change)
    #[command(alias = "e", display_order = 4)]
    Edit {
        /// Id of the book
        id: BookId,

        #[command(flatten)]
        fields: BookFields,
    },

    /// Show one or more books
    #[command(alias = "v", display_order = 5)]
    View {
        /// Ids of the books
        #[arg(required = true, num_args = 1..)]
        ids: Vec<BookId>,
    },

    /// Flip the read flag of a book
    #[command(alias = "read", display_order = 6)]
    Toggle {
        /// Id of the book
        id: BookId,
    },

    /// Delete a book
    #[command(alias = "rm", display_order = 7)]
    Delete {
        /// Id of the book
        id: BookId,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Get or set configuration
    #[command(display_order = 8)]
    Config {
        /// Configuration key (storage-key, confirm-delete)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_fields() {
        let cli = Cli::try_parse_from([
            "shelf", "add", "--title", "Dune", "-a", "Herbert", "--year", "1965",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add { fields }) => {
                assert_eq!(fields.title.as_deref(), Some("Dune"));
                assert_eq!(fields.author.as_deref(), Some("Herbert"));
                assert_eq!(fields.year.as_deref(), Some("1965"));
                assert!(fields.pages.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_ids() {
        let cli = Cli::try_parse_from(["shelf", "rm", "42", "-y"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Delete { id: BookId(42), yes: true })
        ));
        assert!(Cli::try_parse_from(["shelf", "toggle", "abc"]).is_err());
    }

    #[test]
    fn read_is_an_alias_for_toggle() {
        let cli = Cli::try_parse_from(["shelf", "read", "7"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Toggle { id: BookId(7) })));
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["shelf", "list", "--home", "/tmp/x", "-v"]).unwrap();
        assert_eq!(cli.home, Some(PathBuf::from("/tmp/x")));
        assert!(cli.verbose);
    }
}
