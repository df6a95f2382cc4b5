use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "phonebook",
    about = "Phonebook: a small contact directory server and client",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Server to talk to for client commands.
    #[arg(long, global = true, env = "PHONEBOOK_SERVER", default_value = "http://127.0.0.1:3001")]
    pub server: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the REST server
    Serve(ServeArgs),
    /// List entries
    List(ListArgs),
    /// Add an entry, or update the number of an existing one
    Add(AddArgs),
    /// Delete an entry by name or id
    Remove(RemoveArgs),
    /// Show the server's info page
    Info,
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// JSON document to persist entries in (in-memory if omitted)
    #[arg(long)]
    pub data: Option<PathBuf>,
    /// Load the sample directory into an empty store
    #[arg(long)]
    pub seed: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only show names containing this text
    #[arg(short, long)]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    pub name: String,
    pub number: String,
    /// Answer yes to the replace-number prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Entry name (case-insensitive) or id
    pub target: String,
    /// Answer yes to the delete prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from([
            "phonebook", "serve", "--bind", "0.0.0.0:8080", "--data", "db.json", "--seed",
        ])
        .unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, Some("0.0.0.0:8080".parse().unwrap()));
            assert_eq!(args.data, Some(PathBuf::from("db.json")));
            assert!(args.seed);
            assert!(args.config.is_none());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_serve_rejects_bad_bind() {
        assert!(Cli::try_parse_from(["phonebook", "serve", "--bind", "nowhere"]).is_err());
    }

    #[test]
    fn parse_add() {
        let cli = Cli::try_parse_from(["phonebook", "add", "Ada Lovelace", "000-000", "-y"]).unwrap();
        if let Command::Add(args) = cli.command {
            assert_eq!(args.name, "Ada Lovelace");
            assert_eq!(args.number, "000-000");
            assert!(args.yes);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_list_filter() {
        let cli = Cli::try_parse_from(["phonebook", "list", "--filter", "ada"]).unwrap();
        if let Command::List(args) = cli.command {
            assert_eq!(args.filter, Some("ada".into()));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_remove() {
        let cli = Cli::try_parse_from(["phonebook", "remove", "Dan Abramov"]).unwrap();
        if let Command::Remove(args) = cli.command {
            assert_eq!(args.target, "Dan Abramov");
            assert!(!args.yes);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_server_flag() {
        let cli = Cli::try_parse_from(["phonebook", "--server", "http://x:1", "info"]).unwrap();
        assert_eq!(cli.server, "http://x:1");
        assert!(matches!(cli.command, Command::Info));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["phonebook", "--verbose", "list"]).unwrap();
        assert!(cli.verbose);
    }
}
