//! Command line interface.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "search-connector", version)]
#[command(about = "Index upstream sources into Enterprise Search", long_about = None)]
pub struct Cli {
    /// Source to index; the default object source when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Index VAC objects (questions and answers)
    Vac,
    /// Index the employee directory
    Smoelenboek,
    /// Index collaboration-platform pages
    Pages,
    /// Register a website with the engine crawler and start a crawl
    Domain {
        /// Root URL of the website, e.g. https://www.example.nl
        url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_default_source() {
        let cli = Cli::try_parse_from(["search-connector"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_subcommands() {
        let parse = |args: &[&str]| Cli::try_parse_from(args).unwrap().command;

        assert_eq!(parse(&["search-connector", "vac"]), Some(Command::Vac));
        assert_eq!(
            parse(&["search-connector", "smoelenboek"]),
            Some(Command::Smoelenboek)
        );
        assert_eq!(parse(&["search-connector", "pages"]), Some(Command::Pages));
        assert_eq!(
            parse(&["search-connector", "domain", "https://www.example.nl"]),
            Some(Command::Domain {
                url: "https://www.example.nl".to_string()
            })
        );
    }

    #[test]
    fn test_domain_requires_url() {
        assert!(Cli::try_parse_from(["search-connector", "domain"]).is_err());
        assert!(Cli::try_parse_from(["search-connector", "unknown"]).is_err());
    }
}
