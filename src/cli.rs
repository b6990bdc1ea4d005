//! CLI argument parsing with clap.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ipnotes")]
#[command(author, version, about = "Annotate IPv4 addresses and rewrite them in text streams")]
pub struct Cli {
    /// Notes file to ingest, one `<ip> <note>...` record per line
    #[arg(short, long, value_name = "FILE")]
    pub ip_file: Option<PathBuf>,

    /// Data file path (default: ./ipnotes.json, else ~/.ipnotes/ipnotes.json)
    #[arg(short, long, value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// Config file path (default: ~/.ipnotes/config.yaml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Tag mode: ingest tokens as tags and summarize tags
    #[arg(short, long)]
    pub tag: bool,

    /// Read stdin and append notes to every known IP
    #[arg(short = 'a', long)]
    pub interactive: bool,

    /// Show annotations, history and tags
    #[arg(short, long)]
    pub list: bool,

    /// Erase all stored data (asks for confirmation)
    #[arg(short, long)]
    pub erase: bool,

    /// Print current annotations sorted by IP
    #[arg(short, long)]
    pub output_dict: bool,

    /// Print superseded annotations sorted by IP
    #[arg(short = 'H', long)]
    pub output_history: bool,

    /// Print tags sorted by IP
    #[arg(short = 'T', long)]
    pub output_tags: bool,

    /// Print annotations of IPs containing this text
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Print how many IPs carry each tag
    #[arg(short = 'S', long)]
    pub summary: bool,

    /// Drop all history entries of one IP
    #[arg(long, value_name = "IP")]
    pub forget_history: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Number of requested actions; options like `--data-file` do not count.
    pub fn action_count(&self) -> usize {
        [
            self.ip_file.is_some(),
            self.interactive,
            self.list,
            self.erase,
            self.output_dict,
            self.output_history,
            self.output_tags,
            self.search.is_some(),
            self.summary,
            self.forget_history.is_some(),
        ]
        .into_iter()
        .filter(|requested| *requested)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses_help() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_no_arguments_no_actions() {
        let cli = Cli::try_parse_from(["ipnotes"]).unwrap();
        assert_eq!(cli.action_count(), 0);
    }

    #[test]
    fn test_cli_options_are_not_actions() {
        let cli = Cli::try_parse_from([
            "ipnotes",
            "-d",
            "/tmp/data.json",
            "--config",
            "/tmp/c.yaml",
            "-t",
            "-q",
        ])
        .unwrap();
        assert_eq!(cli.action_count(), 0);
        assert!(cli.tag);
        assert!(cli.quiet);
        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/data.json")));
    }

    #[test]
    fn test_cli_ingest_with_tag_mode() {
        let cli = Cli::try_parse_from(["ipnotes", "-i", "notes.txt", "--tag"]).unwrap();
        assert_eq!(cli.ip_file, Some(PathBuf::from("notes.txt")));
        assert!(cli.tag);
        assert_eq!(cli.action_count(), 1);
    }

    #[test]
    fn test_cli_report_flags() {
        let cli = Cli::try_parse_from(["ipnotes", "-o", "-H", "-T", "-S", "-l"]).unwrap();
        assert!(cli.output_dict);
        assert!(cli.output_history);
        assert!(cli.output_tags);
        assert!(cli.summary);
        assert!(cli.list);
        assert_eq!(cli.action_count(), 5);
    }

    #[test]
    fn test_cli_search() {
        let cli = Cli::try_parse_from(["ipnotes", "--search", "192.168"]).unwrap();
        assert_eq!(cli.search.as_deref(), Some("192.168"));
    }

    #[test]
    fn test_cli_interactive_and_erase() {
        let cli = Cli::try_parse_from(["ipnotes", "-a", "-e"]).unwrap();
        assert!(cli.interactive);
        assert!(cli.erase);
        assert_eq!(cli.action_count(), 2);
    }

    #[test]
    fn test_cli_forget_history() {
        let cli = Cli::try_parse_from(["ipnotes", "--forget-history", "10.0.0.1"]).unwrap();
        assert_eq!(cli.forget_history.as_deref(), Some("10.0.0.1"));
        assert_eq!(cli.action_count(), 1);
    }

    #[test]
    fn test_cli_search_requires_value() {
        assert!(Cli::try_parse_from(["ipnotes", "--search"]).is_err());
    }
}
