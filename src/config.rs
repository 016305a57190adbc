use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rank the most frequent words in a directory of text files")]
pub struct Args {
    /// Top x number of words
    #[arg(short, long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    pub top_count: u32,

    /// Path to the text files
    #[arg(short = 'p', long, default_value = "./txtfiles")]
    pub files_path: PathBuf,

    /// Pattern to look up files
    #[arg(short = 'f', long, default_value = "*.txt")]
    pub file_pattern: String,

    /// Don't create the graph image
    #[arg(long)]
    pub no_graph: bool,

    /// Path to use when creating the graph image
    #[arg(short, long, default_value = "./zipf.png")]
    pub graph_path: PathBuf,

    /// Show results in terminal
    #[arg(short = 's', long)]
    pub cli_out: bool,

    /// Format of the terminal results
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `word<TAB><TAB>count` line per word
    #[default]
    Text,
    /// A JSON array of `{"word", "count"}` objects
    Json,
}

/// Settings for a single run, fixed once parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub top_count: usize,
    pub files_path: PathBuf,
    pub file_pattern: String,
    pub no_graph: bool,
    pub graph_path: PathBuf,
    pub cli_out: bool,
    pub format: OutputFormat,
}

impl Config {
    /// The glob expanded by the collector: `<files-path>/<file-pattern>`.
    pub fn search_pattern(&self) -> String {
        self.files_path
            .join(&self.file_pattern)
            .to_string_lossy()
            .into_owned()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            top_count: 20,
            files_path: PathBuf::from("./txtfiles"),
            file_pattern: "*.txt".to_string(),
            no_graph: false,
            graph_path: PathBuf::from("./zipf.png"),
            cli_out: false,
            format: OutputFormat::Text,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            top_count: args.top_count as usize,
            files_path: args.files_path,
            file_pattern: args.file_pattern,
            no_graph: args.no_graph,
            graph_path: args.graph_path,
            cli_out: args.cli_out,
            format: args.format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_config_default() {
        let args = Args::try_parse_from(["zipf"]).unwrap();
        assert_eq!(Config::from(args), Config::default());
    }

    #[test]
    fn parses_short_and_long_flags() {
        let args = Args::try_parse_from([
            "zipf",
            "-t",
            "5",
            "--files-path",
            "books",
            "-f",
            "*.md",
            "--no-graph",
            "-s",
            "--format",
            "json",
        ])
        .unwrap();
        let config = Config::from(args);
        assert_eq!(config.top_count, 5);
        assert_eq!(config.files_path, PathBuf::from("books"));
        assert_eq!(config.file_pattern, "*.md");
        assert!(config.no_graph);
        assert!(config.cli_out);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn rejects_zero_top_count() {
        assert!(Args::try_parse_from(["zipf", "--top-count", "0"]).is_err());
    }

    #[test]
    fn search_pattern_joins_path_and_pattern() {
        let config = Config {
            files_path: PathBuf::from("books"),
            file_pattern: "*.txt".to_string(),
            ..Config::default()
        };
        let expected = PathBuf::from("books").join("*.txt");
        assert_eq!(config.search_pattern(), expected.to_string_lossy());
    }
}
