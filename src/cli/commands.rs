use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

#[cfg(feature = "unstable-dynamic")]
use clap_complete::engine::{ArgValueCompleter, CompletionCandidate, ValueCompleter};

#[derive(Parser, Debug)]
#[command(name = "mdtoc")]
#[command(version)]
#[command(about = "Extract a table of contents from a markdown document")]
#[command(
    long_about = "mdtoc - print the headings of a markdown document with unique anchor links.\n\n\
    Every heading becomes an entry with its plain text, its level and a GitHub-style\n\
    #slug anchor. Repeated headings get -1, -2, ... suffixes.\n\n\
    Examples:\n  \
    mdtoc README.md                 # Indented plain list\n  \
    mdtoc -o json README.md         # Flat JSON array\n  \
    mdtoc -o json --nested doc.md   # Nested JSON sections\n  \
    mdtoc -o markdown doc.md        # Link list to paste into the document\n  \
    cat doc.md | mdtoc -o tree      # Read from stdin"
)]
pub struct Cli {
    /// Markdown file (.md or .markdown), or '-' for stdin
    ///
    /// If no file is given and stdin is piped, input is read from stdin.
    #[arg(add = markdown_file_completer())]
    pub file: Option<PathBuf>,

    /// Output format
    ///
    ///   plain    - Indented text with anchors
    ///   json     - JSON array of {value, url, depth}
    ///   tree     - Box-drawing tree
    ///   markdown - Nested list of links
    ///
    /// Defaults to the config file setting, then "plain".
    #[arg(short = 'o', long = "output")]
    pub output: Option<OutputFormat>,

    /// Shallowest heading level to include (1-6)
    #[arg(long = "min-depth", value_name = "LEVEL")]
    pub min_depth: Option<usize>,

    /// Deepest heading level to include (1-6)
    ///
    /// Example: --max-depth 2 keeps only # and ## headings
    #[arg(short = 'd', long = "max-depth", value_name = "LEVEL")]
    pub max_depth: Option<usize>,

    /// Emit nested sections instead of a flat array (json output only)
    #[arg(long = "nested")]
    pub nested: bool,

    /// Enable GitHub Flavored Markdown (tables, strikethrough, task lists, footnotes)
    #[arg(long = "gfm")]
    pub gfm: bool,

    /// Skip a leading YAML front matter block
    #[arg(long = "front-matter")]
    pub front_matter: bool,

    /// Count headings by level instead of listing them
    #[arg(long = "count")]
    pub count: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Write the current settings to the config file and exit
    #[arg(long = "init-config")]
    pub init_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// JSON output
    Json,
    /// Tree format with box-drawing
    Tree,
    /// Nested markdown link list
    Markdown,
}

impl OutputFormat {
    /// Parse a config file value, ignoring case.
    pub fn from_config(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, true).ok()
    }

    /// Name as written in the config file and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
            OutputFormat::Tree => "tree",
            OutputFormat::Markdown => "markdown",
        }
    }
}

#[cfg(feature = "unstable-dynamic")]
fn markdown_file_completer() -> ArgValueCompleter {
    use std::ffi::OsStr;
    use std::path::Path;

    struct MarkdownCompleter;

    impl ValueCompleter for MarkdownCompleter {
        fn complete(&self, current: &OsStr) -> Vec<CompletionCandidate> {
            let input_str = current.to_string_lossy();
            let input_path = Path::new(input_str.as_ref());

            // "docs/READ" completes "READ" inside "docs"; a trailing separator
            // lists the directory itself.
            let (search_dir, prefix) =
                if input_str.ends_with('/') || input_str.ends_with('\\') {
                    (input_path, String::new())
                } else {
                    let parent = input_path
                        .parent()
                        .filter(|p| !p.as_os_str().is_empty())
                        .unwrap_or(Path::new("."));
                    let prefix = input_path
                        .file_name()
                        .map(|s| s.to_string_lossy().to_lowercase())
                        .unwrap_or_default();
                    (parent, prefix)
                };

            let Ok(entries) = std::fs::read_dir(search_dir) else {
                return vec![];
            };

            entries
                .filter_map(Result::ok)
                .filter_map(|entry| {
                    let path = entry.path();
                    let file_name = path.file_name()?.to_string_lossy().to_string();
                    if !file_name.to_lowercase().starts_with(&prefix) {
                        return None;
                    }

                    let value = if search_dir == Path::new(".") {
                        file_name
                    } else {
                        search_dir.join(&file_name).to_string_lossy().to_string()
                    };

                    if path.is_dir() {
                        let value = if value.ends_with('/') {
                            value
                        } else {
                            format!("{value}/")
                        };
                        Some(CompletionCandidate::new(value).help(Some("directory".into())))
                    } else if is_markdown(&path) {
                        Some(CompletionCandidate::new(value))
                    } else {
                        None
                    }
                })
                .collect()
        }
    }

    fn is_markdown(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| ext == "md" || ext == "markdown")
    }

    ArgValueCompleter::new(MarkdownCompleter)
}

#[cfg(not(feature = "unstable-dynamic"))]
fn markdown_file_completer() -> clap::builder::ValueHint {
    clap::ValueHint::FilePath
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "mdtoc", "-o", "json", "--nested", "-d", "3", "--gfm", "-vv", "doc.md",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(cli.nested);
        assert_eq!(cli.max_depth, Some(3));
        assert!(cli.gfm);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.file, Some(PathBuf::from("doc.md")));
    }

    #[test]
    fn test_output_format_from_config() {
        assert_eq!(OutputFormat::from_config("markdown"), Some(OutputFormat::Markdown));
        assert_eq!(OutputFormat::from_config("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_config("yaml"), None);

        for format in OutputFormat::value_variants() {
            assert_eq!(OutputFormat::from_config(format.name()), Some(*format));
        }
    }
}
