//! # mdtoc
//!
//! Print the table of contents of a markdown document.
//!
//! ## Usage
//!
//! Indented list of headings with anchors:
//! ```sh
//! mdtoc README.md
//! ```
//!
//! JSON for other tools:
//! ```sh
//! mdtoc -o json README.md
//! ```
//!
//! Link list to paste back into the document:
//! ```sh
//! mdtoc -o markdown --min-depth 2 README.md
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, OutputFormat};
use color_eyre::Result;
use log::{LevelFilter, debug};
use mdtoc::pipeline::Processor;
use mdtoc::{Config, Error, Toc, input, remark_toc_headings};
use std::process;

fn main() -> Result<()> {
    color_eyre::install()?;

    // Handle dynamic shell completions
    #[cfg(feature = "unstable-dynamic")]
    clap_complete::CompleteEnv::with_factory(|| {
        use clap::CommandFactory;
        Cli::command()
    })
    .complete();

    let args = Cli::parse();
    init_logging(args.verbose);

    // Priority: CLI args > config file > defaults
    let mut config = Config::load();
    apply_overrides(&mut config, &args);

    if args.init_config {
        let path = config.save()?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let source = match input::read_input(args.file.as_deref()) {
        Ok(source) => source,
        Err(Error::NoInput) => {
            eprintln!("Error: markdown file argument is required");
            eprintln!("\nUsage: mdtoc [OPTIONS] <FILE>");
            eprintln!("       mdtoc [OPTIONS] -");
            eprintln!("       cat doc.md | mdtoc [OPTIONS]");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            process::exit(1);
        }
    };

    debug!("read {} bytes of markdown", source.content().len());

    let processor = Processor::with_options(config.parse).plugin(remark_toc_headings());
    debug!("{processor:?}");
    let file = processor.process(source.into_file())?;

    let toc = file
        .data
        .toc
        .unwrap_or_default()
        .filter_depth(config.output.min_depth, config.output.max_depth);

    if args.count {
        print_depth_counts(&toc);
        return Ok(());
    }

    let format = args.output.unwrap_or_else(|| {
        OutputFormat::from_config(&config.output.format).unwrap_or_else(|| {
            log::warn!(
                "unknown output format {:?} in config, using plain",
                config.output.format
            );
            OutputFormat::Plain
        })
    });

    match format {
        OutputFormat::Plain => print_plain(&toc, config.output.min_depth),
        OutputFormat::Json if args.nested => {
            let sections = toc.build_tree().to_sections();
            println!("{}", serde_json::to_string_pretty(&sections)?);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&toc)?),
        OutputFormat::Tree => print!("{}", toc.build_tree().render_box_tree()),
        OutputFormat::Markdown => print!(
            "{}",
            toc.build_tree()
                .to_markdown_list(&config.output.bullet, config.output.indent)
        ),
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn apply_overrides(config: &mut Config, args: &Cli) {
    if args.gfm {
        config.parse.gfm = true;
    }
    if args.front_matter {
        config.parse.front_matter = true;
    }
    if let Some(min) = args.min_depth {
        config.output.min_depth = min;
    }
    if let Some(max) = args.max_depth {
        config.output.max_depth = max;
    }
    if let Some(format) = args.output {
        config.output.format = format.name().to_string();
    }
}

fn print_plain(toc: &Toc, min_depth: usize) {
    for entry in toc {
        let indent = "  ".repeat(entry.depth.saturating_sub(min_depth));
        println!("{}{}  {}", indent, entry.value, entry.url);
    }
}

fn print_depth_counts(toc: &Toc) {
    println!("Heading counts:");
    for (depth, count) in toc.depth_counts() {
        let prefix = "#".repeat(depth);
        println!("  {}: {}", prefix, count);
    }
    println!("\nTotal: {}", toc.len());
}
