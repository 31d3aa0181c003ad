use auto_gallery::imaging::RustBackend;
use auto_gallery::process::{self, ProcessConfig, ProcessError, RunOutcome};
use auto_gallery::scan::ScanError;
use auto_gallery::{config, output};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "auto-gallery")]
#[command(about = "Turn a folder tree of photos into thumbnails, optimized copies and JSON manifests")]
#[command(long_about = "\
Turn a folder tree of photos into thumbnails, optimized copies and JSON manifests

Every folder under the source that directly holds .jpg/.jpeg files becomes
one gallery folder. Paths are mirrored into the output:

  links/makax-2024/15032024-Concierto.jpg
    → thumbs/makax-2024/15032024-Concierto.jpg      600px wide
    → optimized/makax-2024/15032024-Concierto.jpg   at most 1600px wide
    → json/makax-2024.json                          records of the folder

After the last folder, photos-data.json (every record) and json/index.json
(folder id → summary) are written to the output root.

Metadata resolution (first available wins):
  Date:     DDMMYYYY filename prefix → year in folder path (Jan 1) → today
  Title:    filename without date prefix (15032024-Concierto-Rock.jpg → \"Concierto Rock\")
  Event:    known events (Tamborrada, San Fermín, Makax, Aste Nagusia) → folder name
  Category: 'deportiva' anywhere in the path → deportiva (+ sport keyword), else general

Run 'auto-gallery gen-config' to generate a documented auto-gallery.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Folder tree of source photos (overrides the config file)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Where thumbs/, optimized/, json/ and photos-data.json go (overrides the config file)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Config file
    #[arg(long, default_value = config::CONFIG_FILE_NAME, global = true)]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// List photo folders and their inferred metadata without writing anything
    Check,
    /// Print a stock auto-gallery.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    ctrlc::set_handler(|| {
        println!();
        println!("Cancelled");
        std::process::exit(0);
    })?;

    match cli.command {
        Some(Command::GenConfig) => {
            print!("{}", config::stock_config_toml());
        }
        Some(Command::Check) => {
            let config = resolve_config(&cli)?;
            println!("==> Checking {}", config.source.display());
            match process::plan_folders(&config.source) {
                Ok(plans) => output::print_check_output(&plans),
                Err(ProcessError::Scan(ScanError::SourceNotFound(path))) => {
                    eprintln!("Error: source folder {} not found", path.display());
                }
                Err(e) => return Err(e.into()),
            }
        }
        None => {
            let config = resolve_config(&cli)?;
            run(&config)?;
        }
    }

    Ok(())
}

/// Full conversion: derivatives, per-folder manifests, then the aggregate and index.
fn run(config: &ProcessConfig) -> Result<(), Box<dyn std::error::Error>> {
    output::print_banner(
        version_string(),
        &config.source.display().to_string(),
        &config.output.display().to_string(),
    );

    if !RustBackend::jpeg_available() {
        eprintln!("Error: this build was compiled without JPEG support");
        return Ok(());
    }

    match process::run(config, |event| output::print_process_event(&event))? {
        RunOutcome::SourceNotFound(path) => {
            eprintln!("Error: source folder {} not found", path.display());
        }
        RunOutcome::NoPhotos => println!("No photos found to process"),
        RunOutcome::Completed(gallery) => output::print_summary(&gallery),
    }
    Ok(())
}

/// Load the config file and apply command-line overrides.
fn resolve_config(cli: &Cli) -> Result<ProcessConfig, config::ConfigError> {
    let mut gallery_config = config::load_config(&cli.config)?;
    if let Some(source) = &cli.source {
        gallery_config.source = source.clone();
    }
    if let Some(output) = &cli.output {
        gallery_config.output = output.clone();
    }
    Ok(ProcessConfig::from_gallery_config(&gallery_config))
}

/// Warnings by default; each `-v` adds a level. `RUST_LOG` directives win.
fn setup_logging(verbosity: u8) {
    log_builder(verbosity, std::env::var("RUST_LOG").ok().as_deref()).init();
}

fn log_builder(verbosity: u8, rust_log: Option<&str>) -> env_logger::Builder {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Some(filters) = rust_log {
        builder.parse_filters(filters);
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_sets_level() {
        assert_eq!(log_builder(0, None).build().filter(), LevelFilter::Warn);
        assert_eq!(log_builder(1, None).build().filter(), LevelFilter::Info);
        assert_eq!(log_builder(2, None).build().filter(), LevelFilter::Debug);
        assert_eq!(log_builder(5, None).build().filter(), LevelFilter::Trace);
    }

    #[test]
    fn rust_log_overrides_verbosity() {
        assert_eq!(
            log_builder(0, Some("debug")).build().filter(),
            LevelFilter::Debug
        );
        assert_eq!(
            log_builder(3, Some("error")).build().filter(),
            LevelFilter::Error
        );
    }

    #[test]
    fn module_directive_keeps_default_level() {
        let logger = log_builder(1, Some("auto_gallery::scan=trace")).build();
        assert_eq!(logger.filter(), LevelFilter::Trace);
        let metadata = log::Metadata::builder()
            .level(log::Level::Debug)
            .target("auto_gallery::process")
            .build();
        assert!(!log::Log::enabled(&logger, &metadata));
    }

    #[test]
    fn version_string_is_not_empty() {
        let version = version_string();
        assert!(version == env!("CARGO_PKG_VERSION") || version.starts_with("dev@"));
    }

    #[test]
    fn cli_parses_overrides() {
        let cli = Cli::parse_from(["auto-gallery", "--source", "fotos", "-vv", "check"]);
        assert_eq!(cli.source, Some(PathBuf::from("fotos")));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Command::Check)));
    }
}
