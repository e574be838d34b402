//! squat-scout - typosquat domain discovery
//!
//! Enumerates look-alike variants of a domain label, checks which of them
//! resolve and geolocates every address that answers.

use anyhow::{bail, Context};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{InquireError, Text};
use squat_scout::{
    candidate_domains,
    config::ResolverKind,
    output::{render_json, render_report, render_summary},
    BaseName, DigResolver, IpInfoLocator, Resolver, ScanConfig, Scanner, SystemResolver,
};
use std::env;
use std::io::{BufRead, IsTerminal};
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize the library
    if let Err(e) = squat_scout::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    let options = match CliOptions::parse(env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("❌ {}", message);
            eprintln!("💡 Use --help for usage information");
            process::exit(2);
        }
    };

    if options.help {
        print_help();
        return;
    }
    if options.version {
        println!("squat-scout {}", squat_scout::VERSION);
        return;
    }

    init_logging(options.verbose);

    if let Err(e) = run(options).await {
        eprintln!("❌ Error: {:#}", e);
        process::exit(1);
    }
}

/// Command line options
#[derive(Debug, Default)]
struct CliOptions {
    domain: Option<String>,
    dry_run: bool,
    json: bool,
    progress: bool,
    verbose: u8,
    help: bool,
    version: bool,
}

impl CliOptions {
    fn parse<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = CliOptions {
            progress: true,
            ..Default::default()
        };

        for arg in args {
            match arg.as_str() {
                "-h" | "--help" => options.help = true,
                "-V" | "--version" => options.version = true,
                "--dry-run" => options.dry_run = true,
                "--json" => options.json = true,
                "--no-progress" => options.progress = false,
                flag if is_verbosity_flag(flag) => {
                    let count = u8::try_from(flag.len() - 1).unwrap_or(u8::MAX);
                    options.verbose = options.verbose.saturating_add(count);
                }
                // A single leading hyphen can still be a valid label
                flag if flag.starts_with("--") => {
                    return Err(format!("Unknown option: {}", flag));
                }
                _ => {
                    if options.domain.is_some() {
                        return Err("Only one base domain can be checked per run".to_string());
                    }
                    options.domain = Some(arg);
                }
            }
        }

        Ok(options)
    }
}

/// `-v`, `-vv`, `-vvv`, ...
fn is_verbosity_flag(arg: &str) -> bool {
    arg.strip_prefix('-')
        .map_or(false, |rest| !rest.is_empty() && rest.chars().all(|c| c == 'v'))
}

/// Main scan workflow
async fn run(options: CliOptions) -> anyhow::Result<()> {
    let raw = match options.domain {
        Some(domain) => domain,
        None => match read_base_domain()? {
            Some(domain) => domain,
            None => return Ok(()),
        },
    };

    let base = match BaseName::parse(&raw) {
        Ok(base) => base,
        Err(e) => {
            tracing::debug!(input = %raw, error = %e, "Rejected base domain");
            println!("{}", e.user_message());
            return Ok(());
        }
    };

    let config = ScanConfig::from_env().context("Failed to load configuration")?;

    if options.dry_run {
        let candidates = candidate_domains(&base, &config.suffixes);
        if options.json {
            println!("{}", serde_json::to_string_pretty(&candidates)?);
        } else {
            for candidate in &candidates {
                println!("{}", candidate);
            }
        }
        eprintln!("Generated {} candidates for {}", candidates.len(), base);
        return Ok(());
    }

    let resolver: Arc<dyn Resolver> = match &config.resolver {
        ResolverKind::Dig { program } => {
            let dig = DigResolver::new(program.clone());
            dig.ensure_available().await?;
            Arc::new(dig)
        }
        ResolverKind::System => Arc::new(SystemResolver::new()),
    };

    if !config.has_api_token() {
        tracing::warn!(
            "IPINFO_TOKEN is not set; geolocation requests are anonymous and heavily rate-limited"
        );
    }
    let locator = Arc::new(
        IpInfoLocator::new(&config.geo, config.timeout).context("Failed to build geolocation client")?,
    );

    tracing::info!(
        base = %base,
        resolver = %config.resolver,
        suffixes = config.suffixes.len(),
        concurrency = config.concurrency,
        geo_concurrency = config.geo_concurrency,
        "Configuration loaded"
    );

    let mut scanner = Scanner::new(config, resolver, locator);
    let progress = if options.progress && !options.json {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("🔍 [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} candidates")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        scanner = scanner.with_progress(bar.clone());
        Some(bar)
    } else {
        None
    };

    let report = scanner.scan_base(&base).await?;

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    if options.json {
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_report(&report));
        print!("{}", render_summary(&report, &scanner.get_metrics_snapshot()));
    }

    Ok(())
}

/// Prompt for the base label, or read one line when stdin is not a terminal
fn read_base_domain() -> anyhow::Result<Option<String>> {
    if !std::io::stdin().is_terminal() {
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read base domain from stdin")?;
        return Ok(Some(line));
    }

    match Text::new("Enter the base domain name you want to check (e.g., facebook):")
        .with_help_message("Label only, without the TLD")
        .prompt()
    {
        Ok(domain) => Ok(Some(domain)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => bail!("Failed to read base domain: {}", e),
    }
}

/// Initialize logging; RUST_LOG takes precedence over -v flags
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Print help information
fn print_help() {
    println!("🕵️  squat-scout - typosquat domain discovery");
    println!("═══════════════════════════════════════════");
    println!();
    println!("USAGE:");
    println!("    squat-scout [OPTIONS] [BASE_DOMAIN]");
    println!();
    println!("    BASE_DOMAIN is a bare label such as 'facebook' (letters, digits, hyphens).");
    println!("    When omitted it is read interactively.");
    println!();
    println!("OPTIONS:");
    println!("    --dry-run        Print candidate domains without resolving them");
    println!("    --json           Print the report as JSON");
    println!("    --no-progress    Hide the progress bar");
    println!("    -v, -vv, -vvv    Increase log verbosity (RUST_LOG overrides)");
    println!("    -V, --version    Print version");
    println!("    -h, --help       Print this help");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    IPINFO_TOKEN                  ipinfo.io API token");
    println!("    IPINFO_BASE_URL               Geolocation endpoint (default: https://ipinfo.io)");
    println!("    SQUAT_SCOUT_TLDS              Comma-separated suffixes (default: .com,.org,.net,...)");
    println!("    SQUAT_SCOUT_CONCURRENCY       Concurrent DNS resolutions (default: 16)");
    println!("    SQUAT_SCOUT_GEO_CONCURRENCY   Concurrent geolocation calls (default: 4)");
    println!("    SQUAT_SCOUT_TIMEOUT_SECS      Per-call timeout in seconds (default: 10)");
    println!("    SQUAT_SCOUT_RESOLVER          dig or system (default: dig)");
    println!("    SQUAT_SCOUT_DIG_PATH          dig executable (default: dig)");
    println!();
    println!("EXAMPLES:");
    println!("    squat-scout facebook");
    println!("    squat-scout --dry-run paypal");
    println!("    SQUAT_SCOUT_TLDS=com,net squat-scout --json github");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions, String> {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_flags() {
        let options = parse(&["--dry-run", "--json", "-vv", "facebook"]).unwrap();
        assert!(options.dry_run);
        assert!(options.json);
        assert!(options.progress);
        assert_eq!(options.verbose, 2);
        assert_eq!(options.domain.as_deref(), Some("facebook"));
    }

    #[test]
    fn test_repeated_verbosity_flags() {
        let options = parse(&["-vvv", "facebook"]).unwrap();
        assert_eq!(options.verbose, 3);
        assert_eq!(options.domain.as_deref(), Some("facebook"));

        let options = parse(&["-v", "-vv", "facebook"]).unwrap();
        assert_eq!(options.verbose, 3);
    }

    #[test]
    fn test_hyphen_labels_are_not_flags() {
        let options = parse(&["-my-site"]).unwrap();
        assert_eq!(options.domain.as_deref(), Some("-my-site"));
    }

    #[test]
    fn test_rejects_unknown_option_and_extra_domains() {
        assert!(parse(&["--fast"]).is_err());
        assert!(parse(&["google", "facebook"]).is_err());
    }
}
