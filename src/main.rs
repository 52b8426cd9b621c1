use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use regex::Regex;

use depcheck::command::{CheckPlan, ResolveMode, build_resolver, run_check};
use depcheck::config::{CheckerConfig, DEFAULT_GITHUB_API_URL, GITHUB_OUTPUT_ENV};
use depcheck::logging;
use depcheck::sink::{JsonSink, OutputSink, StepOutputSink};
use depcheck::source::{FileSource, GitHubReleaseSource, VersionSource};
use depcheck::version::criteria::OnMalformedEntry;
use depcheck::version::hashers::HttpHasher;
use depcheck::version::normalizer::{NormalizeStrategy, normalize};

#[derive(Parser)]
#[command(name = "depcheck")]
#[command(version, about = "Resolve the latest version of a buildpack dependency")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the latest version and emit its version, uri and sha256
    Resolve(ResolveArgs),
    /// Normalize a single raw version token
    Normalize {
        raw: String,
        #[arg(long, default_value = "strict")]
        normalizer: NormalizeStrategy,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// `key=value` lines, appended to $GITHUB_OUTPUT when set
    StepOutput,
    Json,
}

#[derive(Args)]
struct ResolveArgs {
    /// JSON file mapping raw versions to artifact URIs
    #[arg(long, required_unless_present = "github_repo", conflicts_with = "github_repo")]
    entries: Option<PathBuf>,

    /// Read versions from the releases of this `owner/repo`
    #[arg(long, requires = "asset_pattern")]
    github_repo: Option<String>,

    /// Regex selecting the release asset to download
    #[arg(long)]
    asset_pattern: Option<String>,

    #[arg(long, default_value = DEFAULT_GITHUB_API_URL)]
    github_api_url: String,

    /// JSON config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only raw versions matching this regex are eligible
    #[arg(long)]
    version_pattern: Option<String>,

    /// Exclude versions lower than this one
    #[arg(long)]
    since: Option<String>,

    #[arg(long)]
    no_prerelease: bool,

    #[arg(long)]
    normalizer: Option<NormalizeStrategy>,

    /// Skip unparseable versions with a warning instead of failing
    #[arg(long)]
    skip_malformed: bool,

    /// Add `cpe=updateN` for Java 8 versions
    #[arg(long)]
    java8_cpe: bool,

    /// Additional `key=value` output fields
    #[arg(long = "extra", value_parser = parse_key_value)]
    extra: Vec<(String, String)>,

    /// Emit every version left after filtering instead of only the latest;
    /// step output then uses indexed keys (`version_0`, ...) and `count`
    #[arg(long)]
    all: bool,

    #[arg(long, value_enum, default_value_t = Format::StepOutput)]
    format: Format,
}

impl ResolveArgs {
    fn checker_config(&self) -> anyhow::Result<CheckerConfig> {
        let mut config = match &self.config {
            Some(path) => CheckerConfig::load(path)?,
            None => CheckerConfig::default(),
        };

        if let Some(pattern) = &self.version_pattern {
            config.version_pattern = Some(pattern.clone());
        }
        if let Some(since) = &self.since {
            config.since_version = Some(since.clone());
        }
        if self.no_prerelease {
            config.include_prerelease = false;
        }
        if let Some(normalizer) = self.normalizer {
            config.normalizer = normalizer;
        }
        if self.skip_malformed {
            config.on_malformed_entry = OnMalformedEntry::SkipWithWarning;
        }
        if self.java8_cpe {
            config.java8_cpe = true;
        }
        config.extra.extend(self.extra.iter().cloned());

        Ok(config)
    }

    fn source(&self) -> anyhow::Result<Box<dyn VersionSource>> {
        if let Some(path) = &self.entries {
            return Ok(Box::new(FileSource::new(path)));
        }

        let repository = self
            .github_repo
            .as_deref()
            .context("either --entries or --github-repo is required")?;
        let asset_pattern = self
            .asset_pattern
            .as_deref()
            .context("--asset-pattern is required with --github-repo")?;

        Ok(Box::new(GitHubReleaseSource::new(
            &self.github_api_url,
            repository,
            Regex::new(asset_pattern).context("Invalid --asset-pattern")?,
        )))
    }

    fn sink(&self) -> anyhow::Result<Box<dyn OutputSink>> {
        match self.format {
            Format::Json => Ok(Box::new(JsonSink::new(std::io::stdout()))),
            Format::StepOutput => match std::env::var_os(GITHUB_OUTPUT_ENV) {
                Some(path) => {
                    let file = OpenOptions::new()
                        .create(true)
                        .append(true)
                        .open(&path)
                        .with_context(|| format!("Failed to open {:?}", path))?;
                    Ok(Box::new(StepOutputSink::new(file)))
                }
                None => Ok(Box::new(StepOutputSink::new(std::io::stdout()))),
            },
        }
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

async fn resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let config = args.checker_config()?;
    let mode = if args.all {
        ResolveMode::All
    } else {
        ResolveMode::Latest
    };

    let plan = CheckPlan::from_config(&config, mode)?;
    let resolver = build_resolver(&config, Arc::new(HttpHasher::default()))?;
    let source = args.source()?;
    let mut sink = args.sink()?;

    run_check(source.as_ref(), &resolver, &plan, sink.as_mut()).await?;

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_json);

    match cli.command {
        Command::Resolve(args) => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(resolve(args)),
        Command::Normalize { raw, normalizer } => {
            let version = normalize(&raw, normalizer)?;
            println!("{}", version);
            Ok(())
        }
    }
}
