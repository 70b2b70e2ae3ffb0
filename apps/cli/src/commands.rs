//! CLI command definitions, routing, and tracing setup.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use llmstxt_core::generator::{self, CheckOutcome, GenerateOptions, GenerateProgress};
use llmstxt_core::manifest;
use llmstxt_shared::{AppConfig, SkippedEntry, init_config, load_config, load_config_from};
use tracing::debug;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// llmstxt: bundle documentation into a single llms.txt.
#[derive(Parser)]
#[command(
    name = "llmstxt",
    version,
    about = "Concatenate an ordered manifest of markdown files into a single llms.txt.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Project root that manifest entries are resolved against (defaults to cwd).
    #[arg(long, env = "LLMSTXT_ROOT", global = true)]
    pub root: Option<PathBuf>,

    /// Config file (defaults to <root>/llms.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Defaults to `generate` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate llms.txt from the manifest.
    Generate {
        /// Output file, overriding the config (relative to the root).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Fail if llms.txt is missing or differs from a fresh render.
    Check {
        /// Output file to compare, overriding the config.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List manifest entries and whether each file exists.
    Manifest {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write llms.toml with the built-in defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
///
/// Log lines are written while `progress` is suspended, so an active
/// spinner never overdraws a warning.
pub(crate) fn init_tracing(cli: &Cli, progress: &MultiProgress) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "llmstxt=info",
        1 => "llmstxt=debug",
        _ => "llmstxt=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so `manifest --json` output stays parseable.
    let progress = progress.clone();
    let make_writer = move || SuspendingWriter::new(progress.clone(), std::io::stderr());

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(make_writer)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(make_writer)
                .init();
        }
    }
}

/// Writer that hides every progress bar in `progress` while it writes.
pub(crate) struct SuspendingWriter<W> {
    progress: MultiProgress,
    inner: W,
}

impl<W: Write> SuspendingWriter<W> {
    pub(crate) fn new(progress: MultiProgress, inner: W) -> Self {
        Self { progress, inner }
    }
}

impl<W: Write> Write for SuspendingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let inner = &mut self.inner;
        self.progress.suspend(|| inner.write(buf))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let inner = &mut self.inner;
        self.progress.suspend(|| inner.flush())
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli, progress: MultiProgress) -> Result<()> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()
            .map_err(|e| eyre!("cannot determine working directory: {e}"))?,
    };

    if !root.is_dir() {
        return Err(eyre!("project root '{}' is not a directory", root.display()));
    }

    match cli.command {
        None => cmd_generate(&root, cli.config.as_deref(), None, &progress).await,
        Some(Command::Generate { out }) => {
            cmd_generate(&root, cli.config.as_deref(), out, &progress).await
        }
        Some(Command::Check { out }) => {
            cmd_check(&root, cli.config.as_deref(), out, &progress).await
        }
        Some(Command::Manifest { json }) => cmd_manifest(&root, cli.config.as_deref(), json),
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init(&root),
            ConfigAction::Show => cmd_config_show(&root, cli.config.as_deref()),
        },
    }
}

/// Load `--config` if given, else `<root>/llms.toml`, else defaults.
fn resolve_config(root: &Path, config: Option<&Path>) -> Result<AppConfig> {
    let config = match config {
        Some(path) => load_config_from(path)?,
        None => load_config(root)?,
    };
    Ok(config)
}

fn resolve_options(
    root: &Path,
    config: Option<&Path>,
    out: Option<PathBuf>,
) -> Result<GenerateOptions> {
    let config = resolve_config(root, config)?;
    let mut options = GenerateOptions::from_config(root, &config);
    if let Some(out) = out {
        options.output = out;
    }
    Ok(options)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_generate(
    root: &Path,
    config: Option<&Path>,
    out: Option<PathBuf>,
    multi: &MultiProgress,
) -> Result<()> {
    let options = resolve_options(root, config, out)?;

    debug!(
        root = %root.display(),
        entries = options.manifest.len(),
        toc = %options.toc_mode,
        "generating llms.txt"
    );

    let progress = CliProgress::new(multi);
    let result = generator::generate(&options, &progress).await;
    progress.finish();
    let report = result?;

    println!(
        "Generated {} ({:.2} KB)",
        report.output_path.display(),
        report.size_kb()
    );
    println!(
        "  Files:  {} included, {} skipped",
        report.included.len(),
        report.skipped.len()
    );
    println!("  SHA256: {}", report.sha256);
    println!("  Time:   {:.1}ms", report.elapsed.as_secs_f64() * 1000.0);

    Ok(())
}

async fn cmd_check(
    root: &Path,
    config: Option<&Path>,
    out: Option<PathBuf>,
    multi: &MultiProgress,
) -> Result<()> {
    let options = resolve_options(root, config, out)?;
    let output_path = options.output_path();

    let progress = CliProgress::new(multi);
    let result = generator::check(&options, &progress).await;
    progress.finish();

    match result? {
        CheckOutcome::UpToDate => {
            println!("{} is up to date", output_path.display());
            Ok(())
        }
        CheckOutcome::Stale => Err(eyre!(
            "{} is out of date; run `llmstxt generate`",
            output_path.display()
        )),
        CheckOutcome::Missing => Err(eyre!(
            "{} does not exist; run `llmstxt generate`",
            output_path.display()
        )),
    }
}

fn cmd_manifest(root: &Path, config: Option<&Path>, json: bool) -> Result<()> {
    let config = resolve_config(root, config)?;
    manifest::validate_manifest(&config.manifest.files)?;
    let statuses = manifest::inspect(root, &config.manifest.files);

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    for status in &statuses {
        let marker = if status.present { "ok" } else { "missing" };
        println!("  [{marker:>7}] {}", status.path);
    }
    let present = statuses.iter().filter(|s| s.present).count();
    println!();
    println!("  {present} of {} files present", statuses.len());

    Ok(())
}

fn cmd_config_init(root: &Path) -> Result<()> {
    let path = init_config(root)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(root: &Path, config: Option<&Path>) -> Result<()> {
    let config = resolve_config(root, config)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new(multi: &MultiProgress) -> Self {
        let spinner = multi.add(ProgressBar::new_spinner());
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl GenerateProgress for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn file_read(&self, path: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Reading [{current}/{total}] {path}"));
    }

    fn file_skipped(&self, entry: &SkippedEntry) {
        self.spinner
            .set_message(format!("Skipped {} ({})", entry.path, entry.reason));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("llmstxt-cli-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(dir.join("public")).unwrap();
        dir
    }

    fn write_config(root: &Path) {
        std::fs::write(
            root.join("llms.toml"),
            "output = \"public/llms.txt\"\n\n[manifest]\nfiles = [\"a.md\", \"b.md\"]\n",
        )
        .unwrap();
    }

    #[test]
    fn out_flag_overrides_config_output() {
        let tmp = temp_dir();
        write_config(&tmp);

        let options = resolve_options(&tmp, None, Some(PathBuf::from("dist/llms.txt"))).unwrap();
        assert_eq!(options.output_path(), tmp.join("dist/llms.txt"));
        assert_eq!(options.manifest.entries(), ["a.md", "b.md"]);

        let options = resolve_options(&tmp, None, None).unwrap();
        assert_eq!(options.output_path(), tmp.join("public/llms.txt"));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn explicit_config_path_wins_over_root_file() {
        let tmp = temp_dir();
        write_config(&tmp);
        let other = tmp.join("other.toml");
        std::fs::write(&other, "[manifest]\nfiles = [\"only.md\"]\n").unwrap();

        let options = resolve_options(&tmp, Some(&other), None).unwrap();
        assert_eq!(options.manifest.entries(), ["only.md"]);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn check_fails_until_generated_and_after_edits() {
        let tmp = temp_dir();
        write_config(&tmp);
        std::fs::write(tmp.join("a.md"), "Hello").unwrap();
        let multi = MultiProgress::new();

        let err = cmd_check(&tmp, None, None, &multi).await.unwrap_err();
        assert!(err.to_string().contains("does not exist"));

        cmd_generate(&tmp, None, None, &multi).await.unwrap();
        assert!(tmp.join("public/llms.txt").exists());
        cmd_check(&tmp, None, None, &multi).await.unwrap();

        std::fs::write(tmp.join("b.md"), "World").unwrap();
        let err = cmd_check(&tmp, None, None, &multi).await.unwrap_err();
        assert!(err.to_string().contains("out of date"));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn generate_honors_out_override() {
        let tmp = temp_dir();
        write_config(&tmp);
        std::fs::write(tmp.join("a.md"), "Hello").unwrap();
        std::fs::create_dir_all(tmp.join("dist")).unwrap();

        cmd_generate(&tmp, None, Some(PathBuf::from("dist/llms.txt")), &MultiProgress::new())
            .await
            .unwrap();
        assert!(tmp.join("dist/llms.txt").exists());
        assert!(!tmp.join("public/llms.txt").exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn log_lines_pass_through_while_spinner_is_active() {
        let multi = MultiProgress::new();
        let progress = CliProgress::new(&multi);

        let mut writer = SuspendingWriter::new(multi.clone(), Vec::new());
        writer.write_all(b" WARN b.md not found, skipping\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(writer.inner, b" WARN b.md not found, skipping\n");
        assert!(!progress.spinner.is_finished());
        progress.finish();
        assert!(progress.spinner.is_finished());
    }
}
