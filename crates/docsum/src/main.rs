use anyhow::{Context, Result};
use clap::Parser;
use docsum_common::{logger, AppConfig};
use docsum_llm::{
    summarize_text, AnthropicClient, GenerationSettings, SplitterConfig, Summarizer, SummaryStrategy,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        // Fallback to default dotenv behavior
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "docsum")]
#[command(about = "docsum - summarize text with a hosted language model", long_about = None)]
struct Cli {
    /// File to summarize; "-" or nothing reads stdin
    #[arg(conflicts_with = "text")]
    path: Option<PathBuf>,

    /// Summarize this text instead of a file
    #[arg(long)]
    text: Option<String>,

    /// How chunks are combined: stuff, map-reduce or refine
    #[arg(long, default_value = "stuff")]
    strategy: SummaryStrategy,
}

/// Resolve the input text from the CLI arguments
fn read_input(path: Option<&Path>, text: Option<String>, mut stdin: impl Read) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        _ => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("Failed to read input from stdin")?;
            Ok(buf)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_dotenv_from_project_root();

    // Missing credential stops here, before any client exists
    let config = AppConfig::from_env()?;

    logger::setup_console_logging(&config.log_level)?;
    tracing::info!("docsum starting - Model: {}, Strategy: {}", config.llm_model, cli.strategy);

    let input = read_input(cli.path.as_deref(), cli.text, std::io::stdin().lock())?;

    let client = AnthropicClient::from_config(&config)?;
    let summarizer = Summarizer::new(Arc::new(client), GenerationSettings::from(&config));

    let summary = summarize_text(&input, &SplitterConfig::default(), &summarizer, cli.strategy).await?;

    println!("{}", summary.text);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["docsum"]).unwrap();
        assert!(cli.path.is_none());
        assert!(cli.text.is_none());
        assert_eq!(cli.strategy, SummaryStrategy::Stuff);

        let cli = Cli::try_parse_from(["docsum", "notes.txt", "--strategy", "map-reduce"]).unwrap();
        assert_eq!(cli.path.as_deref(), Some(Path::new("notes.txt")));
        assert_eq!(cli.strategy, SummaryStrategy::MapReduce);
    }

    #[test]
    fn test_cli_rejects_path_and_text() {
        assert!(Cli::try_parse_from(["docsum", "notes.txt", "--text", "hello"]).is_err());
        assert!(Cli::try_parse_from(["docsum", "--strategy", "condense"]).is_err());
    }

    #[test]
    fn test_read_input_prefers_text() {
        let input = read_input(None, Some("inline".to_string()), "stdin".as_bytes()).unwrap();
        assert_eq!(input, "inline");
    }

    #[test]
    fn test_read_input_stdin() {
        let input = read_input(None, None, "from stdin".as_bytes()).unwrap();
        assert_eq!(input, "from stdin");

        let input = read_input(Some(Path::new("-")), None, "dash".as_bytes()).unwrap();
        assert_eq!(input, "dash");
    }

    #[test]
    fn test_read_input_file() {
        let path = std::env::temp_dir().join(format!("docsum-input-{}.txt", std::process::id()));
        std::fs::write(&path, "file contents\n\nsecond paragraph").unwrap();

        let input = read_input(Some(&path), None, std::io::empty()).unwrap();
        assert_eq!(input, "file contents\n\nsecond paragraph");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/docsum.txt")), None, std::io::empty())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
