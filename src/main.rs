use anyhow::Context;
use clap::Parser;
use lottery_slides::{Config, generate};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Build a PowerPoint deck of admitted and waitlisted students from a lottery CSV.
///
/// The body slide layout is read from LOTTERY_SLIDES_LAYOUT (`table` or `bullets`).
#[derive(Parser, Debug)]
#[command(name = "lottery-slides", version, about)]
struct Cli {
    /// Lottery results CSV (id, lottery_number, first_name, last_name, Elementary)
    input: PathBuf,

    /// Presentation file to write
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("invalid configuration")?;

    let summary = generate(&cli.input, &cli.output, &config).with_context(|| {
        format!(
            "failed to build {} from {}",
            cli.output.display(),
            cli.input.display()
        )
    })?;

    tracing::debug!(?summary, "done");
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
    fn test_requires_exactly_two_paths() {
        assert!(Cli::try_parse_from(["lottery-slides", "in.csv"]).is_err());
        assert!(Cli::try_parse_from(["lottery-slides", "in.csv", "out.pptx", "extra"]).is_err());

        let cli = Cli::try_parse_from(["lottery-slides", "in.csv", "out.pptx"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.csv"));
        assert_eq!(cli.output, PathBuf::from("out.pptx"));
    }
}
