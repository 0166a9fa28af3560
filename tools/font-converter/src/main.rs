//! Tool for converting bitmap fonts from the `!Fnt` format into the sparse `+Fnt` format.

use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};
use font_converter::{ConvertOptions, convert_with_options};

pub mod cli;

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    );

    let config = cli::get_config();
    if config.output.is_none() && io::stdout().is_terminal() {
        anyhow::bail!("stdout is a tty. Try writing to a file instead.");
    }

    let font = std::fs::read(&config.input)
        .with_context(|| format!("error reading \"{}\"", config.input.display()))?;

    let options = ConvertOptions {
        strict: config.strict,
    };
    let converted = convert_with_options(&font, options)
        .with_context(|| format!("error converting \"{}\"", config.input.display()))?;
    log::info!(
        "converted {} bytes into {} bytes",
        font.len(),
        converted.len()
    );

    match config.output {
        Some(path) => std::fs::write(&path, &converted)
            .with_context(|| format!("error writing \"{}\"", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&converted)
                .and_then(|()| stdout.flush())
                .context("error writing to stdout")?;
        }
    }

    Ok(())
}
