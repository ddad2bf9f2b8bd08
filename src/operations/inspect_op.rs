use crate::core::png_writer;
use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{info, warn};
use std::path::Path;

pub fn handle_inspect_cli(args: &ArgMatches) -> Result<()> {
    let files: Vec<&String> = args
        .get_many::<String>("files")
        .context("Missing files for inspect command")?
        .collect();

    for file in files {
        let chunks = png_writer::read_text_chunks(Path::new(file))
            .with_context(|| format!("Failed to read text chunks from '{}'", file))?;
        if chunks.is_empty() {
            warn!("⚠️ '{}' carries no text chunks.", file);
            continue;
        }
        info!("🔎 '{}': {} text chunk(s)", file, chunks.len());
        println!("{}", file);
        for (keyword, text) in chunks {
            println!("  {}: {}", keyword, text);
        }
    }
    Ok(())
}
