use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::Context;
use indexmap::IndexSet;
use zwei_dat_core::group::group_files;
use zwei_dat_core::write;

use crate::PackCommand;

pub fn pack(cmd: &PackCommand) -> anyhow::Result<()> {
    let input_dir = Path::new(&cmd.input);
    if !input_dir.is_dir() {
        anyhow::bail!("Input directory does not exist: {}", input_dir.display());
    }

    let input_paths = collect_inputs(input_dir)?;
    if input_paths.is_empty() {
        anyhow::bail!("No input files found in {}", input_dir.display());
    }

    let output_path = match &cmd.output {
        Some(output) => PathBuf::from(output),
        None => default_output_path(input_dir, cmd.r#override)?,
    };

    if !cmd.quiet {
        println!("Packing {} files into {}...", input_paths.len(), output_path.display());
    }

    // Archives are flat: entries are keyed by base name only.
    let mut files = Vec::with_capacity(input_paths.len());
    for path in &input_paths {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Input file name is not valid UTF-8: {}", path.display()))?
            .to_string();
        if !cmd.quiet {
            println!("{}", path.display());
        }
        let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        files.push((file_name, data));
    }

    let archive = group_files(files)?;

    let mut output_option = OpenOptions::new();
    if cmd.r#override {
        output_option.create(true).truncate(true);
    } else {
        output_option.create_new(true);
    }
    output_option.write(true);
    let mut output_file = output_option
        .open(&output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    write::write_archive(&mut output_file, &archive)?;

    if !cmd.quiet {
        println!("Output file: {}", output_path.display());
        println!("Done!");
    }

    Ok(())
}

/// `<dir>.dat` next to the input; when taken, try `<dir>-1.dat` .. `<dir>-99.dat`.
fn default_output_path(input_dir: &Path, overwrite: bool) -> anyhow::Result<PathBuf> {
    let dir_abs = input_dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", input_dir.display()))?;
    let stem = dir_abs
        .file_name()
        .and_then(|n| n.to_str())
        .context("Archive name invalid")?
        .to_string();
    let parent = dir_abs.parent().unwrap_or(Path::new(".")).to_path_buf();

    let mut candidate = parent.join(format!("{stem}.dat"));
    if overwrite {
        return Ok(candidate);
    }

    let mut try_count = 0;
    while candidate.exists() {
        try_count += 1;
        if try_count >= 100 {
            anyhow::bail!("Archive output file exists and no alternative");
        }
        candidate = parent.join(format!("{stem}-{try_count}.dat"));
    }

    Ok(candidate)
}

/// Collect input files under the input directory into a single list of files.
fn collect_inputs(input_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = IndexSet::new();

    for entry in walkdir::WalkDir::new(input_dir)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = entry?;
        if entry.path().is_file() {
            files.insert(entry.path().to_path_buf());
        }
    }

    Ok(files.into_iter().collect())
}

/// Skip `.`-prefixed entries (`.git`) and `__`-prefixed ones (`__MACOSX`).
fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.') || s.starts_with("__"))
        .unwrap_or(false)
}
