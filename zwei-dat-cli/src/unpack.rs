use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use zwei_dat_core::read;

use crate::UnpackCommand;

pub fn unpack(cmd: &UnpackCommand) -> anyhow::Result<()> {
    for input in &cmd.input {
        unpack_one(input, cmd).with_context(|| format!("Failed to unpack `{input}`"))?;
    }
    Ok(())
}

fn unpack_one(input: &str, cmd: &UnpackCommand) -> anyhow::Result<()> {
    let input_path = Path::new(input);
    let buf = std::fs::read(input_path).context(format!("Input file `{input}` not found."))?;
    let archive = read::decode_archive(&buf)?;

    let output_dir = output_dir(&cmd.output, input_path);
    std::fs::create_dir_all(&output_dir)?;

    let bar = ProgressBar::new(archive.file_count() as u64);
    bar.set_style(
        ProgressStyle::default_bar().template("{pos}/{len} files written {wide_bar} elapsed: {elapsed} eta: {eta}")?,
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    if !cmd.quiet {
        bar.println(format!("Output directory: `{}`", output_dir.display()));
    }

    for group in archive.groups() {
        for file in group.files() {
            let out_path = output_dir.join(group.full_name(file));
            if !cmd.quiet {
                bar.println(format!("{}", out_path.display()));
            }
            std::fs::write(&out_path, file.data())
                .with_context(|| format!("Failed to write {}", out_path.display()))?;
            bar.inc(1);
        }
    }

    bar.finish();
    if !cmd.quiet {
        println!("Done.");
    }

    Ok(())
}

/// A directory named after the archive, next to it by default.
fn output_dir(output: &Option<String>, input: &Path) -> PathBuf {
    let dir_name = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or("output".to_string());
    match output {
        Some(output) => Path::new(output).join(dir_name),
        None => input.parent().unwrap_or(Path::new(".")).join(dir_name),
    }
}
