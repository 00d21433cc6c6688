use anyhow::Context;
use zwei_dat_core::read;

use crate::ListCommand;

pub fn list(cmd: &ListCommand) -> anyhow::Result<()> {
    let buf = std::fs::read(&cmd.input).context(format!("Input file `{}` not found.", cmd.input))?;
    let archive = read::decode_archive(&buf)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&archive)?);
        return Ok(());
    }

    println!(
        "{}: {} groups, {} files, {} bytes",
        cmd.input,
        archive.groups().len(),
        archive.file_count(),
        buf.len()
    );
    for group in archive.groups() {
        println!("{} ({} files)", group.extension(), group.files().len());
        for file in group.files() {
            println!("  {:<12} {:>10} bytes", group.full_name(file), file.size());
        }
    }

    Ok(())
}
