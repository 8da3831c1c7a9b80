use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Usage: bats-manpage [OUT_DIR]   (default: ./man)
fn main() -> io::Result<()> {
    let man_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("man"));
    fs::create_dir_all(&man_dir)?;

    let path = man_dir.join("bats.1");
    let mut out = BufWriter::new(File::create(&path)?);
    bats::cli::render_manpage(&mut out)?;
    out.flush()?;

    println!("Generated {}", path.display());
    Ok(())
}
