//! Artifact writers and terminal status output

use crate::coding::BitString;
use crate::error::Result;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes the files produced by each command
pub struct ArtifactWriter;

impl ArtifactWriter {
    /// One 1-based suffix start per line
    pub fn write_suffix_array(path: &Path, sa: &[usize]) -> Result<()> {
        Self::write_lines(path, sa.iter().map(|s| s.to_string()))
    }

    /// One line per item
    pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut file = BufWriter::with_capacity(65536, File::create(path)?);
        for line in lines {
            file.write_all(line.as_ref().as_bytes())?;
            file.write_all(b"\n")?;
        }
        file.flush()?;
        Ok(())
    }

    /// Human-readable bit string followed by its length
    pub fn write_bit_report(path: &Path, bits: &BitString) -> Result<()> {
        let mut file = BufWriter::with_capacity(65536, File::create(path)?);
        writeln!(file, "{bits}")?;
        writeln!(file, "(Total bits: {})", bits.len())?;
        file.flush()?;
        Ok(())
    }

    /// Packed bytes as a binary artifact
    pub fn write_packed(path: &Path, bytes: &[u8]) -> Result<()> {
        let mut file = BufWriter::with_capacity(65536, File::create(path)?);
        file.write_all(bytes)?;
        file.flush()?;
        Ok(())
    }
}

/// Print `label message` with a colored label to stdout
pub fn print_status(label: &str, message: &str, color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    write!(stdout, "{label:>10}")?;
    stdout.reset()?;
    writeln!(stdout, " {message}")
}

/// Print `name: value` rows with aligned, dimmed names
pub fn print_table(rows: &[(&str, String)], color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, value) in rows {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
        write!(stdout, "{name:<width$}")?;
        stdout.reset()?;
        writeln!(stdout, "  {value}")?;
    }
    Ok(())
}
