//! colstore CLI
//!
//! Thin command entry point: `import` converts a delimited-text file
//! into a colstore file, `export` converts a colstore file back. All
//! engine errors propagate here, are printed, and terminate the process
//! with a non-zero exit.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use colstore::pipeline::{self, RowSource};
use colstore::{Codec, Column, ColumnType, Config, Result, Table};

/// colstore CLI
#[derive(Parser, Debug)]
#[command(name = "colstore")]
#[command(about = "Columnar storage engine: bulk import and export")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import a delimited-text file into a colstore file
    Import {
        /// Input text file; the first line names the columns
        input: PathBuf,

        /// Output colstore file
        output: PathBuf,

        /// Compression codec: lz4, snappy, or zstd
        #[arg(short, long, default_value = "lz4")]
        codec: Codec,

        /// Max uncompressed bytes per extent
        #[arg(short, long, default_value = "1048576")]
        max_extent_len: usize,

        /// Table name recorded in the file
        #[arg(short, long, default_value = "table")]
        table: String,
    },

    /// Export a single-table colstore file as delimited text
    Export {
        /// Input colstore file
        input: PathBuf,

        /// Output text file (created, truncated, synced)
        output: PathBuf,

        /// Codec the file was imported with: lz4, snappy, or zstd
        #[arg(short, long, default_value = "lz4")]
        codec: Codec,
    },
}

// =============================================================================
// Delimited-Text Row Source
// =============================================================================

/// Streaming row source over a comma-separated text file. Column ids are
/// assigned from the header line, so a row's value for a column is the
/// field at the column-id position.
struct TextRowSource {
    reader: BufReader<File>,
    fields: Vec<String>,
    line: String,
}

/// Strip one line terminator, LF or CRLF.
fn trim_line(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

impl TextRowSource {
    /// Open the file and consume the header line, returning the source
    /// and the column names.
    fn open(path: &PathBuf) -> Result<(Self, Vec<String>)> {
        let mut reader = BufReader::new(File::open(path)?);

        let mut header = String::new();
        reader.read_line(&mut header)?;
        let names: Vec<String> = trim_line(&header)
            .split(',')
            .map(str::to_string)
            .collect();

        Ok((
            Self {
                reader,
                fields: Vec::new(),
                line: String::new(),
            },
            names,
        ))
    }
}

impl RowSource for TextRowSource {
    fn begin(&mut self) -> Result<()> {
        Ok(())
    }

    fn next_row(&mut self) -> Result<bool> {
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Ok(false);
        }
        self.fields = trim_line(&self.line)
            .split(',')
            .map(str::to_string)
            .collect();
        Ok(true)
    }

    fn value_for(&self, column: &Column) -> Option<&[u8]> {
        self.fields
            .get(column.column_id as usize)
            .map(|s| s.as_bytes())
    }

    fn end(&mut self) -> Result<()> {
        Ok(())
    }
}

// =============================================================================
// Commands
// =============================================================================

fn run(args: Args) -> Result<()> {
    match args.command {
        Commands::Import {
            input,
            output,
            codec,
            max_extent_len,
            table,
        } => {
            let config = Config::builder()
                .codec(codec)
                .max_extent_len(max_extent_len)
                .build();

            let (mut source, names) = TextRowSource::open(&input)?;

            let mut t = Table::new(table, 0);
            for (ndx, name) in names.iter().enumerate() {
                t.add_column(Column::new(name.clone(), ndx as u64, ColumnType::String));
            }

            tracing::info!(
                "importing '{}' -> '{}' ({} columns, codec {})",
                input.display(),
                output.display(),
                t.columns.len(),
                config.codec
            );

            pipeline::import(&output, t, &mut source, &config)?;
            Ok(())
        }

        Commands::Export {
            input,
            output,
            codec,
        } => {
            let config = Config::builder().codec(codec).build();

            tracing::info!(
                "exporting '{}' -> '{}' (codec {})",
                input.display(),
                output.display(),
                config.codec
            );

            pipeline::export(&input, &output, &config)
        }
    }
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,colstore=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_trim_line_handles_lf_and_crlf() {
        assert_eq!(trim_line("a,b\n"), "a,b");
        assert_eq!(trim_line("a,b\r\n"), "a,b");
        assert_eq!(trim_line("a,b"), "a,b");
        assert_eq!(trim_line(""), "");
    }

    #[test]
    fn test_text_row_source_reads_crlf_input() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("rows.csv");
        File::create(&path)
            .unwrap()
            .write_all(b"id,name\r\n1,a\r\n2,bb\r\n")
            .unwrap();

        let (mut source, names) = TextRowSource::open(&path).unwrap();
        assert_eq!(names, vec!["id".to_string(), "name".to_string()]);

        let name_column = Column::new("name", 1, ColumnType::String);
        assert!(source.next_row().unwrap());
        assert_eq!(source.value_for(&name_column), Some(&b"a"[..]));
        assert!(source.next_row().unwrap());
        assert_eq!(source.value_for(&name_column), Some(&b"bb"[..]));
        assert!(!source.next_row().unwrap());
    }
}
