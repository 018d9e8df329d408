use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::ExtractError;
use crate::models::{Requirement, RequirementRegistry};

/// Separator for multi-valued fields inside one CSV column
pub const LIST_SEPARATOR: &str = ";";

/// How CSV fields are quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quoting {
    /// Quote fields containing a comma, quote or newline
    #[default]
    Necessary,
    /// Write fields verbatim. Embedded commas or newlines break the row.
    Never,
}

impl From<Quoting> for csv::QuoteStyle {
    fn from(quoting: Quoting) -> Self {
        match quoting {
            Quoting::Necessary => csv::QuoteStyle::Necessary,
            Quoting::Never => csv::QuoteStyle::Never,
        }
    }
}

#[derive(Debug, Serialize)]
struct ExportRecord<'a> {
    id: &'a str,
    text: Option<&'a str>,
    parents: Vec<&'a str>,
    children: Vec<&'a str>,
}

impl<'a> From<&'a Requirement> for ExportRecord<'a> {
    fn from(req: &'a Requirement) -> Self {
        Self {
            id: &req.id,
            text: req.text(),
            parents: req.parents.iter().map(String::as_str).collect(),
            children: req.children.iter().map(String::as_str).collect(),
        }
    }
}

/// Writes the `id,text,parents,children` table, one row per requirement
pub fn write_csv<W: Write>(
    registry: &RequirementRegistry,
    writer: W,
    quoting: Quoting,
) -> Result<(), ExtractError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(quoting.into())
        .from_writer(writer);

    csv_writer.write_record(["id", "text", "parents", "children"])?;
    for req in registry.iter() {
        let record = ExportRecord::from(req);
        let parents = record.parents.join(LIST_SEPARATOR);
        let children = record.children.join(LIST_SEPARATOR);
        csv_writer.write_record([
            record.id,
            record.text.unwrap_or(""),
            parents.as_str(),
            children.as_str(),
        ])?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;

    Ok(())
}

/// Export requirements to a CSV file. Returns the number of rows written.
pub fn export_csv<P: AsRef<Path>>(
    registry: &RequirementRegistry,
    output_path: P,
    quoting: Quoting,
) -> Result<usize, ExtractError> {
    let output_path = output_path.as_ref();
    let file = create_file(output_path)?;
    write_csv(registry, BufWriter::new(file), quoting).map_err(|err| match err {
        ExtractError::Csv(source) => csv_error_at(source, output_path),
        other => other,
    })?;

    log::info!("Exported {} requirements to {}", registry.len(), output_path.display());
    Ok(registry.len())
}

/// Writes the requirements as a pretty-printed JSON array
pub fn write_json<W: Write>(registry: &RequirementRegistry, writer: W) -> Result<(), ExtractError> {
    let records: Vec<ExportRecord> = registry.iter().map(ExportRecord::from).collect();
    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

/// Export requirements to a JSON file. Returns the number of records written.
pub fn export_json<P: AsRef<Path>>(
    registry: &RequirementRegistry,
    output_path: P,
) -> Result<usize, ExtractError> {
    let output_path = output_path.as_ref();
    let file = create_file(output_path)?;
    let mut writer = BufWriter::new(file);
    write_json(registry, &mut writer)?;
    writer.flush().map_err(|source| ExtractError::Io {
        path: output_path.to_path_buf(),
        source,
    })?;

    log::info!("Exported {} requirements to {}", registry.len(), output_path.display());
    Ok(registry.len())
}

/// Attaches the output path to IO failures raised through the CSV writer
fn csv_error_at(source: csv::Error, path: &Path) -> ExtractError {
    if !source.is_io_error() {
        return ExtractError::Csv(source);
    }
    match source.into_kind() {
        csv::ErrorKind::Io(source) => ExtractError::Io {
            path: path.to_path_buf(),
            source,
        },
        kind => ExtractError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::other(format!("{:?}", kind)),
        },
    }
}

fn create_file(path: &Path) -> Result<File, ExtractError> {
    File::create(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })
}
