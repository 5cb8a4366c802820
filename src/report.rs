//! CSV export and the console summary of a scan.

use std::{borrow::Cow, fs::File, io, path::Path};

use serde::Serialize;

use crate::{DataSource, Finding, NO_COORDS, NO_POS, Result};

/// Column order of the CSV report.
pub const COLUMNS: [&str; 11] = [
    "data_source",
    "file_name",
    "player_id_or_entity_type",
    "location_category",
    "coord_x",
    "coord_y",
    "coord_z",
    "nbt_path_to_item",
    "found_item_name_tag",
    "found_item_value",
    "raw_nbt_path",
];

const SUMMARY_VALUE_LIMIT: usize = 100;

/// One CSV line. Field order is the column order.
#[derive(Debug, Serialize)]
pub struct ReportRow<'a> {
    pub data_source: &'static str,
    pub file_name: &'a str,
    pub player_id_or_entity_type: &'a str,
    pub location_category: &'a str,
    pub coord_x: String,
    pub coord_y: String,
    pub coord_z: String,
    pub nbt_path_to_item: &'a str,
    pub found_item_name_tag: &'a str,
    pub found_item_value: &'a str,
    pub raw_nbt_path: &'a str,
}

impl<'a> From<&'a Finding> for ReportRow<'a> {
    fn from(finding: &'a Finding) -> Self {
        let coords = finding.coords();
        Self {
            data_source: finding.source.as_str(),
            file_name: &finding.file_name,
            player_id_or_entity_type: &finding.subject,
            location_category: &finding.location,
            coord_x: coords.x,
            coord_y: coords.y,
            coord_z: coords.z,
            nbt_path_to_item: &finding.hit.path,
            found_item_name_tag: &finding.hit.name,
            found_item_value: &finding.hit.value,
            raw_nbt_path: &finding.hit.path,
        }
    }
}

/// Writes a header and one row per finding.
pub fn write_csv<W: io::Write>(findings: &[Finding], writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(COLUMNS)?;
    for finding in findings {
        writer.serialize(ReportRow::from(finding))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the report file. Returns `false`, leaving `path` untouched, when
/// there is nothing to report.
pub fn write_report(findings: &[Finding], path: &Path) -> Result<bool> {
    if findings.is_empty() {
        return Ok(false);
    }
    write_csv(findings, File::create(path)?)?;
    Ok(true)
}

/// Prints one section per data source, in scan order.
pub fn write_summary<W: io::Write>(findings: &[Finding], out: &mut W) -> io::Result<()> {
    for source in DataSource::ALL {
        let mut section = findings.iter().filter(|finding| finding.source == source).peekable();
        if section.peek().is_none() {
            writeln!(out, "\nNo matches for criteria in {}.", source.description())?;
            continue;
        }
        writeln!(out, "\n--- Summary: {} Findings ---", section_title(source))?;
        for finding in section {
            write_summary_line(finding, out)?;
        }
    }
    Ok(())
}

fn section_title(source: DataSource) -> &'static str {
    match source {
        DataSource::PlayerData => "Player Data",
        DataSource::RegionBlockEntity => "Region File (Block Entity)",
        DataSource::EntityFile => "Entity File",
        DataSource::MiscData => "Miscellaneous Data File",
    }
}

fn write_summary_line<W: io::Write>(finding: &Finding, out: &mut W) -> io::Result<()> {
    let path = &finding.hit.path;
    let item = truncate(&finding.hit.value);
    let position = finding.coords();
    let coords = |missing| {
        if position.x.is_empty() {
            Cow::Borrowed(missing)
        } else {
            Cow::Owned(format!("X:{},Y:{},Z:{}", position.x, position.y, position.z))
        }
    };
    match finding.source {
        DataSource::PlayerData => writeln!(
            out,
            "- Player: {}, Loc: {}, Path: {path}, Item: {item}",
            finding.subject, finding.location
        ),
        DataSource::RegionBlockEntity => writeln!(
            out,
            "- File: {}, {}, Coords: {}, Path: {path}, Item: {item}",
            finding.file_name,
            finding.location,
            coords(NO_COORDS)
        ),
        DataSource::EntityFile => writeln!(
            out,
            "- File: {}, {}, Type: {}, Coords: {}, Path: {path}, Item: {item}",
            finding.file_name,
            finding.location,
            finding.subject,
            coords(NO_POS)
        ),
        DataSource::MiscData => writeln!(
            out,
            "- File: {}, Path: {path}, Item: {item}",
            finding.file_name
        ),
    }
}

/// Shortens long values to 97 characters plus `...`.
fn truncate(value: &str) -> Cow<'_, str> {
    if value.chars().count() <= SUMMARY_VALUE_LIMIT {
        return Cow::Borrowed(value);
    }
    let mut short: String = value.chars().take(SUMMARY_VALUE_LIMIT - 3).collect();
    short.push_str("...");
    Cow::Owned(short)
}
