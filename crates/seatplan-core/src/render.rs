//! Printable attendance sheets rendered from room manifests.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::manifest::{unique_file_stems, RoomManifest};

/// Fixed text printed on every sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetTemplate {
    pub institution: String,
    pub subtitle: String,
    pub title: String,
}

impl Default for SheetTemplate {
    fn default() -> Self {
        Self {
            institution: "Examination Centre".to_string(),
            subtitle: String::new(),
            title: "Attendance Sheet".to_string(),
        }
    }
}

/// Room number shown on the sheet: the first run of digits in the label,
/// or the whole label when it has none.
pub fn room_number(label: &str) -> String {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        label.to_string()
    } else {
        digits
    }
}

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
        table { border-collapse: collapse; width: 100%; }
        th, td { border: 1px solid black; padding: 8px; text-align: center; }
        .center { text-align: center; }
        .left { text-align: left; }
        .spacer { margin-bottom: 20px; }
"#;

/// Render one attendance sheet as a standalone HTML document.
pub fn render_attendance_sheet(
    manifest: &RoomManifest,
    template: &SheetTemplate,
    date: NaiveDate,
) -> String {
    let date = date.format("%d/%m/%Y").to_string();
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!(
        "<title>{} - Room {}</title>\n",
        escape_html(&template.title),
        escape_html(&manifest.room)
    ));
    out.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));

    out.push_str(&format!(
        "<p class=\"center\">Room No: {}</p>\n",
        escape_html(&room_number(&manifest.room))
    ));
    out.push_str(&format!(
        "<h3 class=\"center\">{}</h3>\n",
        escape_html(&template.institution)
    ));
    if !template.subtitle.is_empty() {
        out.push_str(&format!(
            "<h4 class=\"center\">{}</h4>\n",
            escape_html(&template.subtitle)
        ));
    }
    out.push_str(&format!(
        "<h2 class=\"center\">{}</h2>\n",
        escape_html(&template.title)
    ));

    out.push_str(&format!(
        "<table>\n<tr><td>Date:</td><td>{date}</td><td>Timings:</td><td></td>\
         <td>Invigilator Assigned:</td><td></td></tr>\n</table>\n"
    ));

    out.push_str(
        "<table>\n<tr>\
         <th style=\"width: 5%\">Si.No</th>\
         <th style=\"width: 20%\">ID</th>\
         <th style=\"width: 25%\">Name</th>\
         <th style=\"width: 25%\">Branch</th>\
         <th style=\"width: 10%\">Booklet Number</th>\
         <th style=\"width: 15%\">Signature</th>\
         </tr>\n",
    );
    for row in &manifest.rows {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td></td><td></td></tr>\n",
            row.sequence_number,
            escape_html(&row.id),
            escape_html(&row.name),
            escape_html(&row.branch)
        ));
    }
    out.push_str("</table>\n<div class=\"spacer\"></div>\n");

    out.push_str(
        "<table>\n<tr>\
         <th style=\"width: 25%\">Name of the Invigilator</th><th style=\"width: 25%\"></th>\
         <th style=\"width: 25%\">Signature with date</th><th style=\"width: 25%\"></th>\
         </tr>\n</table>\n<div class=\"spacer\"></div>\n",
    );
    out.push_str(
        "<table>\n<tr><td class=\"left\">Present</td><td class=\"center\">Absent</td>\
         <td class=\"center\">Signature of Invigilator</td></tr>\n</table>\n",
    );
    out.push_str("</body>\n</html>\n");
    out
}

/// Render `<room>.html` for every manifest into `dir`.
pub fn render_all(
    dir: &Path,
    manifests: &[RoomManifest],
    template: &SheetTemplate,
    date: NaiveDate,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("create {:?}", dir))?;
    let mut written = Vec::with_capacity(manifests.len());
    for (manifest, stem) in manifests.iter().zip(unique_file_stems(manifests)) {
        let path = dir.join(format!("{stem}.html"));
        let html = render_attendance_sheet(manifest, template, date);
        fs::write(&path, html).with_context(|| format!("write {:?}", path))?;
        written.push(path);
    }
    tracing::debug!(sheets = written.len(), dir = ?dir, "attendance sheets rendered");
    Ok(written)
}
