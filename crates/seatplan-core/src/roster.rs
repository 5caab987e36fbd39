//! Roster ingestion: turns branch sheets or JSON records into a flat,
//! position-numbered candidate list.
//!
//! Two layouts are accepted:
//! - a directory of `*.csv` sheets, one per branch, named after the branch.
//!   The first row is a header; columns are `serial, id, name`.
//! - a JSON array of `{id, name, branch}` records.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::{candidates_from_records, Candidate, CandidateRecord, Result, SeatPlanError};

/// Load a roster from a sheet directory, a single sheet, or a JSON file.
pub fn read_roster(path: &Path) -> Result<Vec<Candidate>> {
    if path.is_dir() {
        return read_branch_sheets(path);
    }
    let content = fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => parse_records_json(&content),
        _ => {
            let branch = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            parse_branch_sheet(branch, &path.display().to_string(), &content, 0)
        }
    }
}

/// Read every `*.csv` sheet in `dir`, in file-name order.
pub fn read_branch_sheets(dir: &Path) -> Result<Vec<Candidate>> {
    let mut sheets = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            sheets.push(path);
        }
    }
    sheets.sort();

    let mut candidates = Vec::new();
    for sheet in &sheets {
        let branch = sheet
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let content = fs::read_to_string(sheet)?;
        let parsed = parse_branch_sheet(
            branch,
            &sheet.display().to_string(),
            &content,
            candidates.len(),
        )?;
        debug!(branch, candidates = parsed.len(), "branch sheet loaded");
        candidates.extend(parsed);
    }
    Ok(candidates)
}

/// Parse one branch sheet. Positions start at `first_position`.
pub fn parse_branch_sheet(
    branch: &str,
    origin: &str,
    content: &str,
    first_position: usize,
) -> Result<Vec<Candidate>> {
    let branch = branch.trim();
    if branch.is_empty() {
        return Err(SeatPlanError::MalformedRoster {
            origin: origin.to_string(),
            line: 0,
            reason: "sheet has no branch name".to_string(),
        });
    }

    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut candidates = Vec::new();
    // Line 1 is the header.
    for (index, line) in content.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(line);
        if fields.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let id = fields.get(1).map(|f| f.trim()).unwrap_or_default();
        if id.is_empty() {
            return Err(SeatPlanError::MalformedRoster {
                origin: origin.to_string(),
                line: index + 1,
                reason: "missing candidate id".to_string(),
            });
        }
        let name = fields.get(2).map(|f| f.trim()).unwrap_or_default();
        candidates.push(Candidate::new(
            id,
            name,
            branch,
            first_position + candidates.len(),
        ));
    }
    Ok(candidates)
}

/// Parse a JSON array of `{id, name, branch}` records.
pub fn parse_records_json(content: &str) -> Result<Vec<Candidate>> {
    let records: Vec<CandidateRecord> = serde_json::from_str(content)?;
    for (index, record) in records.iter().enumerate() {
        if record.id.trim().is_empty() || record.branch.trim().is_empty() {
            return Err(SeatPlanError::MalformedRoster {
                origin: "json".to_string(),
                line: index + 1,
                reason: "record needs a non-empty id and branch".to_string(),
            });
        }
    }
    Ok(candidates_from_records(records))
}

/// Split one CSV line on commas, honouring double-quoted fields and `""`
/// escapes. Fields spanning several lines are not supported.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_handles_quotes_and_escapes() {
        assert_eq!(split_csv_line("1,a,b"), vec!["1", "a", "b"]);
        assert_eq!(
            split_csv_line("2,\"Rao, Anil\",x"),
            vec!["2", "Rao, Anil", "x"]
        );
        assert_eq!(split_csv_line("\"say \"\"hi\"\"\""), vec!["say \"hi\""]);
        assert_eq!(split_csv_line(""), vec![""]);
    }

    #[test]
    fn test_sheet_skips_header_and_blank_rows() {
        let content = "Si.no,USN,Name\n1,1BM001,Asha\n\n,,\n2,1BM002,Ravi\n";
        let candidates = parse_branch_sheet("CSE", "CSE.csv", content, 10).expect("parse");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, "1BM001");
        assert_eq!(candidates[0].branch, "CSE");
        assert_eq!(candidates[0].position, 10);
        assert_eq!(candidates[1].position, 11);
    }

    #[test]
    fn test_sheet_rejects_row_without_id() {
        let content = "Si.no,USN,Name\n1,1BM001,Asha\n2,,Nobody\n";
        match parse_branch_sheet("CSE", "CSE.csv", content, 0) {
            Err(SeatPlanError::MalformedRoster { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed roster, got {other:?}"),
        }
    }

    #[test]
    fn test_sheet_strips_byte_order_mark() {
        let content = "\u{feff}Si.no,USN,Name\n1,X1,Y\n";
        let candidates = parse_branch_sheet("ME", "ME.csv", content, 0).expect("parse");
        assert_eq!(candidates[0].id, "X1");
    }

    #[test]
    fn test_json_records_keep_input_order() {
        let content = r#"[
            {"id": "a", "name": "A", "branch": "CSE"},
            {"id": "b", "name": "B", "branch": "ECE"}
        ]"#;
        let candidates = parse_records_json(content).expect("parse");
        assert_eq!(candidates[1].id, "b");
        assert_eq!(candidates[1].position, 1);
    }

    #[test]
    fn test_json_record_without_branch_is_rejected() {
        let content = r#"[{"id": "a", "name": "A", "branch": " "}]"#;
        assert!(matches!(
            parse_records_json(content),
            Err(SeatPlanError::MalformedRoster { line: 1, .. })
        ));
    }

    #[test]
    fn test_directory_sheets_are_read_in_name_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("ECE.csv"), "n,id,name\n1,e1,E One\n").expect("write");
        fs::write(dir.path().join("CSE.csv"), "n,id,name\n1,c1,C One\n2,c2,C Two\n")
            .expect("write");
        fs::write(dir.path().join("notes.txt"), "ignored").expect("write");

        let candidates = read_roster(dir.path()).expect("read roster");
        let ids: Vec<_> = candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "e1"]);
        assert_eq!(candidates[2].branch, "ECE");
        assert_eq!(candidates[2].position, 2);
    }

    #[test]
    fn test_unreadable_sheet_fails_the_whole_roster() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("CSE.csv"), "n,id,name\n1,c1,C One\n").expect("write");
        fs::write(dir.path().join("ECE.csv"), [0xff, 0xfe, 0x00, 0x9f]).expect("write");

        let err = read_roster(dir.path()).unwrap_err();
        assert!(matches!(err, SeatPlanError::Io(_)));
    }
}
