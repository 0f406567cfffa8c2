//! # CSV Codec
//!
//! Line-oriented conversion between [`Student`] and flat comma-separated text.
//!
//! ## Decoding
//!
//! Each non-blank line is one student, fields in positional order:
//!
//! ```text
//! id, full name, programme, level, gpa, email, phone, date added, [status]
//! ```
//!
//! - Trailing fields that are exactly empty are dropped before counting; a line needs
//!   at least 8 fields after that. A field holding only spaces still counts. Fields
//!   are trimmed once counted.
//! - `gpa` must parse as a finite number; the line is rejected otherwise. This is also
//!   what rejects a header row (`GPA` is not a number).
//! - `status` falls back to `Active` when missing or not exactly `Active`/`Inactive`.
//! - An empty `date added` is stamped with the import time.
//!
//! A rejected line is reported per line and never aborts the batch. Only I/O errors
//! abort.
//!
//! ## Encoding
//!
//! A fixed header row followed by one line per student, see
//! [`Student::file_fields`]. GPA keeps full precision.
//!
//! ## Quoting
//!
//! There is none, in either direction. A comma inside a field is written as-is and
//! splits that field on the way back in. Import and export agree on this, so files
//! produced by older exports keep loading the same way.

use crate::error::{Result, RosterError};
use crate::model::{format_timestamp, Status, Student, StudentAttrs};
use crate::reports::Report;
use chrono::NaiveDateTime;
use std::io::{Read, Write};

pub const HEADER: [&str; 9] = [
    "ID",
    "Name",
    "Programme",
    "Level",
    "GPA",
    "Email",
    "Phone",
    "Date Added",
    "Status",
];

pub const REPORT_HEADER: [&str; 3] = ["Category", "Value", "Percentage"];

/// Minimum number of fields in an importable line.
pub const MIN_FIELDS: usize = 8;

/// Outcome of decoding one non-blank line.
#[derive(Debug)]
pub struct DecodedLine {
    /// 1-based line number in the input.
    pub line: usize,
    pub result: Result<Student>,
}

/// Decodes every non-blank line of `reader`.
///
/// The outer `Result` fails only on I/O; per-line problems are in each
/// [`DecodedLine::result`] as [`RosterError::Parse`].
pub fn decode<R: Read>(reader: R, now: NaiveDateTime) -> Result<Vec<DecodedLine>> {
    let mut decoded = Vec::new();
    for_each_line(reader, now, |line| decoded.push(line))?;
    Ok(decoded)
}

/// Streams decoded lines to `sink` as they are read.
///
/// Lines handed over before an I/O error stay handed over: callers that commit per
/// line keep what they committed.
pub fn for_each_line<R, F>(reader: R, now: NaiveDateTime, mut sink: F) -> Result<()>
where
    R: Read,
    F: FnMut(DecodedLine),
{
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    for (index, record) in rdr.byte_records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 1);

        let fields: Vec<String> = record
            .iter()
            .map(|f| String::from_utf8_lossy(f).into_owned())
            .collect();
        if fields.len() <= 1 && fields.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let result =
            decode_fields(fields, now).map_err(|reason| RosterError::Parse { line, reason });
        sink(DecodedLine { line, result });
    }
    Ok(())
}

/// Builds a student from the raw fields of one line.
pub fn decode_fields(
    mut fields: Vec<String>,
    now: NaiveDateTime,
) -> std::result::Result<Student, String> {
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    for field in &mut fields {
        *field = field.trim().to_string();
    }
    if fields.len() < MIN_FIELDS {
        return Err(format!(
            "expected at least {} fields, found {}",
            MIN_FIELDS,
            fields.len()
        ));
    }

    let gpa: f64 = fields[4]
        .parse()
        .ok()
        .filter(|g: &f64| g.is_finite())
        .ok_or_else(|| format!("invalid GPA '{}'", fields[4]))?;

    let status = fields
        .get(8)
        .and_then(|s| s.parse::<Status>().ok())
        .unwrap_or(Status::Active);

    let date_added = if fields[7].is_empty() {
        format_timestamp(now)
    } else {
        fields[7].clone()
    };

    let mut it = fields.into_iter();
    let mut next = || it.next().unwrap_or_default();
    let id = next();
    let full_name = next();
    let programme = next();
    let level = next();
    let _gpa = next();
    let email = next();
    let phone = next();

    Ok(Student::new(
        StudentAttrs {
            id,
            full_name,
            programme,
            level,
            gpa,
            email,
            phone,
            status,
        },
        date_added,
    ))
}

fn unquoted_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .flexible(true)
        .from_writer(writer)
}

/// Writes the header row and one line per student.
pub fn encode<W: Write>(writer: W, students: &[Student]) -> Result<()> {
    let mut wtr = unquoted_writer(writer);
    wtr.write_record(HEADER)?;
    for student in students {
        wtr.write_record(student.file_fields())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a report as plain text: two metadata lines, a blank line, then the rows
/// under a `Category,Value,Percentage` header.
pub fn write_report<W: Write>(mut writer: W, report: &Report) -> Result<()> {
    writeln!(writer, "Report: {}", report.kind.title())?;
    writeln!(writer, "Generated: {}", format_timestamp(report.generated_at))?;
    writeln!(writer)?;

    let mut wtr = unquoted_writer(&mut writer);
    wtr.write_record(REPORT_HEADER)?;
    for row in &report.rows {
        wtr.write_record([&row.category, &row.value, &row.percentage])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{ReportKind, ReportRow};
    use crate::sample;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn decode_str(text: &str) -> Vec<DecodedLine> {
        decode(text.as_bytes(), now()).unwrap()
    }

    #[test]
    fn test_decode_full_line() {
        let lines = decode_str(
            "S100, Ada Lovelace ,Computer Science,200,3.95,ada@x.org,555-0100,2024-01-02 03:04:05,Inactive\n",
        );
        assert_eq!(lines.len(), 1);
        let s = lines[0].result.as_ref().unwrap();
        assert_eq!(s.id, "S100");
        assert_eq!(s.full_name, "Ada Lovelace");
        assert_eq!(s.gpa, 3.95);
        assert_eq!(s.phone, "555-0100");
        assert_eq!(s.date_added, "2024-01-02 03:04:05");
        assert_eq!(s.status, Status::Inactive);
    }

    #[test]
    fn test_status_defaults_to_active() {
        let lines = decode_str(
            "A,N,P,100,3.0,a@b.c,1,2024-01-01 00:00:00\n\
             B,N,P,100,3.0,a@b.c,1,2024-01-01 00:00:00,Graduated\n\
             C,N,P,100,3.0,a@b.c,1,2024-01-01 00:00:00,inactive\n",
        );
        assert_eq!(lines.len(), 3);
        for l in &lines {
            assert_eq!(l.result.as_ref().unwrap().status, Status::Active);
        }
    }

    #[test]
    fn test_missing_date_is_stamped() {
        let lines = decode_str("A,N,P,100,3.0,a@b.c,555,,Inactive\n");
        let s = lines[0].result.as_ref().unwrap();
        assert_eq!(s.date_added, "2024-06-01 12:00:00");
        assert_eq!(s.status, Status::Inactive);
    }

    #[test]
    fn test_blank_date_field_still_counts() {
        let lines = decode_str(
            "A,N,P,100,3.0,a@b.c,555, \n\
             B,N,P,100,3.0,a@b.c,555,\t, \n",
        );
        assert_eq!(lines.len(), 2);
        for l in &lines {
            let s = l.result.as_ref().unwrap();
            assert_eq!(s.date_added, "2024-06-01 12:00:00");
            assert_eq!(s.phone, "555");
            assert_eq!(s.status, Status::Active);
        }
    }

    #[test]
    fn test_rejected_lines() {
        let lines = decode_str(
            "ID,Name,Programme,Level,GPA,Email,Phone,Date Added,Status\n\
             A,N,P,100,3.0,a@b.c,555\n\
             B,N,P,100,3.0,a@b.c,555,,,\n\
             C,N,P,100,x3,a@b.c,555,2024-01-01 00:00:00\n\
             D,N,P,100,inf,a@b.c,555,2024-01-01 00:00:00\n",
        );
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.result.is_err()));
        match &lines[1].result {
            Err(RosterError::Parse { line, reason }) => {
                assert_eq!(*line, 2);
                assert!(reason.contains("found 7"));
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let lines = decode_str(
            "\n   \nA,N,P,100,3.0,a@b.c,555,2024-01-01 00:00:00\n\n",
        );
        assert_eq!(lines.len(), 1);
        assert!(lines[0].result.is_ok());
    }

    #[test]
    fn test_embedded_comma_shifts_columns() {
        // Known limitation: no quoting. The name spills into the programme column.
        let lines = decode_str("A,Doe, Jane,Law,300,3.1,j@d.com,555,2024-01-01 00:00:00,Active\n");
        let s = lines[0].result.as_ref().unwrap();
        assert_eq!(s.full_name, "Doe");
        assert_eq!(s.programme, "Jane");
        assert_eq!(s.level, "Law");
        assert_eq!(s.gpa, 300.0);
    }

    #[test]
    fn test_quotes_are_literal() {
        let lines = decode_str("\"A\",N,P,100,3.0,a@b.c,555,2024-01-01 00:00:00\n");
        assert_eq!(lines[0].result.as_ref().unwrap().id, "\"A\"");
    }

    #[test]
    fn test_encode() {
        let mut out = Vec::new();
        encode(&mut out, &sample::students()[..2]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "ID,Name,Programme,Level,GPA,Email,Phone,Date Added,Status",
                "S001,John Doe,Computer Science,300,3.8,john.doe@email.com,123-456-7890,2024-01-15 10:30:00,Active",
                "S002,Jane Smith,Engineering,200,3.5,jane.smith@email.com,234-567-8901,2024-01-20 14:20:00,Active",
            ]
        );
    }

    #[test]
    fn test_encode_does_not_quote() {
        let mut students = sample::students();
        students.truncate(1);
        students[0].full_name = "Doe, \"John\"".into();
        let mut out = Vec::new();
        encode(&mut out, &students).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("S001,Doe, \"John\",Computer Science"));
    }

    #[test]
    fn test_export_then_import_skips_only_header() {
        let students = sample::students();
        let mut out = Vec::new();
        encode(&mut out, &students).unwrap();

        let lines = decode(out.as_slice(), now()).unwrap();
        assert_eq!(lines.len(), 11);
        assert!(lines[0].result.is_err());
        let back: Vec<Student> = lines
            .into_iter()
            .skip(1)
            .map(|l| l.result.unwrap())
            .collect();
        assert_eq!(back, students);
    }

    #[test]
    fn test_write_report() {
        let report = Report {
            kind: ReportKind::Status,
            rows: vec![
                ReportRow::new("Active Students", "8", "80.0%"),
                ReportRow::new("TOTAL", "8", "100%"),
            ],
            generated_at: now(),
        };
        let mut out = Vec::new();
        write_report(&mut out, &report).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Report: Active/Inactive Students\n\
             Generated: 2024-06-01 12:00:00\n\
             \n\
             Category,Value,Percentage\n\
             Active Students,8,80.0%\n\
             TOTAL,8,100%\n"
        );
    }
}
