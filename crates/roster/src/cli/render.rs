//! # Rendering Module
//!
//! Turns library results into terminal text. Every function returns a `String`; the
//! handlers in `commands.rs` decide where it goes.
//!
//! Layout calculations (width, truncation, padding) use `unicode-width` so names with
//! wide characters still line up. Styling goes through `console` and is switched off
//! when stdout is not a terminal, or explicitly in tests via [`Renderer::plain`].

use super::styles;
use console::Style;
use rosterapp::commands::CmdMessage;
use rosterapp::model::Student;
use rosterapp::reports::Report;
use rosterapp::stats::Dashboard;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 24;
const PROGRAMME_WIDTH: usize = 20;
const EMAIL_WIDTH: usize = 28;
const BAR_WIDTH: usize = 40;
const GAP: &str = "  ";

pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn for_stdout() -> Self {
        Self {
            color: console::colors_enabled(),
        }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        style.force_styling(self.color).apply_to(text).to_string()
    }

    pub fn messages(&self, messages: &[CmdMessage]) -> String {
        let mut out = String::new();
        for message in messages {
            out.push_str(&self.paint(styles::message(message.level), &message.content));
            out.push('\n');
        }
        out
    }

    pub fn student_table(&self, students: &[Student]) -> String {
        if students.is_empty() {
            return "No students found.\n".to_string();
        }

        let headers = ["ID", "Name", "Programme", "Level", "GPA", "Email", "Status"];
        let caps = [
            usize::MAX,
            NAME_WIDTH,
            PROGRAMME_WIDTH,
            usize::MAX,
            usize::MAX,
            EMAIL_WIDTH,
            usize::MAX,
        ];
        let rows: Vec<[String; 7]> = students
            .iter()
            .map(|s| {
                [
                    s.id.clone(),
                    s.full_name.clone(),
                    s.programme.clone(),
                    s.level.clone(),
                    format!("{:.2}", s.gpa),
                    s.email.clone(),
                    s.status.to_string(),
                ]
            })
            .collect();

        let mut widths = [0usize; 7];
        for (i, header) in headers.iter().enumerate() {
            let longest = rows.iter().map(|r| r[i].width()).max().unwrap_or(0);
            widths[i] = longest.max(header.width()).min(caps[i]);
        }

        let mut out = String::new();
        let header_cells: Vec<String> = headers
            .iter()
            .zip(widths)
            .map(|(h, w)| self.paint(styles::header(), &pad_to_width(h, w)))
            .collect();
        out.push_str(header_cells.join(GAP).trim_end());
        out.push('\n');

        for (student, row) in students.iter().zip(&rows) {
            let cells: Vec<String> = row
                .iter()
                .zip(widths)
                .enumerate()
                .map(|(i, (cell, w))| {
                    let text = pad_to_width(&truncate_to_width(cell, w), w);
                    if i == 6 {
                        self.paint(styles::status(student.status), &text)
                    } else {
                        text
                    }
                })
                .collect();
            out.push_str(cells.join(GAP).trim_end());
            out.push('\n');
        }
        out
    }

    pub fn student_detail(&self, student: &Student) -> String {
        let fields = [
            ("ID", student.id.clone()),
            ("Name", student.full_name.clone()),
            ("Programme", student.programme.clone()),
            ("Level", student.level.clone()),
            ("GPA", format!("{:.2}", student.gpa)),
            ("Email", student.email.clone()),
            ("Phone", student.phone.clone()),
            ("Date Added", student.date_added.clone()),
            ("Status", student.status.to_string()),
        ];
        let label_width = fields.iter().map(|(l, _)| l.width()).max().unwrap_or(0);

        let mut out = String::new();
        for (label, value) in fields {
            let label = self.paint(styles::dim(), &pad_to_width(label, label_width));
            out.push_str(&format!("{}  {}\n", label, value));
        }
        out
    }

    pub fn dashboard(&self, dashboard: &Dashboard) -> String {
        let mut out = String::new();
        out.push_str(&self.paint(styles::title(), &dashboard.stats.summary_line()));
        out.push_str("\n\n");
        out.push_str(&self.series("Students by Programme", &dashboard.programmes));
        out.push('\n');
        let levels: Vec<(String, usize)> = dashboard
            .levels
            .iter()
            .map(|(level, count)| (format!("Level {}", level), *count))
            .collect();
        out.push_str(&self.series("Students by Level", &levels));
        out
    }

    /// A labelled horizontal bar chart, bars scaled to the largest count.
    fn series(&self, title: &str, points: &[(String, usize)]) -> String {
        let mut out = format!("{}\n", self.paint(styles::header(), title));
        if points.is_empty() {
            out.push_str("  (none)\n");
            return out;
        }

        let label_width = points.iter().map(|(l, _)| l.width()).max().unwrap_or(0);
        let count_width = points
            .iter()
            .map(|(_, c)| c.to_string().len())
            .max()
            .unwrap_or(1);
        let max = points.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1);

        for (label, count) in points {
            let bar = "█".repeat((count * BAR_WIDTH).div_ceil(max));
            out.push_str(&format!(
                "  {}  {:>cw$}  {}\n",
                pad_to_width(label, label_width),
                count,
                self.paint(styles::bar(), &bar),
                cw = count_width
            ));
        }
        out
    }

    pub fn report(&self, report: &Report) -> String {
        let mut out = String::new();
        out.push_str(&self.paint(styles::title(), report.kind.title()));
        out.push('\n');
        out.push_str(&self.paint(
            styles::dim(),
            &format!(
                "Generated: {}",
                rosterapp::model::format_timestamp(report.generated_at)
            ),
        ));
        out.push_str("\n\n");

        if report.rows.is_empty() {
            out.push_str("No data.\n");
            return out;
        }

        let headers = ["Category", "Value", "Percentage"];
        let mut widths = headers.map(|h| h.width());
        for row in &report.rows {
            widths[0] = widths[0].max(row.category.width());
            widths[1] = widths[1].max(row.value.width());
            widths[2] = widths[2].max(row.percentage.width());
        }

        let header_cells: Vec<String> = headers
            .iter()
            .zip(widths)
            .map(|(h, w)| self.paint(styles::header(), &pad_to_width(h, w)))
            .collect();
        out.push_str(header_cells.join(GAP).trim_end());
        out.push('\n');

        for row in &report.rows {
            let line = format!(
                "{}{}{:>vw$}{}{:>pw$}",
                pad_to_width(&row.category, widths[0]),
                GAP,
                row.value,
                GAP,
                row.percentage,
                vw = widths[1],
                pw = widths[2]
            );
            if row.is_total() {
                out.push_str(&self.paint(styles::total(), &line));
            } else {
                out.push_str(&line);
            }
            out.push('\n');
        }
        out
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
