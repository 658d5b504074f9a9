//! Plain-text rendering of a derived view.

use roster_core::{SortOrder, SortSpec, StudentRecord};

const HEADERS: [&str; 7] = ["ID", "Name", "Email", "Major", "Grade", "Enrolled", "Status"];

fn row(record: &StudentRecord) -> [String; 7] {
    let data = &record.data;
    [
        record.id.clone(),
        record.full_name(),
        data.email.clone(),
        data.major.clone(),
        data.grade.clone(),
        data.enrollment_date.clone(),
        data.status.label().to_string(),
    ]
}

/// Left-aligned columns padded to their widest cell.
pub fn render(records: &[StudentRecord], sort: SortSpec) -> String {
    if records.is_empty() {
        return "No students found.\n".to_string();
    }

    let rows: Vec<[String; 7]> = records.iter().map(row).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_line = |cells: &[String]| {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    };

    push_line(&HEADERS.map(String::from));
    for cells in &rows {
        push_line(cells);
    }

    let arrow = match sort.order {
        SortOrder::Asc => "asc",
        SortOrder::Desc => "desc",
    };
    out.push_str(&format!("{} student(s), sorted by {} {arrow}\n", records.len(), sort.key));
    out
}
