//! Terminal formatting for `apkshelf list`

use unicode_width::UnicodeWidthStr;

use crate::domain::entities::Project;

const KB: u64 = 1 << 10;
const MB: u64 = 1 << 20;
const GB: u64 = 1 << 30;

/// Human-readable size, 1024-based with two decimals above one kilobyte.
pub fn format_size(bytes: u64) -> String {
    match bytes {
        b if b >= GB => format!("{:.2} GB", b as f64 / GB as f64),
        b if b >= MB => format!("{:.2} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.2} KB", b as f64 / KB as f64),
        b => format!("{} B", b),
    }
}

const HEADERS: [&str; 6] = ["APP", "PACKAGE", "VERSION", "CHANNEL", "SIZE", "UPLOADED"];

/// One table per project, one row per build, newest first.
pub fn render_projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No builds uploaded yet.\n".to_string();
    }

    let mut out = String::new();
    for (i, project) in projects.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&project.project_name);
        out.push('\n');

        let mut rows: Vec<[String; 6]> = vec![HEADERS.map(String::from)];
        for app in &project.apps {
            for build in &app.builds {
                rows.push([
                    app.app_name.clone(),
                    app.package_name.clone(),
                    build.version.clone(),
                    build.channel.clone(),
                    format_size(build.file_size),
                    build.upload_time.format("%Y-%m-%d %H:%M:%S").to_string(),
                ]);
            }
        }
        out.push_str(&render_table(&rows));
    }
    out
}

fn render_table(rows: &[[String; 6]]) -> String {
    let mut widths = [0usize; 6];
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width());
        }
    }

    let mut out = String::new();
    for row in rows {
        let mut line = String::from("  ");
        for (col, (cell, width)) in row.iter().zip(widths).enumerate() {
            line.push_str(cell);
            if col + 1 < row.len() {
                line.push_str(&" ".repeat(width - cell.width() + 2));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
