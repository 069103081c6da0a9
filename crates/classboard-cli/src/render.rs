use std::fmt::Write;

use classboard_schedule::dashboard::ScheduledEntry;
use classboard_schedule::{DashboardView, GroupedTeacher, ScheduleStatus};

fn entry_line(out: &mut String, e: &ScheduledEntry) {
    let badge = match e.status {
        ScheduleStatus::Active => format!("ACTIVE {:>3}%", e.progress),
        ScheduleStatus::Upcoming => "UPCOMING".to_string(),
        ScheduleStatus::Past => "DONE".to_string(),
    };
    let canceled = if e.canceled { " CANCELED" } else { "" };
    let teacher = e.teacher_name.as_deref().unwrap_or("unassigned");
    let subject = if e.subject.is_empty() { "-" } else { e.subject.as_str() };
    let _ = writeln!(
        out,
        "  [{badge:<11}]{canceled} {} - {}  {subject} ({teacher})  grade {} {}  #{}",
        e.start, e.end, e.grade, e.curriculum, e.id
    );
}

/// Plain-text board for the terminal.
pub fn render_view(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}  {}",
        view.day,
        view.date_tag,
        view.at.time_of_day().format_12h()
    );

    if view.current.is_empty() && view.past.is_empty() && view.invalid.is_empty() {
        out.push_str("  no classes today\n");
        return out;
    }

    if !view.current.is_empty() {
        out.push_str("Now and next\n");
        for e in &view.current {
            entry_line(&mut out, e);
        }
    }
    if !view.past.is_empty() {
        out.push_str("Earlier today\n");
        for e in &view.past {
            entry_line(&mut out, e);
        }
    }
    if !view.invalid.is_empty() {
        out.push_str("Unreadable records\n");
        for bad in &view.invalid {
            let _ = writeln!(out, "  #{}: {}", bad.id, bad.reason);
        }
    }
    out
}

pub fn render_teachers(groups: &[&GroupedTeacher]) -> String {
    let mut out = String::new();
    for g in groups {
        let subjects = if g.subjects.is_empty() {
            "-".to_string()
        } else {
            g.subjects.join(", ")
        };
        let _ = writeln!(out, "{}  [{}]  #{}", g.name, subjects, g.representative_id);
    }
    out
}
