//! Terminal rendering for docket-core types.
//!
//! Extension traits and helpers that turn calendar cells, cases and hearing
//! timelines into colored output with owo_colors.

use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use docket_core::grid::{CalendarEntry, DayCell, weeks};
use docket_core::hearing::HearingTimeline;
use docket_core::{Case, Document, EventType};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventType {
    fn render(&self) -> String {
        let label = format!("[{}]", self.label());
        match self {
            EventType::Hearing | EventType::Judgment => label.red().to_string(),
            EventType::ClientMeeting => label.blue().to_string(),
            EventType::CaseFiling | EventType::EvidenceSubmission => label.yellow().to_string(),
            EventType::CourtVisit | EventType::Appeal => label.magenta().to_string(),
            EventType::Mediation | EventType::Arbitration => label.green().to_string(),
        }
    }
}

impl Render for CalendarEntry {
    fn render(&self) -> String {
        let mut line = format!(
            "{:>8}  {} {}",
            self.time_label,
            self.title,
            self.event_type.render()
        );
        if let Some(case) = &self.case_title {
            line.push_str(&format!(" {}", case.dimmed()));
        }
        line
    }
}

impl Render for Case {
    fn render(&self) -> String {
        let mut details = Vec::new();
        if let Some(number) = &self.case_number {
            details.push(number.clone());
        }
        if let Some(status) = &self.status {
            details.push(status.clone());
        }
        details.push(format!("id: {}", self.id));

        format!("⚖ {}  {}", self.title.bold(), details.join(" · ").dimmed())
    }
}

impl Render for Document {
    fn render(&self) -> String {
        let mut line = format!("📄 {}", self.title);
        if let Some(file_name) = &self.file_name {
            line.push_str(&format!(" {}", file_name.dimmed()));
        }
        if let Some(uploaded) = self.uploaded_at {
            line.push_str(&format!(" {}", uploaded.format("%b %-d, %Y").to_string().dimmed()));
        }
        line
    }
}

/// Today, Tomorrow, Yesterday or e.g. "Wed Feb 25".
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Each grid column is four characters wide: right-aligned day plus a marker.
fn render_day_number(cell: &DayCell<CalendarEntry>, today: NaiveDate) -> String {
    let Some(date) = cell.date else {
        return "    ".to_string();
    };

    let marker = if cell.events.is_empty() { ' ' } else { '•' };
    let text = format!("{:>3}{}", date.day(), marker);

    if date == today {
        text.reversed().to_string()
    } else if !cell.events.is_empty() {
        text.bold().to_string()
    } else {
        text
    }
}

/// The month as a Sunday-first grid of day numbers. Days with events are
/// marked, today is highlighted.
pub fn render_month(cells: &[DayCell<CalendarEntry>], today: NaiveDate) -> String {
    let header: String = WEEKDAYS.iter().map(|d| format!("{:>3} ", d)).collect();

    let mut lines = vec![header.trim_end().dimmed().to_string()];
    for week in weeks(cells) {
        let row: String = week
            .iter()
            .map(|cell| render_day_number(cell, today))
            .collect();
        lines.push(row.trim_end().to_string());
    }

    lines.join("\n")
}

/// Events grouped under their day. Padding cells are skipped; empty days
/// only appear when `include_empty` is set.
pub fn render_days(
    cells: &[DayCell<CalendarEntry>],
    today: NaiveDate,
    include_empty: bool,
) -> String {
    let mut blocks = Vec::new();

    for cell in cells {
        let Some(date) = cell.date else { continue };
        if cell.events.is_empty() && !include_empty {
            continue;
        }

        let mut lines = vec![day_label(date, today).bold().to_string()];
        if cell.events.is_empty() {
            lines.push(format!("  {}", "No events".dimmed()));
        }
        lines.extend(cell.events.iter().map(|e| format!("  {}", e.render())));
        blocks.push(lines.join("\n"));
    }

    blocks.join("\n\n")
}

/// Numbered hearing history with dates, descriptions and outcomes.
pub fn render_timeline(timeline: &HearingTimeline, tz: &Tz) -> String {
    if timeline.is_empty() {
        return "   No hearings yet".dimmed().to_string();
    }

    timeline
        .labeled()
        .enumerate()
        .map(|(i, (label, entry))| {
            let when = entry
                .start
                .with_timezone(tz)
                .format("%a %b %-d, %Y %-I:%M %p")
                .to_string();
            let heading = format!("{:>3}. {} hearing", i + 1, label);
            let outcome = if entry.has_outcome() {
                entry.outcome.green().to_string()
            } else {
                "No outcome recorded".dimmed().to_string()
            };

            format!(
                "{}  {}\n       {}\n       {}",
                heading.bold(),
                when.dimmed(),
                entry.description,
                outcome
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use docket_core::CalendarEvent;
    use docket_core::grid::month_grid;

    /// Drop ANSI color codes.
    fn plain(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hearing_on(start: &str) -> CalendarEntry {
        let event = CalendarEvent {
            id: "ev1".into(),
            title: "Hearing A".into(),
            start: start.parse().unwrap(),
            end: None,
            event_type: EventType::Hearing,
            location: None,
            description: None,
            case: None,
            outcome: None,
        };
        CalendarEntry::from_event(&event, &Utc)
    }

    #[test]
    fn month_rows_start_on_sunday() {
        // October 2026 starts on a Thursday
        let entries = vec![hearing_on("2026-10-20T15:30:00Z")];
        let cells = month_grid(date(2026, 10, 1), &entries);
        let out = plain(&render_month(&cells, date(2026, 10, 19)));
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines[0], " Su  Mo  Tu  We  Th  Fr  Sa");
        assert_eq!(lines[1], format!("{}  1   2   3", " ".repeat(16)));
        assert!(lines[4].starts_with(" 18  19  20• 21"));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn days_list_entries_under_their_day() {
        let entries = vec![hearing_on("2026-10-20T15:30:00Z")];
        let cells = month_grid(date(2026, 10, 1), &entries);

        let out = plain(&render_days(&cells, date(2026, 10, 19), false));
        assert_eq!(out, "Tomorrow\n   3:30 PM  Hearing A [Hearing]");
    }

    #[test]
    fn empty_days_shown_on_request() {
        let cells = docket_core::grid::week_grid::<CalendarEntry>(date(2026, 10, 19), &[]);
        let out = plain(&render_days(&cells, date(2026, 10, 21), true));
        assert_eq!(out.matches("No events").count(), 7);
        assert!(out.contains("Sun Oct 18"));
        assert!(out.contains("Today"));
    }

    #[test]
    fn day_labels() {
        let today = date(2026, 10, 19);
        assert_eq!(day_label(today, today), "Today");
        assert_eq!(day_label(date(2026, 10, 18), today), "Yesterday");
        assert_eq!(day_label(date(2026, 10, 25), today), "Sun Oct 25");
    }

    #[test]
    fn timeline_numbers_and_labels_hearings() {
        let events = vec![CalendarEvent {
            id: "h1".into(),
            title: "Status hearing".into(),
            start: "2026-05-10T15:00:00Z".parse().unwrap(),
            end: None,
            event_type: EventType::Hearing,
            location: None,
            description: None,
            case: None,
            outcome: Some("Continued".into()),
        }];
        let timeline =
            HearingTimeline::reconcile(Some("2026-04-02T14:00:00Z".parse().unwrap()), &events, &Utc);

        let out = plain(&render_timeline(&timeline, &chrono_tz::UTC));
        assert!(out.contains("  1. First hearing  Thu Apr 2, 2026 2:00 PM"));
        assert!(out.contains("First hearing (scheduled at case creation)"));
        assert!(out.contains("No outcome recorded"));
        assert!(out.contains("  2. Second hearing  Sun May 10, 2026 3:00 PM"));
        assert!(out.contains("Status hearing"));
        assert!(out.contains("Continued"));
    }
}
