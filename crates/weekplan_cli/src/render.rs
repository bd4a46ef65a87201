//! Terminal rendering for board view models.

use owo_colors::OwoColorize;
use weekplan_core::{DayColumn, DayDetail, WeekView};

pub trait Render {
    fn render(&self) -> String;
}

impl Render for DayColumn {
    fn render(&self) -> String {
        // Today's header is red, every other day blue.
        let header = format!("{} {}", self.label, self.key);
        let header = if self.is_today {
            header.red().bold().to_string()
        } else {
            header.blue().to_string()
        };

        let mut lines = vec![header];
        if self.events.is_empty() {
            lines.push(format!("   {}", "(no events)".dimmed()));
        }
        for (index, event) in self.events.iter().enumerate() {
            lines.push(format!(
                "   [{index}] {} - {} {}",
                event.time,
                event.title,
                event.id.as_str().dimmed()
            ));
        }
        lines.join("\n")
    }
}

impl Render for WeekView {
    fn render(&self) -> String {
        let mut blocks = vec![format!("Week of {}", self.week_start)];
        blocks.extend(self.days.iter().map(Render::render));
        if let Some(pending) = &self.pending_delete {
            blocks.push(format!(
                "{} {} on {}",
                "Pending delete:".yellow(),
                pending.event_id,
                pending.date
            ));
        }
        blocks.join("\n")
    }
}

impl Render for DayDetail {
    fn render(&self) -> String {
        format!("{}\n(back: {})", self.date.bold(), self.back)
    }
}
