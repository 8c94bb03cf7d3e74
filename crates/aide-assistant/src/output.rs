//! Response output.

use std::io::{self, Stdout, Write};

use aide_reminders::Reminder;
use tracing::warn;

use crate::coordinator::{RenderedResponse, ResponseKind};

/// Destination for rendered responses and the reminders status panel.
pub trait ResponseSink {
    fn emit(&mut self, response: &RenderedResponse);

    fn status(&mut self, reminders: &[Reminder]);
}

/// Writes responses as plain text lines.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_lines(&mut self, lines: &[String]) {
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(self.out, "{}", line))
            .and_then(|_| self.out.flush());

        if let Err(e) = result {
            warn!("Failed to write output: {}", e);
        }
    }
}

impl<W: Write> ResponseSink for ConsoleSink<W> {
    fn emit(&mut self, response: &RenderedResponse) {
        let marker = match response.kind {
            ResponseKind::Weather => "🌤️",
            ResponseKind::News => "📰",
            ResponseKind::ReminderSet => "⏰",
            ResponseKind::ReminderPrompt => "❓",
            ResponseKind::Toast => "🔔",
            ResponseKind::Ignored => "💡",
        };

        let mut lines = Vec::with_capacity(response.items.len() + 2);
        if response.kind == ResponseKind::News && !response.items.is_empty() {
            lines.push(format!("{} Latest Headlines", marker));
            lines.extend(
                response
                    .items
                    .iter()
                    .map(|item| format!("  - {} ({})", item.title, item.link)),
            );
        }
        lines.push(format!("{} {}", marker, response.text));

        self.write_lines(&lines);
    }

    fn status(&mut self, reminders: &[Reminder]) {
        let mut lines = vec!["📌 Reminders".to_string()];
        if reminders.is_empty() {
            lines.push("  No active reminders.".to_string());
        } else {
            lines.extend(reminders.iter().map(|r| format!("  {}", r)));
        }

        self.write_lines(&lines);
    }
}

#[cfg(test)]
mod tests {
    use aide_core::NewsItem;
    use aide_reminders::ReminderStore;
    use chrono::Utc;

    use super::*;

    fn render(f: impl FnOnce(&mut ConsoleSink<Vec<u8>>)) -> String {
        let mut sink = ConsoleSink::new(Vec::new());
        f(&mut sink);
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_emit_news_lists_items() {
        let response = RenderedResponse {
            kind: ResponseKind::News,
            text: "Here are the top headlines. Headline 1: Rain. ".to_string(),
            items: vec![NewsItem::new("Rain", "https://news.example.com/rain")],
            spoken: true,
        };

        let out = render(|sink| sink.emit(&response));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "📰 Latest Headlines");
        assert_eq!(lines[1], "  - Rain (https://news.example.com/rain)");
        assert!(lines[2].starts_with("📰 Here are the top headlines."));
    }

    #[test]
    fn test_emit_toast() {
        let response = RenderedResponse {
            kind: ResponseKind::Toast,
            text: "Reminder: It's time to stretch!".to_string(),
            items: Vec::new(),
            spoken: false,
        };

        assert_eq!(render(|sink| sink.emit(&response)), "🔔 Reminder: It's time to stretch!\n");
    }

    #[test]
    fn test_status_empty() {
        assert_eq!(
            render(|sink| sink.status(&[])),
            "📌 Reminders\n  No active reminders.\n"
        );
    }

    #[test]
    fn test_status_lists_reminders() {
        let mut store = ReminderStore::new();
        let now = Utc::now();
        store.add_at("take tea", 1, now);
        store.add_at("check email", 5, now);
        store.poll(now + chrono::Duration::minutes(1));

        let out = render(|sink| sink.status(&store.list()));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "  take tea (✅ Done)");
        assert!(lines[2].starts_with("  check email (⏳ at "));
    }
}
