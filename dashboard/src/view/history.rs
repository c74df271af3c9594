//! History panel

use chrono::{DateTime, Utc};

use super::{esc, time_ago};
use crate::history::{agent_icon, HistoryEntry};

/// Shown when nothing has been recorded
pub fn history_empty() -> String {
    r#"<div class="empty-state" style="padding:60px 20px"><div style="font-size:48px;margin-bottom:16px">📭</div><div style="font-size:15px;color:var(--text-secondary);margin-bottom:8px">No history yet</div><div style="font-size:13px;color:var(--text-tertiary)">Start analyzing repositories to see your history here</div></div>"#
        .to_string()
}

/// Absolute timestamp as shown on a card
pub fn format_absolute(ts: DateTime<Utc>) -> String {
    ts.format("%-m/%-d/%Y %-I:%M:%S %p").to_string()
}

fn history_card(entry: &HistoryEntry, now: DateTime<Utc>) -> String {
    let (relative, absolute) = match entry.recorded_at() {
        Some(ts) => (time_ago(ts, now), format_absolute(ts)),
        None => (String::new(), esc(&entry.timestamp)),
    };
    format!(
        r#"<div class="result-card"><div style="display:flex;gap:16px;align-items:flex-start"><div style="font-size:32px;line-height:1">{}</div><div style="flex:1;overflow:hidden"><div style="font-size:16px;font-weight:600;margin-bottom:8px;color:var(--text-primary)">{}</div><div style="font-size:13px;color:var(--text-secondary);margin-bottom:12px;overflow-wrap:break-word">📁 {}</div><div style="display:flex;gap:16px;flex-wrap:wrap;font-size:12px;color:var(--text-tertiary)"><span>👤 {}</span><span>🕒 {relative}</span><span>📅 {absolute}</span></div></div></div></div>"#,
        agent_icon(&entry.agent),
        esc(&entry.agent),
        esc(&entry.repository),
        esc(&entry.user),
    )
}

/// Count badge followed by one card per entry, newest first
pub fn render_history(entries: &[HistoryEntry], now: DateTime<Utc>) -> String {
    let count = format!(r#"<span id="history-count" hidden>{}</span>"#, entries.len());
    if entries.is_empty() {
        return count + &history_empty();
    }
    let cards: String = entries.iter().map(|e| history_card(e, now)).collect();
    count + &cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryStore;

    #[test]
    fn empty_history_shows_placeholder() {
        let html = render_history(&[], Utc::now());
        assert!(html.contains("No history yet"));
        assert!(html.contains(r#"<span id="history-count" hidden>0</span>"#));
    }

    #[test]
    fn cards_show_icon_user_and_times() {
        let store = HistoryStore::in_memory();
        let at: DateTime<Utc> = "2024-06-30T09:05:07.000Z".parse().unwrap();
        store.record_at("Repository Analyzer", "acme/<api>", at).unwrap();
        store.record_at("Planner", "acme/web", at).unwrap();

        let now: DateTime<Utc> = "2024-06-30T12:00:00Z".parse().unwrap();
        let html = render_history(&store.list().unwrap(), now);

        assert!(html.contains(">2</span>"));
        assert!(html.contains("📦"));
        assert!(html.contains("🤖"));
        assert!(html.contains("📁 acme/&lt;api&gt;"));
        assert!(html.contains("👤 Guest"));
        assert!(html.contains("🕒 2h ago"));
        assert!(html.contains("📅 6/30/2024 9:05:07 AM"));
    }
}
