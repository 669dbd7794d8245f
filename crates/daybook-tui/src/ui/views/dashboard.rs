use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use daybook_core::stats::{DashboardSummary, WeekBucket};

use crate::ui::layout::CHART_LABEL_WIDTH;
use crate::ui::{theme, App};

pub fn render_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Summary
        Constraint::Min(0),    // Weekly chart
    ])
    .split(area);

    render_summary(f, &app.dashboard_summary(), chunks[0]);
    render_week_chart(f, &app.week_buckets(), chunks[1]);
}

fn summary_line(summary: &DashboardSummary) -> String {
    format!(
        "{} entries  │  {} this week  │  {}  │  {} todos ({} open)",
        summary.total_entries,
        summary.recent_entries,
        summary.top_tag_display(),
        summary.total_todos,
        summary.pending_todos
    )
}

fn render_summary(f: &mut Frame, summary: &DashboardSummary, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(summary_line(summary), theme::text_muted())),
        Line::from(""),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Horizontal bars per ISO week: entries then todos, scaled to the busiest week.
fn render_week_chart(f: &mut Frame, buckets: &[WeekBucket], area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Weekly activity",
            Style::default()
                .fg(theme::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let max_total = buckets.iter().map(WeekBucket::total).max().unwrap_or(0);
    // label + space + counts suffix
    let bar_max_width = (area.width as usize).saturating_sub(CHART_LABEL_WIDTH as usize + 16).max(1);

    if max_total == 0 {
        lines.push(Line::from(Span::styled(
            "No activity yet",
            theme::text_muted(),
        )));
    }

    for bucket in buckets {
        let label = Span::styled(format!("{:>5} ", bucket.label), theme::text_muted());
        if bucket.total() == 0 || max_total == 0 {
            lines.push(Line::from(vec![label, Span::styled("-", theme::text_muted())]));
            continue;
        }
        let scale = |count: usize| -> usize {
            if count == 0 {
                return 0;
            }
            ((count as f64 / max_total as f64) * bar_max_width as f64).max(1.0) as usize
        };
        lines.push(Line::from(vec![
            label,
            Span::styled("#".repeat(scale(bucket.entry_count)), theme::tag()),
            Span::styled(
                "+".repeat(scale(bucket.todo_count)),
                Style::default().fg(theme::ACCENT_PRIMARY),
            ),
            Span::styled(
                format!(" {}e {}t", bucket.entry_count, bucket.todo_count),
                theme::text_primary(),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("# entries", theme::tag()),
        Span::raw("  "),
        Span::styled("+ todos", Style::default().fg(theme::ACCENT_PRIMARY)),
    ]));

    f.render_widget(Paragraph::new(lines), area);
}
