//! Horizontal bar chart drawn on stdout.

use std::io::{IsTerminal, Write};

use calc_client::{BarChart, ChartBackend};

const BAR_WIDTH: u128 = 40;

/// On a terminal, disposing a chart erases the lines it drew so the next
/// draw lands in the same place. When piped, charts are simply appended.
pub struct TerminalChart {
    interactive: bool,
}

impl TerminalChart {
    pub fn new() -> Self {
        Self {
            interactive: std::io::stdout().is_terminal(),
        }
    }
}

/// Number of lines a drawn chart occupies.
pub struct DrawnLines(usize);

impl ChartBackend for TerminalChart {
    type Handle = DrawnLines;

    fn draw(&mut self, chart: &BarChart) -> DrawnLines {
        let lines = render(chart);
        let mut out = std::io::stdout().lock();
        for line in &lines {
            let _ = writeln!(out, "{}", line);
        }
        let _ = out.flush();
        DrawnLines(lines.len())
    }

    fn dispose(&mut self, handle: DrawnLines) {
        if self.interactive && handle.0 > 0 {
            let mut out = std::io::stdout().lock();
            let _ = write!(out, "\x1b[{}A\x1b[J", handle.0);
            let _ = out.flush();
        }
    }
}

pub fn render(chart: &BarChart) -> Vec<String> {
    let mut lines = vec![
        "═══════════════════════════════════════".to_string(),
        format!("  {}", chart.dataset_label),
        "═══════════════════════════════════════".to_string(),
    ];

    if chart.is_empty() {
        lines.push("  No operations recorded yet.".to_string());
        return lines;
    }

    let max = chart.max_count().max(1);
    let label_width = chart.bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    for bar in &chart.bars {
        let filled = (u128::from(bar.count) * BAR_WIDTH).div_ceil(u128::from(max)) as usize;
        let color = format!("\x1b[38;2;{};{};{}m", bar.border.r, bar.border.g, bar.border.b);
        let mut line = format!(
            "  {:>width$} │{}{}\x1b[0m {}",
            bar.label,
            color,
            "█".repeat(filled),
            bar.count,
            width = label_width
        );
        if let Some(avg) = bar.avg_time {
            line.push_str(&format!("  (avg {} ms)", avg));
        }
        lines.push(line);
    }
    lines
}
