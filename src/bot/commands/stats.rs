use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::app::AppContext;
use crate::storage::StatsSummary;
use crate::utils::feedback::CommandFeedback;
use crate::utils::markdown::{escape_code, escape_markdown};

/// Users listed in the text report.
pub const REPORT_LIMIT: usize = 50;
/// Users shown in the bar chart.
pub const CHART_LIMIT: usize = 20;
/// Telegram rejects messages longer than this many characters.
pub const MESSAGE_LIMIT: usize = 4096;
const CHART_WIDTH: u64 = 20;
const LABEL_WIDTH: usize = 14;
const NAME_WIDTH: usize = 64;

pub async fn handle_stats(bot: Bot, msg: Message, ctx: &AppContext) -> ResponseResult<()> {
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);
    let summary = ctx.stats.summary();

    if summary.total_users == 0 {
        feedback.info("No statistics yet.").await?;
        return Ok(());
    }

    for chunk in split_message(&format_stats_report(&summary), MESSAGE_LIMIT) {
        bot.send_message(msg.chat.id, chunk)
            .parse_mode(ParseMode::MarkdownV2)
            .await?;
    }

    match format_usage_chart(&summary) {
        Some(chart) => {
            bot.send_message(msg.chat.id, chart)
                .parse_mode(ParseMode::MarkdownV2)
                .await?;
        }
        None => {
            feedback.info("The chart is empty, nobody has started the bot yet.").await?;
        }
    }

    Ok(())
}

/// Totals plus the most active users, as MarkdownV2.
pub fn format_stats_report(summary: &StatsSummary) -> String {
    let mut text = format!(
        "📊 *Bot statistics*\n\n\
         👥 Users: *{}*\n\
         ▶️ Total starts: *{}*\n\n",
        summary.total_users, summary.total_uses
    );

    if summary.ranking.is_empty() {
        text.push_str("Nothing here yet");
        return text;
    }

    let lines: Vec<String> = summary
        .ranking
        .iter()
        .take(REPORT_LIMIT)
        .map(|user| {
            format!(
                "• {} — {} start\\(s\\), last visit: {}",
                escape_markdown(&truncate_name(&user.name, NAME_WIDTH)),
                user.uses,
                escape_markdown(user.last_seen.as_deref().unwrap_or("—"))
            )
        })
        .collect();
    text.push_str(&lines.join("\n"));

    text
}

/// Horizontal bar chart of starts per user in a code block, or `None` when
/// every count is zero.
pub fn format_usage_chart(summary: &StatsSummary) -> Option<String> {
    let top: Vec<_> = summary.ranking.iter().take(CHART_LIMIT).collect();
    let max = top.iter().map(|user| user.uses).max().unwrap_or(0);
    if max == 0 {
        return None;
    }

    let mut chart = format!("Starts per user (top {CHART_LIMIT})\n\n");
    for user in top {
        let bar_len = bar_length(user.uses, max);
        chart.push_str(&format!(
            "{:<width$} {} {}\n",
            chart_label(&user.name),
            "█".repeat(bar_len),
            user.uses,
            width = LABEL_WIDTH
        ));
    }

    Some(format!("```\n{}```", escape_code(&chart)))
}

// Rounds up so any non-zero count shows at least one block
fn bar_length(uses: u64, max: u64) -> usize {
    let scaled = (u128::from(uses) * u128::from(CHART_WIDTH)).div_ceil(u128::from(max));
    usize::try_from(scaled).unwrap_or(0)
}

/// Names longer than the label column are cut to 12 characters plus an ellipsis.
pub fn chart_label(name: &str) -> String {
    if name.chars().count() <= LABEL_WIDTH {
        name.to_string()
    } else {
        truncate_name(name, LABEL_WIDTH - 1)
    }
}

/// Cuts `name` to at most `width` characters, the last one an ellipsis.
pub fn truncate_name(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let mut short: String = name.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}

/// Splits `text` into messages of at most `limit` characters, breaking
/// between lines. A single line longer than `limit` is cut, never right
/// after a MarkdownV2 escape backslash.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split('\n') {
        let line_len = line.chars().count();
        let needed = if current.is_empty() { line_len } else { line_len + 1 };

        if current_len + needed > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > limit {
            let mut pieces = cut_line(line, limit);
            if let Some(last) = pieces.pop() {
                chunks.extend(pieces);
                current_len = last.chars().count();
                current = last;
            }
            continue;
        }

        if !current.is_empty() {
            current.push('\n');
            current_len += 1;
        }
        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn cut_line(line: &str, limit: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_len = 0;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        // Keep an escape and the character it escapes together
        let width = if c == '\\' && chars.peek().is_some() { 2 } else { 1 };
        if piece_len + width > limit.max(2) && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            piece_len = 0;
        }
        piece.push(c);
        if width == 2 {
            if let Some(escaped) = chars.next() {
                piece.push(escaped);
            }
        }
        piece_len += width;
    }

    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
