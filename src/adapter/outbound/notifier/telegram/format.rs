//! Message formatting for Telegram alerts.

use crate::adapter::render::{group_thousands, signed_pct};
use crate::domain::AlertDirection;
use crate::port::AlertMessage;

/// Format an alert as a Telegram MarkdownV2 message.
pub fn format_alert_message(message: &AlertMessage) -> String {
    let (emoji, title) = match message.direction {
        AlertDirection::High => ("🌶️", "Kimchi Premium High"),
        AlertDirection::Low => ("🔵", "Kimchi Premium Low"),
    };
    let comparator = match message.direction {
        AlertDirection::High => "≥",
        AlertDirection::Low => "≤",
    };
    let fx_note = if message.fx_fallback { " (fallback)" } else { "" };

    format!(
        "{} *{}: {}*\n\
        \n\
        📈 Premium: `{}`\n\
        🎯 Threshold: {} `{}`\n\
        🇰🇷 Upbit: `{} KRW`\n\
        🌐 Global: `{} KRW`\n\
        💱 USD/KRW: `{}`{}\n\
        \n\
        📌 {}",
        emoji,
        escape_markdown(title),
        escape_markdown(message.symbol.as_str()),
        escape_code(&signed_pct(message.premium_pct)),
        comparator,
        escape_code(&signed_pct(message.threshold_pct)),
        escape_code(&group_thousands(message.domestic_price, 0)),
        escape_code(&group_thousands(message.reference_price_converted, 0)),
        escape_code(&group_thousands(message.fx_rate, 2)),
        escape_markdown(fx_note),
        escape_markdown(message.band.comment()),
    )
}

/// Escape special characters for Telegram MarkdownV2.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

/// Inside inline code only `` ` `` and `\` need escaping.
fn escape_code(text: &str) -> String {
    text.replace('\\', "\\\\").replace('`', "\\`")
}
