use chrono::{DateTime, Utc};
use colored::Colorize;
use nexus::api::{CmdMessage, MessageLevel};
use nexus::insight::InsightState;
use nexus::model::{Category, MediaItem};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 10;
const UPLOADER_WIDTH: usize = 16;
const VIEWS_WIDTH: usize = 12;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_items(heading: &str, items: &[&MediaItem]) {
    println!("{}", heading.bold());
    if items.is_empty() {
        println!("No data found in this sector.");
        return;
    }

    for item in items {
        let id = fit(&item.id, ID_WIDTH);
        let uploader = fit(&item.uploader.username, UPLOADER_WIDTH);
        let views = format!("{:>width$}", format!("{} views", item.views), width = VIEWS_WIDTH);
        let tag = format!("[{}] ", category_tag(item.category));

        let fixed = ID_WIDTH + 1 + tag.width() + 1 + UPLOADER_WIDTH + VIEWS_WIDTH;
        let title = fit(&item.title, LINE_WIDTH.saturating_sub(fixed));

        println!(
            "{} {}{} {}{}",
            id.yellow(),
            tag.cyan(),
            title,
            uploader.dimmed(),
            views.dimmed()
        );
    }
}

pub(super) fn print_detail(item: &MediaItem, insight: &InsightState, related: &[&MediaItem]) {
    println!("{}", item.title.bold());
    println!(
        "{} · {} · {} views · {}",
        item.uploader.username.red(),
        item.upload_date,
        item.views,
        item.file_size
    );
    println!("{} ({})", item.file_name.dimmed(), item.file_url.dimmed());
    if !item.description.is_empty() {
        println!();
        println!("{}", item.description);
    }

    println!();
    let insight_text = match insight {
        InsightState::Idle => "Establishing neural link...",
        InsightState::Loading => "Analyzing transmission data...",
        InsightState::Ready(text) => text.as_str(),
    };
    println!("{} {}", "Insight:".red().bold(), insight_text.italic());

    print_comments(item);

    if !related.is_empty() {
        println!();
        println!("{}", "Related exchanges".bold());
        for other in related {
            println!(
                "  {} {} {}",
                other.id.yellow(),
                fit(&other.title, 60),
                format!("{} · {} views", other.uploader.username, other.views).dimmed()
            );
        }
    }
}

pub(super) fn print_comments(item: &MediaItem) {
    println!();
    println!("{}", format!("Comments ({})", item.comments.len()).bold());
    for comment in &item.comments {
        println!(
            "  {} {}  {}",
            comment.username.red(),
            format_time_ago(comment.date).dimmed(),
            comment.text
        );
    }
}

fn category_tag(category: Category) -> String {
    category.as_str().to_uppercase()
}

/// Truncates or pads `s` to exactly `width` columns.
fn fit(s: &str, width: usize) -> String {
    if s.width() <= width {
        return format!("{}{}", s, " ".repeat(width - s.width()));
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > width.saturating_sub(1) {
            result.push('…');
            current_width += 1;
            break;
        }
        result.push(c);
        current_width += char_width;
    }

    let padding = width.saturating_sub(current_width);
    format!("{}{}", result, " ".repeat(padding))
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    if duration.num_seconds() < 60 {
        return "just now".to_string();
    }
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
