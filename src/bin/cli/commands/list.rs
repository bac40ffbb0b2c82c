use anyhow::Result;

use studyloop_lib::tracker::ladder::cycle_days;
use studyloop_lib::tracker::TopicQuery;

use crate::app::App;
use crate::render::terminal::{local_date, paint, rule, truncate, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    today: bool,
    subject_name: Option<&str>,
    search: Option<&str>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let mut query = if today {
        TopicQuery::today()
    } else if let Some(name) = subject_name {
        TopicQuery::subject(app.find_subject(name)?.id)
    } else {
        TopicQuery::default()
    };
    if let Some(q) = search {
        query = query.with_search(q);
    }

    let topics = app.tracker.view(&query);
    let now = app.tracker.now();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&topics)?);
        }
        OutputFormat::Plain => {
            if topics.is_empty() {
                println!("{}", if today { "Nothing due. All caught up!" } else { "No topics found." });
                return Ok(());
            }

            let title_w = topics.iter().map(|t| t.title.chars().count()).max().unwrap_or(5).clamp(5, 40);
            let subject_w = 16;

            println!("{:<1} {:<title_w$} {:<subject_w$} {:<5} {:<6} {}",
                "", "Title", "Subject", "Level", "Cycle", "Next review",
                title_w = title_w, subject_w = subject_w);
            println!("{} {} {} {} {} {}",
                rule(1), rule(title_w), rule(subject_w), rule(5), rule(6), rule(12));

            for topic in &topics {
                let mark = match (topic.completed, topic.is_priority) {
                    (true, _) => paint("\u{2713}", Color::GREEN, use_color),
                    (false, true) => paint("\u{2605}", Color::YELLOW, use_color),
                    (false, false) => " ".to_string(),
                };

                let next = if topic.is_pending(now) {
                    paint("Review now", Color::YELLOW, use_color)
                } else {
                    local_date(&topic.next_review)
                };

                let title = truncate(&topic.title, title_w);
                let title = if topic.is_priority {
                    paint(&format!("{:<title_w$}", title, title_w = title_w), Color::BOLD, use_color)
                } else {
                    format!("{:<title_w$}", title, title_w = title_w)
                };

                println!("{} {} {:<subject_w$} {:<5} {:<6} {}",
                    mark,
                    title,
                    truncate(&app.subject_name(&topic.subject_id), subject_w),
                    topic.interval_step,
                    format!("{}d", cycle_days(topic.interval_step)),
                    next,
                    subject_w = subject_w);

                if !topic.notes.is_empty() {
                    let first_line = topic.notes.lines().next().unwrap_or_default();
                    println!("   {}", paint(&truncate(first_line, 60), Color::DIM, use_color));
                }
            }

            println!("\n{} topics, {} due", topics.len(), app.tracker.due_count());
        }
    }

    Ok(())
}
