use anyhow::{bail, Result};

use studyloop_lib::tracker::ladder::{days_for, format_interval};
use studyloop_lib::tracker::Topic;

use crate::app::App;
use crate::render::terminal::{local_date, paint, Color};
use crate::OutputFormat;

fn print_topic_json(topic: &Topic) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(topic)?);
    Ok(())
}

pub fn run_add(app: &mut App, subject_name: &str, title: &str, format: &OutputFormat) -> Result<()> {
    let subject = app.find_subject(subject_name)?;
    let Some(topic) = app.tracker.add_topic(&subject.id, title) else {
        bail!("Topic title cannot be empty");
    };

    match format {
        OutputFormat::Json => print_topic_json(&topic)?,
        OutputFormat::Plain => {
            println!("Added \"{}\" to {}", topic.title, subject.name);
            println!("  First review: {}", local_date(&topic.next_review));
            println!("  ID: {}", topic.id);
        }
    }

    Ok(())
}

pub fn run_toggle(app: &mut App, query: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let found = app.find_topic(query)?;
    let Some(topic) = app.tracker.toggle_completion(&found.id) else {
        bail!("Topic '{}' disappeared", query);
    };

    match format {
        OutputFormat::Json => print_topic_json(&topic)?,
        OutputFormat::Plain => {
            let wait = format_interval(days_for(topic.interval_step));
            if topic.completed {
                println!(
                    "{} \"{}\" (level {}), next review in {} ({})",
                    paint("Reviewed", Color::GREEN, use_color),
                    topic.title,
                    topic.interval_step,
                    wait,
                    local_date(&topic.next_review)
                );
            } else {
                println!(
                    "{} \"{}\" (level {}), next review {}",
                    paint("Reopened", Color::YELLOW, use_color),
                    topic.title,
                    topic.interval_step,
                    if days_for(topic.interval_step) == 0 { "now".to_string() } else { local_date(&topic.next_review) }
                );
            }
        }
    }

    Ok(())
}

pub fn run_priority(app: &mut App, query: &str, format: &OutputFormat) -> Result<()> {
    let found = app.find_topic(query)?;
    let Some(topic) = app.tracker.toggle_priority(&found.id) else {
        bail!("Topic '{}' disappeared", query);
    };

    match format {
        OutputFormat::Json => print_topic_json(&topic)?,
        OutputFormat::Plain => {
            let state = if topic.is_priority { "now a priority" } else { "no longer a priority" };
            println!("\"{}\" is {}", topic.title, state);
        }
    }

    Ok(())
}

pub fn run_note(app: &mut App, query: &str, notes: String, format: &OutputFormat) -> Result<()> {
    let found = app.find_topic(query)?;
    let Some(topic) = app.tracker.set_notes(&found.id, notes) else {
        bail!("Topic '{}' disappeared", query);
    };

    match format {
        OutputFormat::Json => print_topic_json(&topic)?,
        OutputFormat::Plain => println!("Updated notes for \"{}\"", topic.title),
    }

    Ok(())
}

pub fn run_rm(app: &mut App, query: &str, format: &OutputFormat) -> Result<()> {
    let topic = app.find_topic(query)?;
    app.tracker.delete_topic(&topic.id);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "id": topic.id, "title": topic.title, "deleted": true });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => println!("Deleted \"{}\"", topic.title),
    }

    Ok(())
}
