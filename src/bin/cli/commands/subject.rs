use anyhow::{bail, Result};

use crate::app::App;
use crate::render::terminal::{paint, rule, truncate, Color};
use crate::OutputFormat;

pub fn run_add(app: &mut App, name: &str, format: &OutputFormat) -> Result<()> {
    let Some(subject) = app.tracker.add_subject(name) else {
        bail!("Subject name cannot be empty");
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&subject)?),
        OutputFormat::Plain => {
            println!("Created subject \"{}\"", subject.name);
            println!("  ID: {}", subject.id);
        }
    }

    Ok(())
}

pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let snapshot = app.tracker.snapshot();
    let now = app.tracker.now();

    let rows: Vec<_> = snapshot.subjects.iter().map(|s| {
        let topics: Vec<_> = snapshot.topics.iter().filter(|t| t.subject_id == s.id).collect();
        let due = topics.iter().filter(|t| t.is_pending(now)).count();
        (s, topics.len(), due)
    }).collect();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = rows.iter().map(|(s, total, due)| {
                serde_json::json!({
                    "id": s.id,
                    "name": s.name,
                    "color": s.color,
                    "topicCount": total,
                    "dueCount": due,
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if rows.is_empty() {
                println!("No subjects yet. Create one with `subject add <name>`.");
                return Ok(());
            }

            let name_w = rows.iter().map(|(s, _, _)| s.name.chars().count()).max().unwrap_or(7).clamp(7, 30);

            println!("{:<name_w$} {:>6} {:>4}", "Subject", "Topics", "Due", name_w = name_w);
            println!("{} {} {}", rule(name_w), rule(6), rule(4));

            for (s, total, due) in &rows {
                let due_display = if *due > 0 {
                    paint(&format!("{:>4}", due), Color::YELLOW, use_color)
                } else {
                    format!("{:>4}", due)
                };
                println!("{:<name_w$} {:>6} {}", truncate(&s.name, name_w), total, due_display, name_w = name_w);
            }
        }
    }

    Ok(())
}

pub fn run_rm(app: &mut App, name: &str, format: &OutputFormat) -> Result<()> {
    let subject = app.find_subject(name)?;
    let removed = app.tracker.delete_subject(&subject.id).unwrap_or(0);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": subject.id,
                "name": subject.name,
                "topicsRemoved": removed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Deleted subject \"{}\" and {} topic(s)", subject.name, removed);
        }
    }

    Ok(())
}
