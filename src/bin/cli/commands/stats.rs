use anyhow::Result;

use studyloop_lib::tracker::ladder::format_interval;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

const BAR_WIDTH: usize = 30;

fn bar(count: usize, total: usize) -> String {
    let filled = (count * BAR_WIDTH) / total.max(1);
    format!("{}{}", "\u{2588}".repeat(filled), "\u{2591}".repeat(BAR_WIDTH - filled))
}

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let stats = app.tracker.stats();
    let due = app.tracker.due_count();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "ladder": stats,
                "dueCount": due,
                "dataDir": app.data_dir.to_string_lossy(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{} topics total, {} due", stats.total, paint(&due.to_string(), Color::YELLOW, use_color));
            println!();
            println!("{:<9} {:>5}  {}", "New", stats.new_topics, bar(stats.new_topics, stats.total));
            for rung in &stats.rungs {
                let label = format!("{} ({})", rung.step, format_interval(rung.days));
                println!("{:<9} {:>5}  {}", label, rung.count, bar(rung.count, stats.total));
            }
            println!();
            println!("{}", paint(&format!("Data: {}", app.data_dir.display()), Color::DIM, use_color));
        }
    }

    Ok(())
}
