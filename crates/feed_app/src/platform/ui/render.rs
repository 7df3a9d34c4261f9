use feed_core::{AppViewModel, LoadOutcome};

use super::constants::*;
use super::layout::{fit, GridLayout};

/// Tiles currently shown, as last delivered by the URL bridge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridFrame {
    pub urls: Vec<String>,
    pub updated_at: Option<String>,
}

pub fn render(view: &AppViewModel, frame: &GridFrame, layout: GridLayout) -> Vec<String> {
    let mut lines = vec![status_line(view), outcome_line(view, frame)];
    if view.failed_fetches > 0 {
        lines.push(format!("Failed fetches this session: {}", view.failed_fetches));
    }

    let border = grid_border(layout);
    lines.push(border.clone());
    for row in layout.rows(&frame.urls) {
        let mut line = String::from("|");
        for col in 0..layout.columns {
            let label = row
                .get(col)
                .cloned()
                .unwrap_or_else(|| fit("", layout.tile_width));
            line.push(' ');
            line.push_str(&label);
            line.push_str(" |");
        }
        lines.push(line);
        lines.push(border.clone());
    }

    lines.push(COMMAND_HINT.to_string());
    lines
}

fn status_line(view: &AppViewModel) -> String {
    let Some(session_id) = view.session_id else {
        return format!("{TITLE} | no session");
    };
    let count = view.photo_urls.len();
    let noun = if count == 1 { "photo" } else { "photos" };
    let mut line = format!("{TITLE} | session #{session_id} | {count} {noun}");
    if view.loading {
        line.push_str(" | loading...");
    }
    line
}

fn outcome_line(view: &AppViewModel, frame: &GridFrame) -> String {
    let mut line = match &view.last_outcome {
        None => "Press enter to load a photo".to_string(),
        Some(LoadOutcome::Accepted { title }) if title.is_empty() => {
            "Added an untitled photo".to_string()
        }
        Some(LoadOutcome::Accepted { title }) => format!("Added \"{title}\""),
        Some(LoadOutcome::NoNewPhotos) => "No new photos in the latest batch".to_string(),
        Some(LoadOutcome::Failed) => match &view.last_failure {
            Some(failure) => format!("Load failed: {failure}"),
            None => "Load failed".to_string(),
        },
        Some(LoadOutcome::Busy) => "Still loading, request ignored".to_string(),
    };
    if let Some(updated_at) = &frame.updated_at {
        line.push_str(&format!(" (grid updated {updated_at})"));
    }
    line
}

fn grid_border(layout: GridLayout) -> String {
    let cell = "-".repeat(layout.tile_width + 2);
    let mut border = String::from("+");
    for _ in 0..layout.columns {
        border.push_str(&cell);
        border.push('+');
    }
    border
}
