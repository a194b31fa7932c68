//! Formats handler: output types and their quality presets.

use anyhow::Result;

use mediagrab_core::download::MediaType;

/// Execute the formats command.
pub fn execute() -> Result<()> {
    for media_type in MediaType::ALL {
        println!("{}", format_line(media_type));
    }
    Ok(())
}

fn format_line(media_type: MediaType) -> String {
    let presets: Vec<String> = media_type
        .quality_presets()
        .iter()
        .map(|preset| {
            if *preset == media_type.default_quality() {
                format!("{preset}*")
            } else {
                (*preset).to_string()
            }
        })
        .collect();
    format!(
        "{:<4} {:<20} {}",
        media_type.short_name(),
        media_type.display_name(),
        presets.join(", ")
    )
}
