//! Text layout of the hotspot panel (128x64 OLED, 8px font).

use super::DisplayFrame;

/// Characters per screen row.
const ROW_WIDTH: usize = 15;

const RULE: &str = "_________________";

/// Render presence flags as `[x]` / `[ ]` cells.
pub fn presence_cells(presence: &[bool]) -> String {
    presence
        .iter()
        .map(|present| if *present { "[x]" } else { "[ ]" })
        .collect()
}

/// Lay a frame out line by line.
///
/// Label, primary marker with address, the peer cells wrapped to the screen
/// width (five per row), a rule, then the status.
pub fn panel_lines(frame: &DisplayFrame) -> Vec<String> {
    let marker = if frame.primary.is_some() { 'x' } else { ' ' };
    let primary = frame.primary.map(|ip| ip.to_string()).unwrap_or_default();

    let mut lines = vec![frame.label.clone(), format!("|{}| {}", marker, primary)];

    // Cells are ASCII, so byte chunks are char chunks.
    let cells = presence_cells(&frame.presence);
    lines.extend(
        cells
            .as_bytes()
            .chunks(ROW_WIDTH)
            .map(|row| String::from_utf8_lossy(row).into_owned()),
    );

    lines.push(RULE.to_string());
    lines.push(frame.status.as_str().to_string());
    lines
}
