use engine::OverlayLine;

/// Render the debug overlay as a single log line.
pub fn overlay_text(lines: &[OverlayLine]) -> String {
    lines
        .iter()
        .map(|line| match line.secs {
            Some(secs) => format!("{} {secs}", line.label),
            None => line.label.clone(),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
