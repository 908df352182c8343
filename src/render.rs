//! Frame formatting for the redraw thread.
//!
//! Rendering is a pure transformation from [`RecordSnapshot`] to text: the
//! cursor-positioning sequence for the row, the bracketed id and label, a
//! fixed-width colored gauge, the percentage, and the truncated elapsed time.
//! Keeping it side-effect free is what makes the display logic testable
//! without a terminal.

use std::time::Duration;

use colored::Colorize;

use crate::record::RecordSnapshot;

/// Default gauge width, in glyph cells.
pub(crate) const GAUGE_WIDTH: usize = 50;

/// Glyph for a completed gauge cell.
const FILLED: &str = "━";
/// Glyph for a pending gauge cell.
const EMPTY: &str = "┈";

/// Renders the fixed-width gauge for a completion percentage.
///
/// The filled run is `floor(percent/100 × width)` cells; the empty run is
/// whatever remains of `width`, saturating at zero so an over-reported
/// percentage lengthens the row instead of panicking.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub(crate) fn gauge(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).floor() as usize;
    let empty = width.saturating_sub(filled);

    format!(
        "{}{}",
        FILLED.repeat(filled).green(),
        EMPTY.repeat(empty).bright_black()
    )
}

/// Formats an elapsed duration as whole minutes and seconds, e.g. `2m 5s`.
///
/// Sub-second precision is truncated, not rounded.
pub(crate) fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}m {}s", secs / 60, secs % 60)
}

/// Renders one complete display row, cursor positioning included.
///
/// `row` is the 1-based rank of the bar within the frame; the sequence
/// `ESC[{row};0H` moves the cursor there before the text is emitted, so rows
/// repaint in place frame after frame.
pub(crate) fn render_row(row: usize, snapshot: &RecordSnapshot, width: usize) -> String {
    format!(
        "\x1b[{row};0H[{id}] {name} {gauge} {percent:.2}% ({elapsed})\n",
        id = snapshot.id(),
        name = snapshot.name(),
        gauge = gauge(snapshot.percent(), width),
        percent = snapshot.percent(),
        elapsed = format_elapsed(snapshot.elapsed()),
    )
}
