//! Terminal styling for the loan pipeline
//!
//! Semantic styling via the [`Stylize`] trait, with terminal color support
//! detection delegated to `owo-colors`.
//!
//! # Color Palette
//!
//! | Method       | Color  | Stream | Semantic Use                         |
//! |--------------|--------|--------|--------------------------------------|
//! | `.accent()`  | Cyan   | stdout | Stage names, ids, amounts            |
//! | `.success()` | Green  | stdout | Approvals, completed stages          |
//! | `.error()`   | Red    | stderr | Rejections, failed stages, errors    |
//! | `.warn()`    | Yellow | stderr | Manual review, invalid form fields   |
//! | `.muted()`   | Dim    | stdout | Placeholders, hints, timestamps      |
//! | `.emphasis()`| Bold   | stdout | Result titles, section headers       |

use loanflow::result::Tier;
use loanflow::types::OutcomeKind;
use std::fmt::{self, Display};

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream, Style};

// ============================================================================
// Style definitions
// ============================================================================

const ACCENT: Style = Style::new().cyan();
const SUCCESS: Style = Style::new().green();
const ERROR: Style = Style::new().red();
const WARN: Style = Style::new().yellow();
const MUTED: Style = Style::new().dimmed();
const EMPHASIS: Style = Style::new().bold();

// ============================================================================
// Styled wrapper
// ============================================================================

/// A value with semantic styling applied.
///
/// Renders with ANSI codes only when the target stream supports color
/// (`NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE` and TTY detection are honored).
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    style: Style,
    stream: Stream,
}

impl<T> Styled<T> {
    const fn new(value: T, style: Style, stream: Stream) -> Self {
        Self {
            value,
            style,
            stream,
        }
    }

    /// Override to render for stdout stream detection.
    #[must_use]
    pub const fn for_stdout(mut self) -> Self {
        self.stream = Stream::Stdout;
        self
    }
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.value
                .if_supports_color(self.stream, |v| v.style(self.style))
        )
    }
}

// ============================================================================
// Stylize trait
// ============================================================================

/// Extension trait for semantic terminal styling.
pub trait Stylize: Display {
    /// Accent color (cyan) for primary information.
    ///
    /// Use for: stage names, application ids
    fn accent(&self) -> Styled<&Self> {
        Styled::new(self, ACCENT, Stream::Stdout)
    }

    /// Success color (green) for completion states.
    ///
    /// Use for: approvals, completed stages, positive metrics
    fn success(&self) -> Styled<&Self> {
        Styled::new(self, SUCCESS, Stream::Stdout)
    }

    /// Error color (red) for failures.
    ///
    /// Use for: rejections, failed stages, negative metrics
    /// Default stream: stderr
    fn error(&self) -> Styled<&Self> {
        Styled::new(self, ERROR, Stream::Stderr)
    }

    /// Warning color (yellow) for attention-needed states.
    ///
    /// Use for: manual review, invalid field values
    /// Default stream: stderr
    fn warn(&self) -> Styled<&Self> {
        Styled::new(self, WARN, Stream::Stderr)
    }

    /// Muted style (dim) for secondary information.
    ///
    /// Use for: hints, timestamps, in-progress bullets
    fn muted(&self) -> Styled<&Self> {
        Styled::new(self, MUTED, Stream::Stdout)
    }

    /// Emphasis style (bold) for headers.
    ///
    /// Use for: section headers, pipeline title
    fn emphasis(&self) -> Styled<&Self> {
        Styled::new(self, EMPHASIS, Stream::Stdout)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

// ============================================================================
// Symbols
// ============================================================================

/// Success checkmark
pub const CHECK: &str = "✓";

/// Error/failure cross
pub const CROSS: &str = "✗";

/// Bullet for stages in progress
pub const BULLET: &str = "○";

/// Green checkmark for completed stages.
#[inline]
pub const fn check() -> Styled<&'static str> {
    Styled::new(CHECK, SUCCESS, Stream::Stdout)
}

/// Red cross for failed stages, rendered on stdout next to the stage line.
#[inline]
pub const fn cross() -> Styled<&'static str> {
    Styled::new(CROSS, ERROR, Stream::Stdout)
}

/// Dimmed bullet for a stage in progress (plain output).
#[inline]
pub const fn bullet() -> Styled<&'static str> {
    Styled::new(BULLET, MUTED, Stream::Stdout)
}

// ============================================================================
// Outcome and dashboard labels
// ============================================================================

/// Result title styled by outcome: green for approvals, red otherwise.
pub fn outcome_title(kind: OutcomeKind, title: &str) -> String {
    match kind {
        OutcomeKind::Approved => title.success().to_string(),
        _ => title.error().for_stdout().to_string(),
    }
}

/// Dashboard decision label colored by decision.
pub fn decision_label(decision: &str) -> String {
    match decision.trim() {
        "APPROVED" => decision.success().to_string(),
        "REJECTED" => decision.error().for_stdout().to_string(),
        _ => decision.warn().for_stdout().to_string(),
    }
}

// ============================================================================
// Progress styles
// ============================================================================

/// Spinner style for the active stage.
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .expect("hardcoded spinner template is valid")
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
}

/// Plain style for a stage line that stopped spinning.
pub fn settled_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg}").expect("hardcoded settled template is valid")
}

/// Bar style for a metric row, colored by tier.
pub fn metric_style(tier: Tier) -> ProgressStyle {
    let template = match tier {
        Tier::Positive => "  {prefix:<24} {bar:30.green} {msg}",
        Tier::Neutral => "  {prefix:<24} {bar:30.yellow} {msg}",
        Tier::Negative => "  {prefix:<24} {bar:30.red} {msg}",
    };
    ProgressStyle::with_template(template)
        .expect("hardcoded metric template is valid")
        .progress_chars("█▉░")
}
