use crate::app::WizardState;
use crate::terminal::{CursorPos, TerminalSize};
use crate::ui::span::{Span, SpanLine};
use crate::ui::stepper::Stepper;
use crate::ui::style::{Color, Style};

const GLOBAL_SHORTCUTS: &[(&str, &str)] = &[
    ("Enter", "continue"),
    ("Tab", "next field"),
    ("Esc", "back"),
    ("Alt-1..9", "jump to step"),
    ("Ctrl-C", "quit"),
];

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

#[derive(Debug, Clone)]
pub struct RendererConfig {
    pub show_shortcuts: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            show_shortcuts: true,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, state: &WizardState, terminal_size: TerminalSize) -> RenderFrame {
        let sequencer = state.sequencer();
        let step = sequencer.current_step().renderer();
        let mut frame = RenderFrame::default();

        frame
            .lines
            .extend(Stepper::new(sequencer.steps(), sequencer.current_index()).lines(terminal_size.width));
        frame.lines.push(Vec::new());

        frame.lines.push(vec![Span::styled(
            step.title().to_string(),
            Style::new().color(Color::Cyan).bold(),
        )]);
        if !step.description().is_empty() {
            frame.lines.push(vec![Span::styled(
                step.description().to_string(),
                Style::new().dim(),
            )]);
        }
        frame.lines.push(Vec::new());

        let body = step.draw();
        if !sequencer.is_submitting() {
            let row_offset = frame.lines.len() as u16;
            frame.cursor = body.cursor.map(|cursor| CursorPos {
                col: cursor.col,
                row: cursor.row.saturating_add(row_offset),
            });
        }
        frame.lines.extend(body.lines);
        frame.lines.push(Vec::new());

        if let Some(error) = state.last_error() {
            frame.lines.push(vec![Span::styled(
                format!("✗ {error}"),
                Style::new().color(Color::Red).bold(),
            )]);
            frame.lines.push(Vec::new());
        }

        frame.lines.push(footer(state));

        if self.config.show_shortcuts {
            let shortcuts = GLOBAL_SHORTCUTS.iter().chain(step.shortcuts());
            frame.lines.push(shortcut_line(shortcuts));
        }

        frame
    }
}

fn footer(state: &WizardState) -> SpanLine {
    let sequencer = state.sequencer();
    let submitting = sequencer.is_submitting();

    let back_style = if sequencer.is_first() || submitting {
        Style::new().color(Color::DarkGrey).dim()
    } else {
        Style::new().color(Color::White)
    };
    let mut line = vec![Span::styled("[ Back ]", back_style), Span::new("   ")];

    if submitting {
        line.push(state.spinner().span());
        line.push(Span::styled(
            " Submitting...",
            Style::new().color(Color::Cyan),
        ));
    } else {
        let label = if sequencer.is_last() {
            "[ Complete ]"
        } else {
            "[ Continue ]"
        };
        line.push(Span::styled(label, Style::new().color(Color::Green).bold()));
    }
    line
}

fn shortcut_line<'a>(shortcuts: impl Iterator<Item = &'a (&'a str, &'a str)>) -> SpanLine {
    let mut line = SpanLine::new();
    for (idx, (key, action)) in shortcuts.enumerate() {
        if idx > 0 {
            line.push(Span::styled("  ", Style::new()));
        }
        line.push(Span::styled(key.to_string(), Style::new().color(Color::Yellow)));
        line.push(Span::styled(
            format!(" {action}"),
            Style::new().color(Color::DarkGrey),
        ));
    }
    line
}
