use crate::state::{StepDescriptor, StepStatus};
use crate::ui::span::{Span, SpanLine, line_width};
use crate::ui::style::{Color, Style};

const BAR_CELLS: usize = 24;

/// Header showing every step's status plus the "Step i of n" progress line.
pub struct Stepper<'a> {
    steps: &'a [StepDescriptor],
    current: usize,
}

impl<'a> Stepper<'a> {
    pub fn new(steps: &'a [StepDescriptor], current: usize) -> Self {
        Self { steps, current }
    }

    /// Falls back to showing only the current step when the full row would
    /// not fit in `width`.
    pub fn lines(&self, width: u16) -> Vec<SpanLine> {
        let full = self.full_row();
        let row = if line_width(&full) <= width as usize {
            full
        } else {
            self.compact_row()
        };
        vec![row, self.progress_row()]
    }

    fn full_row(&self) -> SpanLine {
        let mut line = SpanLine::new();
        for (index, step) in self.steps.iter().enumerate() {
            if index > 0 {
                line.push(Span::styled(" ─ ", Style::new().color(Color::DarkGrey)));
            }
            line.extend(self.step_spans(index, step));
        }
        line
    }

    fn compact_row(&self) -> SpanLine {
        self.steps
            .get(self.current)
            .map(|step| self.step_spans(self.current, step))
            .unwrap_or_default()
    }

    fn step_spans(&self, index: usize, step: &StepDescriptor) -> Vec<Span> {
        let status = StepStatus::of(index, self.current);
        let (marker, style) = match status {
            StepStatus::Completed => ("✓", Style::new().color(Color::Green)),
            StepStatus::Current => ("●", Style::new().color(Color::Blue).bold()),
            StepStatus::Pending => ("○", Style::new().color(Color::DarkGrey)),
        };
        let mut spans = vec![
            Span::styled(format!("{marker} "), style),
            Span::styled(step.label().to_string(), style),
        ];
        if step.is_optional() {
            spans.push(Span::styled(" (Optional)", Style::new().color(Color::DarkGrey)));
        }
        spans
    }

    fn progress_row(&self) -> SpanLine {
        let total = self.steps.len().max(1);
        let position = (self.current + 1).min(total);
        let filled = position * BAR_CELLS / total;
        vec![
            Span::styled(format!("Step {position} of {total}  "), Style::new().bold()),
            Span::styled("█".repeat(filled), Style::new().color(Color::Blue)),
            Span::styled(
                "░".repeat(BAR_CELLS - filled),
                Style::new().color(Color::DarkGrey),
            ),
            Span::styled(
                format!(" {}%", position * 100 / total),
                Style::new().color(Color::DarkGrey),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::{StepComponent, StepContext, StepInput};
    use crate::ui::span::line_text;
    use crate::widgets::traits::DrawOutput;

    struct Blank;

    impl StepComponent for Blank {
        fn title(&self) -> &str {
            "blank"
        }

        fn activate(&mut self, _shared: &crate::core::FormRecord) {}

        fn handle(&mut self, _input: StepInput, _ctx: &mut StepContext<'_>) -> bool {
            false
        }

        fn draw(&self) -> DrawOutput {
            DrawOutput::default()
        }
    }

    fn steps() -> Vec<StepDescriptor> {
        vec![
            StepDescriptor::new("a", "Alpha", Blank),
            StepDescriptor::new("b", "Beta", Blank).optional(),
            StepDescriptor::new("c", "Gamma", Blank),
        ]
    }

    #[test]
    fn markers_follow_position() {
        let steps = steps();
        let lines = Stepper::new(&steps, 1).lines(120);
        assert_eq!(line_text(&lines[0]), "✓ Alpha ─ ● Beta (Optional) ─ ○ Gamma");
        assert!(line_text(&lines[1]).starts_with("Step 2 of 3"));
        assert!(line_text(&lines[1]).ends_with(" 66%"));
    }

    #[test]
    fn narrow_terminal_shows_current_step_only() {
        let steps = steps();
        let lines = Stepper::new(&steps, 2).lines(12);
        assert_eq!(line_text(&lines[0]), "● Gamma");
        assert!(line_text(&lines[1]).ends_with(" 100%"));
    }
}
