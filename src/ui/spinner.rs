use crate::ui::span::Span;
use crate::ui::style::{Color, Style};

const BRAILLE: &[char] = &['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];

/// Busy indicator shown on the Complete button while a submission is in flight.
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % BRAILLE.len();
    }

    pub fn glyph(&self) -> char {
        BRAILLE[self.frame % BRAILLE.len()]
    }

    pub fn span(&self) -> Span {
        Span::styled(self.glyph().to_string(), Style::new().color(Color::Cyan))
    }
}

#[cfg(test)]
mod tests {
    use super::Spinner;

    #[test]
    fn tick_cycles_through_frames() {
        let mut spinner = Spinner::new();
        let first = spinner.glyph();
        for _ in 0..8 {
            spinner.tick();
        }
        assert_eq!(spinner.glyph(), first);
        spinner.tick();
        assert_ne!(spinner.glyph(), first);
    }
}
