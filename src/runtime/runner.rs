use crate::app::WizardState;
use crate::runtime::command::Command;
use crate::runtime::effect::Effect;
use crate::runtime::key_bindings::KeyBindings;
use crate::runtime::reducer::Reducer;
use crate::terminal::{Terminal, TerminalEvent};
use crate::ui::renderer::Renderer;
use std::io;
use std::time::Duration;

const POLL_TIMEOUT: Duration = Duration::from_millis(120);

pub struct Runtime {
    state: WizardState,
    terminal: Terminal,
    key_bindings: KeyBindings,
    renderer: Renderer,
}

impl Runtime {
    pub fn new(state: WizardState, terminal: Terminal) -> Self {
        Self::with_key_bindings(state, terminal, KeyBindings::new())
    }

    pub fn with_key_bindings(
        state: WizardState,
        terminal: Terminal,
        key_bindings: KeyBindings,
    ) -> Self {
        Self {
            state,
            terminal,
            key_bindings,
            renderer: Renderer::default(),
        }
    }

    /// Runs until the wizard completes or the user quits. The terminal is
    /// restored even when the loop fails.
    pub fn run(&mut self) -> io::Result<()> {
        self.terminal.enter()?;

        let run_result = (|| -> io::Result<()> {
            self.render()?;

            while !self.state.should_exit() {
                let event = self.terminal.poll_event(POLL_TIMEOUT)?;
                self.dispatch_terminal_event(event)?;
            }

            Ok(())
        })();

        let exit_result = self.terminal.exit();
        run_result.and(exit_result)
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn into_state(self) -> WizardState {
        self.state
    }

    fn dispatch_terminal_event(&mut self, event: TerminalEvent) -> io::Result<()> {
        match event {
            TerminalEvent::Resize(size) => {
                self.terminal.set_size(size);
                self.render()
            }
            TerminalEvent::Key(key) => {
                let command = self
                    .key_bindings
                    .resolve(key)
                    .unwrap_or(Command::InputKey(key));
                self.process_command(command)
            }
            TerminalEvent::Tick => self.process_command(Command::Tick),
        }
    }

    fn process_command(&mut self, command: Command) -> io::Result<()> {
        let effects = Reducer::reduce(&mut self.state, command);
        self.apply_effects(effects)
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) -> io::Result<()> {
        let mut render_requested = false;

        for effect in effects {
            match effect {
                Effect::RequestRender => render_requested = true,
                Effect::Exit => {
                    tracing::debug!(reason = ?self.state.exit_reason(), "leaving event loop");
                }
            }
        }

        if render_requested && !self.state.should_exit() {
            self.render()?;
        }

        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.renderer.render(&self.state, self.terminal.size());
        self.terminal.render(&frame.lines, frame.cursor)
    }
}
