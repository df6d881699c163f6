use crate::app::WizardState;
use crate::runtime::command::Command;
use crate::runtime::effect::Effect;
use crate::steps::StepInput;

pub struct Reducer;

impl Reducer {
    pub fn reduce(state: &mut WizardState, command: Command) -> Vec<Effect> {
        let changed = match command {
            Command::Exit => {
                state.request_exit();
                true
            }
            Command::Submit => state.dispatch(StepInput::Submit),
            Command::Back => state.dispatch(StepInput::Back),
            Command::NextFocus => state.dispatch(StepInput::FocusNext),
            Command::PrevFocus => state.dispatch(StepInput::FocusPrev),
            Command::InputKey(key) => state.dispatch(StepInput::Key(key)),
            Command::TextAction(action) => state.dispatch(StepInput::Text(action)),
            Command::AddEntry => state.dispatch(StepInput::AddEntry),
            Command::RemoveEntry => state.dispatch(StepInput::RemoveEntry),
            Command::NextEntry => state.dispatch(StepInput::NextEntry),
            Command::PrevEntry => state.dispatch(StepInput::PrevEntry),
            Command::AddItem => state.dispatch(StepInput::AddItem),
            Command::RemoveItem => state.dispatch(StepInput::RemoveItem),
            Command::JumpTo(index) => state.jump_to(index),
            Command::Tick => state.tick(),
            Command::Noop => false,
        };

        let mut effects = Vec::new();
        if changed {
            effects.push(Effect::RequestRender);
        }
        if state.should_exit() {
            effects.push(Effect::Exit);
        }
        effects
    }
}
