use resume_wizard::app::{OutcomeSlot, build_resume_wizard, offline_completion};
use resume_wizard::config::AppConfig;
use resume_wizard::resume::ResumeData;
use resume_wizard::state::{Transition, completion_fn};
use resume_wizard::terminal::{KeyCode, KeyEvent};
use resume_wizard::widgets::traits::DrawOutput;
use resume_wizard::{FormRecord, Sequencer, StepComponent, StepContext, StepDescriptor, StepInput};
use std::sync::{Arc, Mutex};

fn type_text(sequencer: &mut Sequencer, text: &str) {
    for ch in text.chars() {
        sequencer.dispatch(StepInput::Key(KeyEvent::plain(KeyCode::Char(ch))));
    }
}

fn seed() -> FormRecord {
    serde_json::from_str(
        r#"{
            "education": [{
                "id": "edu-1",
                "school": "State University",
                "degree": "Bachelor's",
                "fieldOfStudy": "Computer Science",
                "startDate": "2016",
                "endDate": "2020"
            }],
            "experience": [{
                "id": "exp-1",
                "company": "Acme",
                "jobTitle": "Engineer",
                "startDate": "2020",
                "current": true,
                "bullets": ["Built the billing service"]
            }]
        }"#,
    )
    .expect("seed record")
}

#[test]
fn resume_flow_completes_with_every_section() {
    let slot = OutcomeSlot::new();
    let mut wizard = build_resume_wizard(
        &AppConfig::default(),
        Some(seed()),
        offline_completion(slot.clone()),
    )
    .expect("wizard");

    // Personal info: the four required fields, in order.
    for (idx, value) in ["Jane Doe", "jane@example.com", "555-0100", "Berlin"]
        .into_iter()
        .enumerate()
    {
        if idx > 0 {
            wizard.dispatch(StepInput::FocusNext);
        }
        type_text(&mut wizard, value);
    }
    wizard.dispatch(StepInput::Submit);
    assert_eq!(wizard.current_index(), 1);

    // Seeded education and experience entries are already valid.
    wizard.dispatch(StepInput::Submit);
    assert_eq!(wizard.current_index(), 2);
    wizard.dispatch(StepInput::Submit);
    assert_eq!(wizard.current_index(), 3);

    // Skills: Enter on a filled name adds it, Enter again continues.
    wizard.dispatch(StepInput::Submit);
    assert_eq!(wizard.current_index(), 3, "no skills yet");
    type_text(&mut wizard, "Rust");
    wizard.dispatch(StepInput::Submit);
    assert_eq!(wizard.current_index(), 3);
    wizard.dispatch(StepInput::Submit);
    assert_eq!(wizard.current_index(), 4);

    // Job target, then completion.
    type_text(&mut wizard, "Backend Engineer");
    let result = wizard.dispatch(StepInput::Submit);
    assert_eq!(
        result.transitions,
        vec![Transition::SubmissionSettled(Ok(()))]
    );

    let data = ResumeData::from_record(wizard.record()).expect("resume data");
    assert_eq!(data.personal.full_name, "Jane Doe");
    assert_eq!(data.education.len(), 1);
    assert_eq!(data.experience[0].end_date, "Present");
    assert_eq!(data.skills[0].name, "Rust");
    assert_eq!(data.skills[0].category, "Technical");
    assert_eq!(data.skill_categories.len(), 10);
    assert_eq!(data.job_target.target_job_title, "Backend Engineer");

    let outcome = slot.take().expect("outcome stored");
    assert!(outcome.success);
    assert_eq!(outcome.data.map(|p| p.email), Some("jane@example.com".to_string()));
}

#[test]
fn going_back_keeps_entered_data() {
    let mut wizard =
        build_resume_wizard(&AppConfig::default(), Some(seed()), completion_fn(|_| Ok(())))
            .expect("wizard");
    wizard.jump_to(1);
    wizard.dispatch(StepInput::Back);
    assert_eq!(wizard.current_index(), 0);
    assert_eq!(wizard.jump_to(3), Transition::Ignored);
    assert_eq!(
        wizard.record().get("education").and_then(|v| v.as_list()).map(|l| l.len()),
        Some(1)
    );
}

/// Requires `key` to be typed before it lets the wizard advance.
struct Require {
    key: &'static str,
    draft: String,
}

impl StepComponent for Require {
    fn title(&self) -> &str {
        self.key
    }

    fn activate(&mut self, shared: &FormRecord) {
        self.draft = shared.text(self.key).unwrap_or_default().to_string();
    }

    fn handle(&mut self, input: StepInput, ctx: &mut StepContext<'_>) -> bool {
        match input {
            StepInput::Key(key) => match key.typed_char() {
                Some(ch) => {
                    self.draft.push(ch);
                    ctx.report_update(FormRecord::new().with(self.key, self.draft.clone()));
                    true
                }
                None => false,
            },
            StepInput::Submit if !self.draft.is_empty() => {
                ctx.advance();
                true
            }
            _ => false,
        }
    }

    fn draw(&self) -> DrawOutput {
        DrawOutput::plain_lines(vec![self.draft.clone()])
    }
}

struct Finish;

impl StepComponent for Finish {
    fn title(&self) -> &str {
        "done"
    }

    fn activate(&mut self, _shared: &FormRecord) {}

    fn handle(&mut self, input: StepInput, ctx: &mut StepContext<'_>) -> bool {
        if input == StepInput::Submit {
            ctx.advance();
        }
        true
    }

    fn draw(&self) -> DrawOutput {
        DrawOutput::default()
    }
}

#[test]
fn three_step_wizard_hands_over_both_fields() {
    let received: Arc<Mutex<Vec<FormRecord>>> = Arc::default();
    let sink = Arc::clone(&received);
    let steps = vec![
        StepDescriptor::new("a", "A", Require { key: "x", draft: String::new() }),
        StepDescriptor::new("b", "B", Require { key: "y", draft: String::new() }),
        StepDescriptor::new("c", "C", Finish),
    ];
    let mut wizard = Sequencer::new(
        steps,
        None,
        completion_fn(move |record| {
            sink.lock().expect("lock").push(record);
            Ok(())
        }),
    )
    .expect("wizard");

    wizard.dispatch(StepInput::Submit);
    assert_eq!(wizard.current_index(), 0);

    type_text(&mut wizard, "foo");
    wizard.dispatch(StepInput::Submit);
    type_text(&mut wizard, "bar");
    wizard.dispatch(StepInput::Submit);
    assert_eq!(wizard.current_index(), 2);
    assert!(received.lock().expect("lock").is_empty());

    wizard.dispatch(StepInput::Submit);
    let received = received.lock().expect("lock");
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].text("x"), Some("foo"));
    assert_eq!(received[0].text("y"), Some("bar"));
}
