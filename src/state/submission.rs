use crate::core::FormRecord;
use crate::error::SubmitError;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};

pub type SubmitResult = Result<(), SubmitError>;

/// What a completion handler hands back to the sequencer.
pub enum Submission {
    /// Completed synchronously.
    Settled(SubmitResult),
    /// Still running; the result arrives on the channel.
    Pending(Receiver<SubmitResult>),
}

/// Receives the final record when the last step advances.
pub trait CompletionHandler: Send {
    fn on_complete(&mut self, record: FormRecord) -> Submission;
}

impl<H: CompletionHandler + ?Sized> CompletionHandler for Box<H> {
    fn on_complete(&mut self, record: FormRecord) -> Submission {
        (**self).on_complete(record)
    }
}

/// Synchronous handler built from a closure.
pub struct FnCompletion<F>(F);

pub fn completion_fn<F>(f: F) -> FnCompletion<F>
where
    F: FnMut(FormRecord) -> SubmitResult + Send,
{
    FnCompletion(f)
}

impl<F> CompletionHandler for FnCompletion<F>
where
    F: FnMut(FormRecord) -> SubmitResult + Send,
{
    fn on_complete(&mut self, record: FormRecord) -> Submission {
        Submission::Settled((self.0)(record))
    }
}

/// Runs the job on a worker thread so the event loop keeps drawing while a
/// slow backend call is in flight.
pub struct BackgroundCompletion<F> {
    job: Arc<F>,
}

impl<F> BackgroundCompletion<F>
where
    F: Fn(FormRecord) -> SubmitResult + Send + Sync + 'static,
{
    pub fn new(job: F) -> Self {
        Self { job: Arc::new(job) }
    }
}

impl<F> CompletionHandler for BackgroundCompletion<F>
where
    F: Fn(FormRecord) -> SubmitResult + Send + Sync + 'static,
{
    fn on_complete(&mut self, record: FormRecord) -> Submission {
        let (tx, rx) = mpsc::channel();
        let job = Arc::clone(&self.job);
        std::thread::spawn(move || {
            let _ = tx.send(job(record));
        });
        Submission::Pending(rx)
    }
}
