use crate::classifier::{ClassifierError, Prediction};

/// An image the user picked. Replaced wholesale on each selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Where the session currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Empty,
    FileSelected { file: SelectedFile },
    Submitting { file: SelectedFile },
    Result { file: SelectedFile, prediction: Prediction },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectError {
    FileTooLarge { size: u64, limit: u64 },
}

impl std::fmt::Display for SelectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectError::FileTooLarge { size, limit } => write!(
                f,
                "Image is {:.1} MiB; the limit is {:.1} MiB. Please choose a smaller file.",
                *size as f64 / 1_048_576.0,
                *limit as f64 / 1_048_576.0,
            ),
        }
    }
}

impl std::error::Error for SelectError {}

/// What a dispatched request carries. The generation lets the session tell a
/// live response from one it has since moved past.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket {
    pub generation: u64,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Finished(Prediction),
    Failed(ClassifierError),
    /// The session was reset or re-selected while the request was in flight.
    Stale,
}

/// The upload/predict session: `Empty -> FileSelected -> Submitting ->
/// Result`, with `reset` from anywhere. One value, transitioned atomically,
/// so a renderer can never observe a half-updated session.
#[derive(Debug)]
pub struct Session {
    phase: Phase,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Empty,
            generation: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match &self.phase {
            Phase::Empty => None,
            Phase::FileSelected { file }
            | Phase::Submitting { file }
            | Phase::Result { file, .. } => Some(file),
        }
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        match &self.phase {
            Phase::Result { prediction, .. } => Some(prediction),
            _ => None,
        }
    }

    /// Accept a new file, discarding any prior prediction. Files over the
    /// limit are rejected and the session drops back to `Empty`. Either way
    /// the generation moves on, so an in-flight request cannot land anymore.
    pub fn select_file(
        &mut self,
        file: SelectedFile,
        limit: Option<u64>,
    ) -> Result<(), SelectError> {
        self.generation += 1;
        let size = file.bytes.len() as u64;
        if let Some(limit) = limit {
            if size > limit {
                self.phase = Phase::Empty;
                return Err(SelectError::FileTooLarge { size, limit });
            }
        }
        self.phase = Phase::FileSelected { file };
        Ok(())
    }

    /// Start a submission. `None` when there is nothing to submit (empty
    /// session, or one already submitting); that is a no-op, not an error.
    /// Resubmitting from `Result` is allowed.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        let file = match std::mem::replace(&mut self.phase, Phase::Empty) {
            Phase::FileSelected { file } | Phase::Result { file, .. } => file,
            other => {
                self.phase = other;
                return None;
            }
        };
        let ticket = SubmitTicket {
            generation: self.generation,
            file_name: file.name.clone(),
            mime: file.mime.clone(),
            bytes: file.bytes.clone(),
        };
        self.phase = Phase::Submitting { file };
        Some(ticket)
    }

    /// Land a response. Responses whose generation no longer matches are
    /// discarded as `Stale`. A failure clears the whole session.
    pub fn complete_submit(
        &mut self,
        generation: u64,
        result: Result<Prediction, ClassifierError>,
    ) -> SubmitOutcome {
        if generation != self.generation {
            return SubmitOutcome::Stale;
        }
        let file = match std::mem::replace(&mut self.phase, Phase::Empty) {
            Phase::Submitting { file } => file,
            other => {
                // A matching generation without an in-flight submission
                // cannot happen through the public API; drop it.
                self.phase = other;
                return SubmitOutcome::Stale;
            }
        };
        match result {
            Ok(prediction) => {
                self.phase = Phase::Result {
                    file,
                    prediction: prediction.clone(),
                };
                SubmitOutcome::Finished(prediction)
            }
            Err(error) => {
                self.generation += 1;
                SubmitOutcome::Failed(error)
            }
        }
    }

    /// Back to `Empty`, from any phase. A request still in flight will come
    /// back stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.phase = Phase::Empty;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: Option<u64> = Some(2 * 1024 * 1024);

    fn image(len: usize) -> SelectedFile {
        SelectedFile {
            name: "dog.jpg".to_string(),
            mime: "image/jpeg".to_string(),
            bytes: vec![0u8; len],
        }
    }

    fn pyoderma() -> Prediction {
        Prediction {
            class: "Pyoderma".to_string(),
            confidence: 0.9321,
        }
    }

    #[test]
    fn select_then_successful_submit_yields_result() {
        let mut session = Session::new();
        session.select_file(image(1024), LIMIT).unwrap();

        let ticket = session.begin_submit().unwrap();
        assert!(session.is_submitting());
        assert_eq!(ticket.file_name, "dog.jpg");
        assert_eq!(ticket.bytes.len(), 1024);

        let outcome = session.complete_submit(ticket.generation, Ok(pyoderma()));
        assert_eq!(outcome, SubmitOutcome::Finished(pyoderma()));
        assert_eq!(session.prediction(), Some(&pyoderma()));
        assert!(matches!(session.phase(), Phase::Result { .. }));
    }

    #[test]
    fn oversize_file_is_rejected_before_any_submission() {
        let mut session = Session::new();
        let err = session.select_file(image(3 * 1024 * 1024), LIMIT).unwrap_err();

        assert!(matches!(err, SelectError::FileTooLarge { .. }));
        assert_eq!(*session.phase(), Phase::Empty);
        // No file means no ticket, which means no network call can happen.
        assert!(session.begin_submit().is_none());
    }

    #[test]
    fn file_at_the_limit_is_accepted() {
        let mut session = Session::new();
        session.select_file(image(2 * 1024 * 1024), LIMIT).unwrap();
        assert!(matches!(session.phase(), Phase::FileSelected { .. }));
    }

    #[test]
    fn no_limit_accepts_anything() {
        let mut session = Session::new();
        session.select_file(image(3 * 1024 * 1024), None).unwrap();
        assert!(session.selected_file().is_some());
    }

    #[test]
    fn submit_with_nothing_selected_is_a_noop() {
        let mut session = Session::new();
        assert!(session.begin_submit().is_none());
        assert_eq!(*session.phase(), Phase::Empty);
    }

    #[test]
    fn submit_while_submitting_is_a_noop() {
        let mut session = Session::new();
        session.select_file(image(16), LIMIT).unwrap();
        let first = session.begin_submit().unwrap();
        assert!(session.begin_submit().is_none());
        // The original submission still lands.
        let outcome = session.complete_submit(first.generation, Ok(pyoderma()));
        assert_eq!(outcome, SubmitOutcome::Finished(pyoderma()));
    }

    #[test]
    fn reset_clears_every_phase() {
        let mut session = Session::new();
        session.reset();
        assert_eq!(*session.phase(), Phase::Empty);

        session.select_file(image(16), LIMIT).unwrap();
        session.reset();
        assert_eq!(*session.phase(), Phase::Empty);
        assert!(session.selected_file().is_none());

        session.select_file(image(16), LIMIT).unwrap();
        session.begin_submit().unwrap();
        session.reset();
        assert_eq!(*session.phase(), Phase::Empty);

        session.select_file(image(16), LIMIT).unwrap();
        let ticket = session.begin_submit().unwrap();
        session.complete_submit(ticket.generation, Ok(pyoderma()));
        session.reset();
        assert_eq!(*session.phase(), Phase::Empty);
        assert!(session.prediction().is_none());
    }

    #[test]
    fn failure_clears_the_session() {
        let mut session = Session::new();
        session.select_file(image(16), LIMIT).unwrap();
        let ticket = session.begin_submit().unwrap();

        let error = ClassifierError::Remote("Invalid image".to_string());
        let outcome = session.complete_submit(ticket.generation, Err(error.clone()));
        assert_eq!(outcome, SubmitOutcome::Failed(error));
        assert_eq!(*session.phase(), Phase::Empty);
        assert!(session.selected_file().is_none());
    }

    #[test]
    fn response_after_reset_is_stale() {
        let mut session = Session::new();
        session.select_file(image(16), LIMIT).unwrap();
        let ticket = session.begin_submit().unwrap();

        session.reset();

        let outcome = session.complete_submit(ticket.generation, Ok(pyoderma()));
        assert_eq!(outcome, SubmitOutcome::Stale);
        // The reset session must not be repopulated.
        assert_eq!(*session.phase(), Phase::Empty);
        assert!(session.prediction().is_none());
    }

    #[test]
    fn response_after_new_selection_is_stale() {
        let mut session = Session::new();
        session.select_file(image(16), LIMIT).unwrap();
        let ticket = session.begin_submit().unwrap();

        session.select_file(image(32), LIMIT).unwrap();

        let outcome = session.complete_submit(ticket.generation, Ok(pyoderma()));
        assert_eq!(outcome, SubmitOutcome::Stale);
        assert!(matches!(session.phase(), Phase::FileSelected { .. }));
        assert_eq!(session.selected_file().unwrap().bytes.len(), 32);
    }

    #[test]
    fn stale_response_after_reselection_leaves_no_submission_live() {
        let mut session = Session::new();
        session.select_file(image(16), LIMIT).unwrap();
        let ticket = session.begin_submit().unwrap();

        // A new selection mid-flight supersedes the request.
        session.select_file(image(32), LIMIT).unwrap();

        let outcome = session.complete_submit(ticket.generation, Ok(pyoderma()));
        assert_eq!(outcome, SubmitOutcome::Stale);
        // Nothing is in flight anymore, so submit controls can be released
        // and the new image is still submittable.
        assert!(!session.is_submitting());
        let retry = session.begin_submit().unwrap();
        assert_eq!(retry.bytes.len(), 32);
    }

    #[test]
    fn stale_response_does_not_disturb_a_newer_submission() {
        let mut session = Session::new();
        session.select_file(image(16), LIMIT).unwrap();
        let old = session.begin_submit().unwrap();

        session.select_file(image(32), LIMIT).unwrap();
        let new = session.begin_submit().unwrap();

        // The old response lands while the new request is in flight.
        let outcome = session.complete_submit(old.generation, Ok(pyoderma()));
        assert_eq!(outcome, SubmitOutcome::Stale);
        assert!(session.is_submitting());

        // The newer submission still completes normally.
        let outcome = session.complete_submit(new.generation, Ok(pyoderma()));
        assert_eq!(outcome, SubmitOutcome::Finished(pyoderma()));
    }

    #[test]
    fn new_selection_discards_the_previous_prediction() {
        let mut session = Session::new();
        session.select_file(image(16), LIMIT).unwrap();
        let ticket = session.begin_submit().unwrap();
        session.complete_submit(ticket.generation, Ok(pyoderma()));
        assert!(session.prediction().is_some());

        session.select_file(image(32), LIMIT).unwrap();
        assert!(session.prediction().is_none());
    }
}
