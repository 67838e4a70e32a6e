//! GuidedCapture aggregate - one interview from topic to final artifact.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{StateMachine, ValidationError};
use crate::ports::{
    CompletionRequest, CompletionService, MessageRole, RequestMetadata, RequestPurpose,
};

use super::errors::CaptureError;
use super::parser::parse_question_list;
use super::prompts::{
    question_generation_prompt, synthesis_prompt, QUESTION_SYSTEM_PROMPT, SYNTHESIS_SYSTEM_PROMPT,
};
use super::state::{is_answered, CaptureState};
use super::status::CaptureStatus;

/// Number of questions asked when the caller does not say otherwise.
pub const DEFAULT_NUM_QUESTIONS: u32 = 5;

/// Tuning for a new interview.
///
/// Only `num_questions` is part of the persisted snapshot; the model and
/// generation settings belong to the caller and must be supplied again
/// after a resume.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOptions {
    pub num_questions: u32,
    /// Opaque model name passed through to the completion service.
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            num_questions: DEFAULT_NUM_QUESTIONS,
            model: None,
            temperature: None,
            max_tokens: None,
        }
    }
}

impl CaptureOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_questions(mut self, num_questions: u32) -> Self {
        self.num_questions = num_questions;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A structured interview: generate questions, collect answers, synthesize.
///
/// The completion service must implement [`CompletionService`]; anything else
/// is rejected at compile time:
///
/// ```compile_fail
/// use guided_capture::domain::capture::GuidedCapture;
///
/// let capture = GuidedCapture::new("Topic", "Output", "not_a_client");
/// ```
///
/// Mutating operations take `&mut self`; share a session across tasks only
/// behind a lock.
pub struct GuidedCapture {
    topic: String,
    output_format_description: String,
    options: CaptureOptions,
    questions: Vec<String>,
    answers: BTreeMap<String, String>,
    status: CaptureStatus,
    final_output: Option<String>,
    service: Arc<dyn CompletionService>,
}

impl GuidedCapture {
    /// Creates an interview asking the default number of questions.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `topic` or `output_format_description` is blank.
    pub fn new(
        topic: impl Into<String>,
        output_format_description: impl Into<String>,
        service: Arc<dyn CompletionService>,
    ) -> Result<Self, CaptureError> {
        Self::with_options(topic, output_format_description, service, CaptureOptions::default())
    }

    /// Creates an interview with explicit options.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `topic` or `output_format_description` is blank
    /// or `options.num_questions` is 0.
    pub fn with_options(
        topic: impl Into<String>,
        output_format_description: impl Into<String>,
        service: Arc<dyn CompletionService>,
        options: CaptureOptions,
    ) -> Result<Self, CaptureError> {
        let topic = topic.into();
        let output_format_description = output_format_description.into();

        if topic.trim().is_empty() {
            return Err(ValidationError::empty_field("topic").into());
        }
        if output_format_description.trim().is_empty() {
            return Err(ValidationError::empty_field("output_format_description").into());
        }
        if options.num_questions == 0 {
            return Err(ValidationError::out_of_range(
                "num_questions",
                1,
                u32::MAX as i64,
                0,
            )
            .into());
        }

        Ok(Self {
            topic,
            output_format_description,
            options,
            questions: Vec::new(),
            answers: BTreeMap::new(),
            status: CaptureStatus::Uninitialized,
            final_output: None,
            service,
        })
    }

    /// Rebuilds a session from a snapshot, re-attaching a completion service.
    ///
    /// Model and generation settings are not part of the snapshot; set them
    /// with [`GuidedCapture::load_state_with_options`] if needed.
    ///
    /// # Errors
    ///
    /// `MalformedState` if the snapshot is internally inconsistent.
    pub fn load_state(
        state: CaptureState,
        service: Arc<dyn CompletionService>,
    ) -> Result<Self, CaptureError> {
        Self::load_state_with_options(state, service, CaptureOptions::default())
    }

    /// Like [`GuidedCapture::load_state`], keeping the caller's model and
    /// generation settings. `options.num_questions` is ignored in favour of
    /// the snapshot's value.
    pub fn load_state_with_options(
        state: CaptureState,
        service: Arc<dyn CompletionService>,
        options: CaptureOptions,
    ) -> Result<Self, CaptureError> {
        let status = state.validate()?;

        Ok(Self {
            topic: state.topic,
            output_format_description: state.output_format_description,
            options: CaptureOptions {
                num_questions: state.num_questions,
                ..options
            },
            questions: state.questions,
            answers: state.answers,
            status,
            final_output: state.final_output,
            service,
        })
    }

    /// Plain-data snapshot of everything except the completion service.
    pub fn get_state(&self) -> CaptureState {
        CaptureState {
            topic: self.topic.clone(),
            output_format_description: self.output_format_description.clone(),
            num_questions: self.options.num_questions,
            questions: self.questions.clone(),
            answers: self.answers.clone(),
            questions_generated: self.status.questions_generated(),
            synthesis_complete: self.status.synthesis_complete(),
            final_output: self.final_output.clone(),
        }
    }

    // ----- Accessors -----

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn output_format_description(&self) -> &str {
        &self.output_format_description
    }

    pub fn num_questions(&self) -> u32 {
        self.options.num_questions
    }

    pub fn model(&self) -> Option<&str> {
        self.options.model.as_deref()
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self) -> &BTreeMap<String, String> {
        &self.answers
    }

    /// Current answer for `question`, empty when pending.
    pub fn answer(&self, question: &str) -> Option<&str> {
        self.answers.get(question).map(String::as_str)
    }

    pub fn status(&self) -> CaptureStatus {
        self.status
    }

    pub fn questions_generated(&self) -> bool {
        self.status.questions_generated()
    }

    pub fn synthesis_complete(&self) -> bool {
        self.status.synthesis_complete()
    }

    pub fn final_output(&self) -> Option<&str> {
        self.final_output.as_deref()
    }

    // ----- Operations -----

    /// Asks the completion service for questions, replacing any current set.
    ///
    /// Answers survive only for questions that come back verbatim; every
    /// other question starts out pending. On error the session is unchanged.
    ///
    /// # Errors
    ///
    /// - `UpstreamService` if the completion call fails
    /// - `MalformedResponse` if the output is not a non-empty JSON string array
    pub async fn generate_questions(&mut self) -> Result<Vec<String>, CaptureError> {
        let next = self.status.transition_to(CaptureStatus::QuestionsReady)?;

        let prompt = question_generation_prompt(
            &self.topic,
            &self.output_format_description,
            self.options.num_questions,
        );
        let raw = self
            .complete(RequestPurpose::QuestionGeneration, QUESTION_SYSTEM_PROMPT, prompt)
            .await?;
        let questions = parse_question_list(&raw, self.options.num_questions as usize)?;

        let mut previous = std::mem::take(&mut self.answers);
        self.answers = questions
            .iter()
            .map(|q| (q.clone(), previous.remove(q).unwrap_or_default()))
            .collect();
        self.questions = questions;
        self.final_output = None;
        self.status = next;

        debug!(
            requested = self.options.num_questions,
            generated = self.questions.len(),
            kept_answers = self.answers.values().filter(|a| is_answered(a)).count(),
            "interview questions generated"
        );

        Ok(self.questions.clone())
    }

    /// Returns the current questions, generating them first if there are none.
    pub async fn get_questions(&mut self) -> Result<Vec<String>, CaptureError> {
        if self.status.questions_generated() {
            Ok(self.questions.clone())
        } else {
            self.generate_questions().await
        }
    }

    /// Records an answer, discarding any previous synthesis.
    ///
    /// # Errors
    ///
    /// `UnknownQuestion` if `question` is not in the current set; nothing
    /// changes in that case.
    pub fn submit_answer(
        &mut self,
        question: &str,
        answer: impl Into<String>,
    ) -> Result<(), CaptureError> {
        self.ensure_known(question)?;
        self.status = self.status.transition_to(CaptureStatus::QuestionsReady)?;
        self.answers.insert(question.to_string(), answer.into());
        self.final_output = None;
        Ok(())
    }

    /// Records many answers at once, all or nothing.
    ///
    /// Entries are applied in iteration order, so a later entry for the same
    /// question wins.
    ///
    /// # Errors
    ///
    /// `UnknownQuestion` for the first unknown key; no answer is applied.
    pub fn submit_answers_bulk<I, Q, A>(&mut self, entries: I) -> Result<(), CaptureError>
    where
        I: IntoIterator<Item = (Q, A)>,
        Q: Into<String>,
        A: Into<String>,
    {
        let entries: Vec<(String, String)> = entries
            .into_iter()
            .map(|(q, a)| (q.into(), a.into()))
            .collect();

        for (question, _) in &entries {
            self.ensure_known(question)?;
        }
        if entries.is_empty() {
            return Ok(());
        }

        self.status = self.status.transition_to(CaptureStatus::QuestionsReady)?;
        self.answers.extend(entries);
        self.final_output = None;
        Ok(())
    }

    /// Questions whose answer is missing or blank, in question order.
    pub fn get_missing_questions(&self) -> Vec<&str> {
        self.questions
            .iter()
            .filter(|q| !self.answers.get(*q).is_some_and(|a| is_answered(a)))
            .map(String::as_str)
            .collect()
    }

    /// True once every question has a non-empty answer.
    pub fn all_answered(&self) -> bool {
        self.status.questions_generated() && self.get_missing_questions().is_empty()
    }

    /// Synthesizes the final artifact from the current answers.
    ///
    /// Unanswered questions do not block synthesis; they are presented to
    /// the model as "No answer provided".
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if questions have not been generated
    /// - `UpstreamService` if the completion call fails
    pub async fn process_answers(&mut self) -> Result<String, CaptureError> {
        let next = self.status.transition_to(CaptureStatus::Synthesized)?;

        let pairs = self.questions.iter().map(|q| {
            let answer = self.answers.get(q).map(String::as_str).unwrap_or("");
            (q.as_str(), answer)
        });
        let prompt = synthesis_prompt(&self.topic, &self.output_format_description, pairs);

        let output = self
            .complete(RequestPurpose::Synthesis, SYNTHESIS_SYSTEM_PROMPT, prompt)
            .await?;

        debug!(
            missing_answers = self.get_missing_questions().len(),
            output_len = output.len(),
            "interview synthesized"
        );

        self.final_output = Some(output.clone());
        self.status = next;
        Ok(output)
    }

    fn ensure_known(&self, question: &str) -> Result<(), CaptureError> {
        if self.questions.iter().any(|q| q == question) {
            Ok(())
        } else {
            Err(CaptureError::unknown_question(question))
        }
    }

    async fn complete(
        &self,
        purpose: RequestPurpose,
        system_prompt: &str,
        prompt: String,
    ) -> Result<String, CaptureError> {
        let request = CompletionRequest::new(RequestMetadata::new(purpose))
            .with_system_prompt(system_prompt)
            .with_message(MessageRole::User, prompt)
            .with_model(self.options.model.clone())
            .with_temperature(self.options.temperature)
            .with_max_tokens(self.options.max_tokens);

        let response = self.service.complete(request).await?;
        Ok(response.content)
    }
}

impl fmt::Debug for GuidedCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuidedCapture")
            .field("topic", &self.topic)
            .field("output_format_description", &self.output_format_description)
            .field("options", &self.options)
            .field("questions", &self.questions)
            .field("answers", &self.answers)
            .field("status", &self.status)
            .field("final_output", &self.final_output)
            .field("service", &self.service.provider_info().name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockCompletionService, MockError};
    use crate::domain::capture::MISSING_ANSWER_PLACEHOLDER;
    use crate::ports::AIError;

    fn mock() -> MockCompletionService {
        MockCompletionService::new()
    }

    fn capture_with(service: &MockCompletionService) -> GuidedCapture {
        GuidedCapture::new(
            "Test Topic",
            "Test Output Format",
            Arc::new(service.clone()),
        )
        .unwrap()
    }

    async fn ready_capture(service: &MockCompletionService) -> GuidedCapture {
        let mut capture = capture_with(&service.clone().with_response(r#"["Q1?","Q2?"]"#));
        capture.generate_questions().await.unwrap();
        capture
    }

    // ----- construction -----

    #[test]
    fn new_uses_defaults() {
        let capture = capture_with(&mock());
        assert_eq!(capture.topic(), "Test Topic");
        assert_eq!(capture.output_format_description(), "Test Output Format");
        assert_eq!(capture.num_questions(), 5);
        assert_eq!(capture.status(), CaptureStatus::Uninitialized);
        assert!(!capture.questions_generated());
        assert!(!capture.synthesis_complete());
        assert!(capture.final_output().is_none());
        assert!(capture.questions().is_empty());
        assert!(capture.answers().is_empty());
        assert!(capture.model().is_none());
    }

    #[test]
    fn empty_topic_is_invalid_argument() {
        let err = GuidedCapture::new("", "Output", Arc::new(mock())).unwrap_err();
        match err {
            CaptureError::InvalidArgument(ValidationError::EmptyField { field }) => {
                assert_eq!(field, "topic")
            }
            other => panic!("expected EmptyField, got {:?}", other),
        }
    }

    #[test]
    fn blank_description_is_invalid_argument() {
        let err = GuidedCapture::new("Topic", "   ", Arc::new(mock())).unwrap_err();
        assert!(matches!(err, CaptureError::InvalidArgument(_)));
    }

    #[test]
    fn zero_questions_is_invalid_argument() {
        let err = GuidedCapture::with_options(
            "Topic",
            "Output",
            Arc::new(mock()),
            CaptureOptions::new().with_num_questions(0),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CaptureError::InvalidArgument(ValidationError::OutOfRange { .. })
        ));
    }

    // ----- generate_questions -----

    #[tokio::test]
    async fn generate_questions_populates_questions_and_pending_answers() {
        let service = mock().with_response(r#"["Q1?","Q2?"]"#);
        let mut capture = capture_with(&service);

        let questions = capture.generate_questions().await.unwrap();

        assert_eq!(questions, vec!["Q1?", "Q2?"]);
        assert!(capture.questions_generated());
        assert_eq!(capture.status(), CaptureStatus::QuestionsReady);
        assert_eq!(
            capture.answers(),
            &BTreeMap::from([
                ("Q1?".to_string(), String::new()),
                ("Q2?".to_string(), String::new()),
            ])
        );
        assert!(capture.questions().len() <= capture.num_questions() as usize);
    }

    #[tokio::test]
    async fn generate_questions_sends_one_request_with_settings() {
        let service = mock().with_response(r#"["Q1?"]"#);
        let mut capture = GuidedCapture::with_options(
            "Company Vision",
            "A mission statement",
            Arc::new(service.clone()),
            CaptureOptions::new()
                .with_num_questions(3)
                .with_model("gpt-4o")
                .with_temperature(0.2)
                .with_max_tokens(300),
        )
        .unwrap();

        capture.generate_questions().await.unwrap();

        let calls = service.get_calls();
        assert_eq!(calls.len(), 1);
        let request = &calls[0];
        assert_eq!(request.metadata.purpose, RequestPurpose::QuestionGeneration);
        assert_eq!(request.model.as_deref(), Some("gpt-4o"));
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.max_tokens, Some(300));
        assert!(request.prompt_text().contains("Company Vision"));
        assert!(request.prompt_text().contains("exactly 3 strings"));
    }

    #[tokio::test]
    async fn generate_questions_truncates_to_num_questions() {
        let service = mock().with_response(r#"["A?","B?","C?"]"#);
        let mut capture = GuidedCapture::with_options(
            "Topic",
            "Output",
            Arc::new(service),
            CaptureOptions::new().with_num_questions(2),
        )
        .unwrap();

        assert_eq!(capture.generate_questions().await.unwrap(), vec!["A?", "B?"]);
    }

    #[tokio::test]
    async fn malformed_response_leaves_session_untouched() {
        let service = mock().with_response("I'd be happy to help!");
        let mut capture = capture_with(&service);

        let err = capture.generate_questions().await.unwrap_err();

        assert_eq!(err.raw_response(), Some("I'd be happy to help!"));
        assert_eq!(capture.status(), CaptureStatus::Uninitialized);
        assert!(capture.questions().is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_as_upstream_service_error() {
        let service = mock().with_error(MockError::AuthenticationFailed);
        let mut capture = capture_with(&service);

        let err = capture.generate_questions().await.unwrap_err();

        assert!(matches!(
            err,
            CaptureError::UpstreamService(AIError::AuthenticationFailed)
        ));
        assert!(!capture.questions_generated());
    }

    #[tokio::test]
    async fn regeneration_keeps_answers_for_recurring_questions_only() {
        let service = mock()
            .with_response(r#"["Q1?","Q2?"]"#)
            .with_response(r#"["Q2?","Q3?"]"#);
        let mut capture = capture_with(&service);
        capture.generate_questions().await.unwrap();
        capture
            .submit_answers_bulk([("Q1?", "one"), ("Q2?", "two")])
            .unwrap();

        capture.generate_questions().await.unwrap();

        assert_eq!(capture.questions(), vec!["Q2?", "Q3?"]);
        assert_eq!(capture.answer("Q2?"), Some("two"));
        assert_eq!(capture.answer("Q3?"), Some(""));
        assert_eq!(capture.answer("Q1?"), None);
    }

    #[tokio::test]
    async fn regeneration_after_synthesis_clears_output() {
        let service = mock()
            .with_response(r#"["Q1?"]"#)
            .with_response("Final!")
            .with_response(r#"["Q1?"]"#);
        let mut capture = capture_with(&service);
        capture.generate_questions().await.unwrap();
        capture.process_answers().await.unwrap();

        capture.generate_questions().await.unwrap();

        assert_eq!(capture.status(), CaptureStatus::QuestionsReady);
        assert!(capture.final_output().is_none());
    }

    #[tokio::test]
    async fn get_questions_generates_only_once() {
        let service = mock().with_response(r#"["Q1?","Q2?"]"#);
        let mut capture = capture_with(&service);

        let first = capture.get_questions().await.unwrap();
        let second = capture.get_questions().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(service.call_count(), 1);
    }

    // ----- answers -----

    #[tokio::test]
    async fn submit_answer_records_answer() {
        let mut capture = ready_capture(&mock()).await;

        capture.submit_answer("Q1?", "42").unwrap();

        assert_eq!(capture.answer("Q1?"), Some("42"));
        assert_eq!(capture.get_missing_questions(), vec!["Q2?"]);
        assert!(!capture.synthesis_complete());
        assert!(capture.final_output().is_none());
    }

    #[tokio::test]
    async fn submit_answer_for_unknown_question_changes_nothing() {
        let mut capture = ready_capture(&mock()).await;
        let before = capture.answers().clone();

        let err = capture.submit_answer("Q9?", "nope").unwrap_err();

        assert!(matches!(err, CaptureError::UnknownQuestion(q) if q == "Q9?"));
        assert_eq!(capture.answers(), &before);
    }

    #[test]
    fn submit_answer_before_generation_is_unknown_question() {
        let mut capture = capture_with(&mock());
        assert!(matches!(
            capture.submit_answer("Q1?", "x"),
            Err(CaptureError::UnknownQuestion(_))
        ));
        assert_eq!(capture.status(), CaptureStatus::Uninitialized);
    }

    #[tokio::test]
    async fn bulk_submission_is_all_or_nothing() {
        let mut capture = ready_capture(&mock()).await;
        let before = capture.answers().clone();

        let err = capture
            .submit_answers_bulk([("Q1?", "a"), ("Q9?", "b")])
            .unwrap_err();

        assert!(matches!(err, CaptureError::UnknownQuestion(_)));
        assert_eq!(capture.answers(), &before);
    }

    #[tokio::test]
    async fn bulk_submission_later_entries_win() {
        let mut capture = ready_capture(&mock()).await;

        capture
            .submit_answers_bulk(vec![("Q1?", "first"), ("Q2?", "b"), ("Q1?", "second")])
            .unwrap();

        assert_eq!(capture.answer("Q1?"), Some("second"));
        assert_eq!(capture.answer("Q2?"), Some("b"));
        assert!(capture.all_answered());
        assert!(capture.get_missing_questions().is_empty());
    }

    #[tokio::test]
    async fn answering_after_synthesis_resets_synthesis() {
        let service = mock().with_response(r#"["Q1?","Q2?"]"#).with_response("Final!");
        let mut capture = capture_with(&service);
        capture.generate_questions().await.unwrap();
        capture.process_answers().await.unwrap();
        assert!(capture.synthesis_complete());

        capture.submit_answer("Q1?", "changed").unwrap();

        assert_eq!(capture.status(), CaptureStatus::QuestionsReady);
        assert!(!capture.synthesis_complete());
        assert!(capture.final_output().is_none());
    }

    #[tokio::test]
    async fn empty_answer_counts_as_missing() {
        let mut capture = ready_capture(&mock()).await;
        capture.submit_answer("Q1?", "").unwrap();
        assert_eq!(capture.get_missing_questions(), vec!["Q1?", "Q2?"]);
    }

    #[tokio::test]
    async fn whitespace_answer_is_missing_and_synthesized_as_placeholder() {
        let service = mock().with_response(r#"["Q1?","Q2?"]"#).with_response("Final!");
        let mut capture = capture_with(&service);
        capture.generate_questions().await.unwrap();
        capture.submit_answers_bulk([("Q1?", "   "), ("Q2?", "b")]).unwrap();

        assert_eq!(capture.get_missing_questions(), vec!["Q1?"]);
        assert!(!capture.all_answered());

        capture.process_answers().await.unwrap();
        let prompt = service.get_calls()[1].prompt_text();
        assert!(prompt.contains(&format!("Q: Q1?\n   A: {}", MISSING_ANSWER_PLACEHOLDER)));
    }

    // ----- process_answers -----

    #[tokio::test]
    async fn process_answers_sets_final_output() {
        let service = mock().with_response(r#"["Q1?","Q2?"]"#).with_response("Final!");
        let mut capture = capture_with(&service);
        capture.generate_questions().await.unwrap();
        capture.submit_answer("Q1?", "42").unwrap();

        let output = capture.process_answers().await.unwrap();

        assert_eq!(output, "Final!");
        assert_eq!(capture.final_output(), Some("Final!"));
        assert!(capture.synthesis_complete());

        let request = &service.get_calls()[1];
        assert_eq!(request.metadata.purpose, RequestPurpose::Synthesis);
        let prompt = request.prompt_text();
        assert!(prompt.contains("Q: Q1?\n   A: 42"));
        assert!(prompt.contains("Q: Q2?\n   A: No answer provided"));
    }

    #[tokio::test]
    async fn process_answers_before_generation_is_rejected() {
        let service = mock();
        let mut capture = capture_with(&service);

        let err = capture.process_answers().await.unwrap_err();

        assert!(matches!(err, CaptureError::InvalidStateTransition(_)));
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn failed_synthesis_keeps_previous_state() {
        let service = mock()
            .with_response(r#"["Q1?"]"#)
            .with_error(MockError::Unavailable {
                message: "overloaded".to_string(),
            });
        let mut capture = capture_with(&service);
        capture.generate_questions().await.unwrap();

        let err = capture.process_answers().await.unwrap_err();

        assert!(matches!(err, CaptureError::UpstreamService(_)));
        assert_eq!(capture.status(), CaptureStatus::QuestionsReady);
        assert!(capture.final_output().is_none());
    }

    // ----- state -----

    #[tokio::test]
    async fn state_round_trip_restores_every_field() {
        let service = mock().with_response(r#"["Q1?","Q2?"]"#).with_response("Final!");
        let mut capture = capture_with(&service);
        capture.generate_questions().await.unwrap();
        capture.submit_answer("Q1?", "Answer").unwrap();
        capture.process_answers().await.unwrap();

        let state = capture.get_state();
        let restored = GuidedCapture::load_state(state.clone(), Arc::new(mock())).unwrap();

        assert_eq!(restored.get_state(), state);
        assert_eq!(restored.topic(), capture.topic());
        assert_eq!(restored.questions(), capture.questions());
        assert_eq!(restored.answers(), capture.answers());
        assert_eq!(restored.status(), CaptureStatus::Synthesized);
        assert_eq!(restored.final_output(), Some("Final!"));
    }

    #[test]
    fn load_state_keeps_caller_model_but_snapshot_question_count() {
        let capture = GuidedCapture::with_options(
            "Topic",
            "Output",
            Arc::new(mock()),
            CaptureOptions::new().with_num_questions(7),
        )
        .unwrap();

        let restored = GuidedCapture::load_state_with_options(
            capture.get_state(),
            Arc::new(mock()),
            CaptureOptions::new().with_num_questions(2).with_model("gpt-4o"),
        )
        .unwrap();

        assert_eq!(restored.num_questions(), 7);
        assert_eq!(restored.model(), Some("gpt-4o"));
    }

    #[test]
    fn load_state_rejects_inconsistent_snapshot() {
        let mut state = capture_with(&mock()).get_state();
        state.final_output = Some("orphan".to_string());

        let err = GuidedCapture::load_state(state, Arc::new(mock())).unwrap_err();
        assert!(matches!(err, CaptureError::MalformedState(_)));
    }

    #[test]
    fn load_state_rejects_questions_without_generation() {
        let mut state = capture_with(&mock()).get_state();
        state.questions = vec!["Q1?".to_string()];
        state.answers = BTreeMap::from([("Q1?".to_string(), String::new())]);

        let err = GuidedCapture::load_state(state, Arc::new(mock())).unwrap_err();
        assert!(matches!(err, CaptureError::MalformedState(_)));
    }

    #[tokio::test]
    async fn load_state_rejects_generated_session_with_no_questions() {
        let service = mock().with_response(r#"["Q1?"]"#);
        let mut capture = capture_with(&service);
        capture.generate_questions().await.unwrap();
        let mut state = capture.get_state();
        state.questions.clear();
        state.answers.clear();

        let err = GuidedCapture::load_state(state, Arc::new(mock())).unwrap_err();
        assert!(matches!(err, CaptureError::MalformedState(_)));
    }

    #[test]
    fn debug_output_names_provider_instead_of_handle() {
        let capture = capture_with(&mock());
        let debug = format!("{:?}", capture);
        assert!(debug.contains("service: \"mock\""));
    }
}
