//! Application state (Model in TEA pattern)

use std::path::PathBuf;
use std::time::{Duration, Instant};

use teachdesk_core::{ImageResolution, LessonResult, SavedLesson, DEFAULT_GRADE, GRADE_LEVELS};

use crate::config::Settings;
use crate::credentials::CredentialStatus;
use crate::text_buffer::{TextBuffer, TextEdit};

/// How long transient notices such as "Copied!" stay visible
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Welcome page shown until an API key is available
    #[default]
    Landing,
    Home,
    CreateNew,
    MatchStyle,
    /// The active plan; only shown while `AppState::result` is set
    Result,
    MyLessons,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

// ─────────────────────────────────────────────────────────────────────────────
// Forms
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateField {
    #[default]
    Grade,
    Subject,
    Topic,
}

/// Create New form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateForm {
    pub grade_index: usize,
    pub subject: TextBuffer,
    pub topic: TextBuffer,
    pub focus: CreateField,
    default_grade_index: usize,
}

impl CreateForm {
    pub fn new(default_grade: &str) -> Self {
        let default_grade_index = GRADE_LEVELS
            .iter()
            .position(|g| *g == default_grade)
            .or_else(|| GRADE_LEVELS.iter().position(|g| *g == DEFAULT_GRADE))
            .unwrap_or(0);

        Self {
            grade_index: default_grade_index,
            subject: TextBuffer::new(),
            topic: TextBuffer::new(),
            focus: CreateField::default(),
            default_grade_index,
        }
    }

    pub fn grade(&self) -> &'static str {
        GRADE_LEVELS[self.grade_index % GRADE_LEVELS.len()]
    }

    pub fn cycle_grade(&mut self, forward: bool) {
        let len = GRADE_LEVELS.len();
        self.grade_index = if forward {
            (self.grade_index + 1) % len
        } else {
            (self.grade_index + len - 1) % len
        };
    }

    pub fn can_submit(&self) -> bool {
        !self.subject.is_blank() && !self.topic.is_blank()
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            CreateField::Grade => CreateField::Subject,
            CreateField::Subject => CreateField::Topic,
            CreateField::Topic => CreateField::Grade,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            CreateField::Grade => CreateField::Topic,
            CreateField::Subject => CreateField::Grade,
            CreateField::Topic => CreateField::Subject,
        };
    }

    /// Route an edit to the focused text field; Left/Right cycle the grade
    pub fn apply_edit(&mut self, edit: TextEdit) {
        match self.focus {
            CreateField::Grade => match edit {
                TextEdit::Left => self.cycle_grade(false),
                TextEdit::Right => self.cycle_grade(true),
                _ => {}
            },
            CreateField::Subject => self.subject.apply(edit, false),
            CreateField::Topic => self.topic.apply(edit, false),
        }
    }

    pub fn reset(&mut self) {
        self.grade_index = self.default_grade_index;
        self.subject.clear();
        self.topic.clear();
        self.focus = CreateField::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchField {
    #[default]
    File,
    Topic,
}

/// Match Style form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchForm {
    pub file_path: TextBuffer,
    pub topic: TextBuffer,
    pub focus: MatchField,
}

impl MatchForm {
    pub fn source_file(&self) -> Option<PathBuf> {
        (!self.file_path.is_blank()).then(|| PathBuf::from(self.file_path.value()))
    }

    pub fn can_submit(&self) -> bool {
        self.source_file().is_some() && !self.topic.is_blank()
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            MatchField::File => MatchField::Topic,
            MatchField::Topic => MatchField::File,
        };
    }

    pub fn apply_edit(&mut self, edit: TextEdit) {
        match self.focus {
            MatchField::File => self.file_path.apply(edit, false),
            MatchField::Topic => self.topic.apply(edit, false),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Result
// ─────────────────────────────────────────────────────────────────────────────

/// The plan shown on the Result screen plus its view flags
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveResult {
    pub lesson: LessonResult,
    /// Identifies this result for visual-aid completions
    pub token: u64,
    pub is_saved: bool,
    /// Present while the plan text is being edited
    pub editor: Option<TextBuffer>,
    pub resolution: ImageResolution,
    pub show_share_options: bool,
    pub scroll: u16,
}

impl ActiveResult {
    pub fn new(
        lesson: LessonResult,
        token: u64,
        is_saved: bool,
        resolution: ImageResolution,
    ) -> Self {
        Self {
            lesson,
            token,
            is_saved,
            editor: None,
            resolution,
            show_share_options: false,
            scroll: 0,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    /// Label of the back action on the Result screen
    pub fn back_label(&self) -> &'static str {
        if self.is_saved {
            "Back to Home"
        } else {
            "Start Over"
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Requests, dialogs and notices
// ─────────────────────────────────────────────────────────────────────────────

/// An outstanding plan request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub token: u64,
    /// Screen the request was submitted from
    pub origin: Screen,
}

/// Privileged request parked until an API key is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRequest {
    EnterHome,
    NewPlan,
    StyleMatch,
    VisualAid,
}

/// API key entry modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPromptState {
    pub input: TextBuffer,
    pub pending: Option<PendingRequest>,
    pub error: Option<String>,
    pub submitting: bool,
}

impl KeyPromptState {
    pub fn new(pending: Option<PendingRequest>) -> Self {
        Self {
            input: TextBuffer::new(),
            pending,
            error: None,
            submitting: false,
        }
    }
}

/// Pending delete awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDeleteState {
    pub id: String,
    pub topic: String,
}

/// Transient message with an expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub expires_at: Instant,
}

impl Notice {
    pub fn new(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AppState
// ─────────────────────────────────────────────────────────────────────────────

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,
    pub screen: Screen,
    pub credential_status: CredentialStatus,

    pub create_form: CreateForm,
    pub match_form: MatchForm,

    /// Active plan, present only while `screen == Screen::Result`
    pub result: Option<ActiveResult>,

    pub saved_lessons: Vec<SavedLesson>,
    pub selected_lesson: usize,

    /// Outstanding plan request, at most one
    pub in_flight: Option<RequestTicket>,

    /// Token of the result an outstanding visual-aid request belongs to.
    /// At most one, and it outlives the Result screen.
    pub image_in_flight: Option<u64>,

    /// User-facing error for the current screen
    pub error: Option<String>,
    pub notice: Option<Notice>,

    pub key_prompt: Option<KeyPromptState>,
    pub confirm_delete: Option<ConfirmDeleteState>,

    /// Resolution preselected for new results
    pub default_resolution: ImageResolution,

    next_token: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            phase: AppPhase::Running,
            screen: Screen::Landing,
            credential_status: CredentialStatus::NeedsCredential,
            create_form: CreateForm::new(DEFAULT_GRADE),
            match_form: MatchForm::default(),
            result: None,
            saved_lessons: Vec::new(),
            selected_lesson: 0,
            in_flight: None,
            image_in_flight: None,
            error: None,
            notice: None,
            key_prompt: None,
            confirm_delete: None,
            default_resolution: ImageResolution::default(),
            next_token: 1,
        }
    }

    /// Initial state for a run.
    ///
    /// Starts on Home when a key is already available, Landing otherwise.
    pub fn with_settings(
        settings: &Settings,
        credential_status: CredentialStatus,
        saved_lessons: Vec<SavedLesson>,
    ) -> Self {
        let mut state = Self::new();
        state.create_form = CreateForm::new(&settings.defaults.grade);
        state.default_resolution = settings.defaults.resolution;
        state.credential_status = credential_status;
        state.saved_lessons = saved_lessons;
        if credential_status == CredentialStatus::Ready {
            state.screen = Screen::Home;
        }
        state
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// Fresh token for a request or result
    pub fn next_token(&mut self) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        token
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether a plan request submitted from `screen` is outstanding
    pub fn is_loading_on(&self, screen: Screen) -> bool {
        self.in_flight.is_some_and(|t| t.origin == screen)
    }

    pub fn is_generating_image(&self) -> bool {
        self.image_in_flight.is_some()
    }

    pub fn has_api_key(&self) -> bool {
        self.credential_status == CredentialStatus::Ready
    }

    pub fn selected_saved_lesson(&self) -> Option<&SavedLesson> {
        self.saved_lessons.get(self.selected_lesson)
    }

    pub fn show_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice::new(text, NOTICE_DURATION));
    }

    /// Replace the saved-lesson list, keeping the selection in range
    pub fn set_saved_lessons(&mut self, lessons: Vec<SavedLesson>) {
        self.saved_lessons = lessons;
        if self.selected_lesson >= self.saved_lessons.len() {
            self.selected_lesson = self.saved_lessons.len().saturating_sub(1);
        }
    }

    /// Show `lesson` on the Result screen as the single active result
    pub fn open_result(&mut self, lesson: LessonResult, is_saved: bool) {
        let token = self.next_token();
        self.result = Some(ActiveResult::new(
            lesson,
            token,
            is_saved,
            self.default_resolution,
        ));
        self.error = None;
        self.screen = Screen::Result;
    }

    /// Leave the current screen; the active result never outlives the Result screen
    pub fn navigate(&mut self, screen: Screen) {
        if screen != Screen::Result {
            self.result = None;
        }
        self.error = None;
        self.screen = screen;
    }

    /// Return Home with cleared forms and no active result
    pub fn reset_to_home(&mut self) {
        self.create_form.reset();
        self.match_form.reset();
        self.navigate(Screen::Home);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_on_landing() {
        let state = AppState::new();
        assert_eq!(state.screen, Screen::Landing);
        assert!(!state.should_quit());
        assert_eq!(state.create_form.grade(), "7th Grade");
    }

    #[test]
    fn test_with_settings_skips_landing_when_ready() {
        let mut settings = Settings::default();
        settings.defaults.grade = "High School".into();
        settings.defaults.resolution = ImageResolution::High;

        let state = AppState::with_settings(&settings, CredentialStatus::Ready, vec![]);

        assert_eq!(state.screen, Screen::Home);
        assert_eq!(state.create_form.grade(), "High School");
        assert_eq!(state.default_resolution, ImageResolution::High);
    }

    #[test]
    fn test_unknown_default_grade_falls_back() {
        let form = CreateForm::new("Graduate School");
        assert_eq!(form.grade(), "7th Grade");
    }

    #[test]
    fn test_cycle_grade_wraps() {
        let mut form = CreateForm::new("Kindergarten");
        form.cycle_grade(false);
        assert_eq!(form.grade(), "High School");
        form.cycle_grade(true);
        assert_eq!(form.grade(), "Kindergarten");
    }

    #[test]
    fn test_create_form_reset_restores_default_grade() {
        let mut form = CreateForm::new("5th Grade");
        form.cycle_grade(true);
        form.subject = TextBuffer::with_text("Math");
        form.focus = CreateField::Topic;

        form.reset();

        assert_eq!(form.grade(), "5th Grade");
        assert!(form.subject.is_blank());
        assert_eq!(form.focus, CreateField::Grade);
    }

    #[test]
    fn test_match_form_requires_file_and_topic() {
        let mut form = MatchForm::default();
        form.topic = TextBuffer::with_text("Volcanoes");
        assert!(!form.can_submit());
        form.file_path = TextBuffer::with_text(" ./example.pdf ");
        assert!(form.can_submit());
        assert_eq!(form.source_file(), Some(PathBuf::from("./example.pdf")));
    }

    #[test]
    fn test_navigate_away_drops_result() {
        let mut state = AppState::new();
        state.open_result(
            LessonResult::new_plan("7th Grade", "Math", "Angles", "c", vec![]),
            false,
        );
        assert_eq!(state.screen, Screen::Result);

        state.navigate(Screen::MyLessons);
        assert!(state.result.is_none());
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut state = AppState::new();
        let a = state.next_token();
        let b = state.next_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_back_label_depends_on_saved() {
        let lesson = LessonResult::new_plan("7th Grade", "Math", "Angles", "c", vec![]);
        let mut result = ActiveResult::new(lesson, 1, false, ImageResolution::Low);
        assert_eq!(result.back_label(), "Start Over");
        result.is_saved = true;
        assert_eq!(result.back_label(), "Back to Home");
    }

    #[test]
    fn test_notice_expiry() {
        let notice = Notice::new("Copied!", Duration::from_secs(2));
        assert!(!notice.is_expired(Instant::now()));
        assert!(notice.is_expired(Instant::now() + Duration::from_secs(3)));
    }
}
