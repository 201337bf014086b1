//! Vote interaction state machine
//!
//! The controller never touches a DOM. Hosts feed it [`UiEvent`]s and apply the
//! [`Effect`]s it returns; delayed work comes back as `Effect::Schedule`, which
//! the host turns into a timer that re-enters [`VoteController::handle`].

use std::time::Duration;

use crate::config::UiSettings;
use crate::maps::escape_html;
use crate::models::{VoteSelection, VotingOption};
use crate::ui::alert::{Alert, AlertLevel, AlertStack};
use crate::ui::keyboard::{activates_option, shortcut_for, Key, KeyPress, Shortcut, MANAGE_PATH, VOTING_PATH};
use crate::ui::progress::{progress_animations, ProgressAnimation, ProgressTiming};
use crate::ui::refresh::RefreshSkip;
use crate::ui::toggle::{EditMode, EditToggles};
use crate::ui::validation::validate_new_option;

pub const NO_SELECTION_MESSAGE: &str = "Please select an option before voting!";

/// Which page the controller is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageView {
    Voting,
    Manage,
    Other,
}

impl PageView {
    pub fn from_path(path: &str) -> Self {
        match path {
            VOTING_PATH => PageView::Voting,
            MANAGE_PATH => PageView::Manage,
            _ => PageView::Other,
        }
    }
}

/// Structural snapshot of the page the controller binds to
#[derive(Debug, Clone, Default)]
pub struct PollPage {
    pub path: String,
    /// Option cards in document order (`data-value`, `.option-text`)
    pub options: Vec<VotingOption>,
    pub has_vote_form: bool,
    /// Inner markup of the results panel
    pub results_html: String,
    /// Indices with both `view<N>` and `edit<N>` present
    pub edit_pairs: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteState {
    NoneSelected,
    OptionSelected,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitLabel {
    /// Initial disabled state
    Prompt,
    CastVote,
    VoteFor(String),
    Casting,
}

impl SubmitLabel {
    pub fn render_html(&self) -> String {
        match self {
            SubmitLabel::Prompt => r#"<i class="fas fa-hand-pointer me-2"></i>Select an option"#.to_string(),
            SubmitLabel::CastVote => r#"<i class="fas fa-vote-yea me-2"></i>Cast Vote"#.to_string(),
            SubmitLabel::VoteFor(text) => format!(
                r#"<i class="fas fa-vote-yea me-2"></i>Vote for "{}""#,
                escape_html(text)
            ),
            SubmitLabel::Casting => {
                r#"<span class="spinner-border spinner-border-sm me-2"></span>Casting Vote..."#.to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub enabled: bool,
    pub label: SubmitLabel,
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self {
            enabled: false,
            label: SubmitLabel::Prompt,
        }
    }
}

/// Input that can receive focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `input[name="new_option"]`
    NewOption,
    /// `input[name="option_name"]` inside `edit<N>`
    OptionName(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    OptionClicked(String),
    OptionKey { value: String, key: Key },
    VoteSubmitted,
    AddOptionSubmitted { text: String },
    KeyPressed(KeyPress),
    AlertDismissed(u64),
    AlertExpired(u64),
    AlertFaded(u64),
    LabelTimerElapsed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Toggle `.selected` on the card and the indicator icon
    Highlight { value: String, selected: bool },
    UpdateSubmitButton(SubmitButton),
    PlaySuccessAnimation(String),
    /// Let the vote form post
    SubmitVote { value: String },
    /// Add-option button shows "Adding..." and is disabled
    AddOptionBusy,
    SubmitAddOption { text: String },
    ShowAlert(Alert),
    FadeAlert(u64),
    RemoveAlert(u64),
    Focus { field: Field, select_all: bool },
    Navigate(String),
    SetEditMode { index: usize, mode: EditMode },
    AnimateProgress(Vec<ProgressAnimation>),
    ReplaceResults(String),
    Schedule { after: Duration, event: UiEvent },
}

/// Owns the single-vote state machine of one page view
#[derive(Debug)]
pub struct VoteController {
    page: PollPage,
    view: PageView,
    settings: UiSettings,
    state: VoteState,
    selection: VoteSelection,
    submit: SubmitButton,
    add_option_busy: bool,
    alerts: AlertStack,
    toggles: EditToggles,
    attached: bool,
}

impl VoteController {
    pub fn new(page: PollPage, settings: UiSettings) -> Self {
        let view = PageView::from_path(&page.path);
        let toggles = EditToggles::with_pairs(page.edit_pairs.iter().copied());
        Self {
            page,
            view,
            settings,
            state: VoteState::NoneSelected,
            selection: VoteSelection::default(),
            submit: SubmitButton::default(),
            add_option_busy: false,
            alerts: AlertStack::new(),
            toggles,
            attached: false,
        }
    }

    /// Start handling events; returns the first-paint effects
    pub fn attach(&mut self) -> Vec<Effect> {
        self.attached = true;
        tracing::debug!("Controller attached to {:?} view", self.view);

        let animations = progress_animations(&self.page.results_html, ProgressTiming::INITIAL);
        if animations.is_empty() {
            Vec::new()
        } else {
            vec![Effect::AnimateProgress(animations)]
        }
    }

    /// Stop handling events and drop page-view state
    pub fn detach(&mut self) {
        self.attached = false;
        self.state = VoteState::NoneSelected;
        self.selection.clear();
        self.submit = SubmitButton::default();
        self.add_option_busy = false;
        self.alerts.clear();
        self.toggles.reset();
        tracing::debug!("Controller detached");
    }

    pub fn handle(&mut self, event: UiEvent) -> Vec<Effect> {
        if !self.attached {
            return Vec::new();
        }

        match event {
            UiEvent::OptionClicked(value) => self.select_option(value),
            UiEvent::OptionKey { value, key } if activates_option(key) => self.select_option(value),
            UiEvent::OptionKey { .. } => Vec::new(),
            UiEvent::VoteSubmitted => self.submit_vote(),
            UiEvent::AddOptionSubmitted { text } => self.submit_add_option(&text),
            UiEvent::KeyPressed(press) => self.key_pressed(&press),
            UiEvent::AlertDismissed(id) => self.remove_alert(id),
            UiEvent::AlertExpired(id) => self.expire_alert(id),
            UiEvent::AlertFaded(id) => self.remove_alert(id),
            UiEvent::LabelTimerElapsed(value) => self.show_vote_label(&value),
        }
    }

    /// View/edit toggle invoked from inline markup
    pub fn toggle_edit_mode(&mut self, index: usize) -> Vec<Effect> {
        if !self.attached {
            return Vec::new();
        }

        match self.toggles.toggle(index) {
            Some(EditMode::Edit) => vec![
                Effect::SetEditMode {
                    index,
                    mode: EditMode::Edit,
                },
                Effect::Focus {
                    field: Field::OptionName(index),
                    select_all: true,
                },
            ],
            Some(EditMode::View) => vec![Effect::SetEditMode {
                index,
                mode: EditMode::View,
            }],
            None => Vec::new(),
        }
    }

    /// Whether a refresh tick may fetch new results right now
    pub fn refresh_gate(&self, visible: bool) -> Result<(), RefreshSkip> {
        if !self.attached {
            return Err(RefreshSkip::Detached);
        }
        if !self.on_voting_view() {
            return Err(RefreshSkip::NotVotingView);
        }
        if !visible {
            return Err(RefreshSkip::Hidden);
        }
        if !self.selection.is_empty() || self.state != VoteState::NoneSelected {
            return Err(RefreshSkip::SelectionInProgress);
        }
        Ok(())
    }

    /// Swap in a freshly fetched results panel
    ///
    /// The gate is checked again here: a selection made while the fetch was
    /// in flight suppresses the splice entirely.
    pub fn splice_results(&mut self, fragment: String) -> Result<Vec<Effect>, RefreshSkip> {
        self.refresh_gate(true)?;

        let animations = progress_animations(&fragment, ProgressTiming::REFRESH);
        self.page.results_html = fragment.clone();

        let mut effects = vec![Effect::ReplaceResults(fragment)];
        if !animations.is_empty() {
            effects.push(Effect::AnimateProgress(animations));
        }
        Ok(effects)
    }

    pub fn view(&self) -> PageView {
        self.view
    }

    pub fn state(&self) -> VoteState {
        self.state
    }

    pub fn selection(&self) -> &VoteSelection {
        &self.selection
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selection.value() == Some(value)
    }

    /// Values of highlighted option cards, in document order
    pub fn highlighted(&self) -> Vec<&str> {
        self.page
            .options
            .iter()
            .filter(|option| self.is_selected(&option.value))
            .map(|option| option.value.as_str())
            .collect()
    }

    pub fn submit_button(&self) -> &SubmitButton {
        &self.submit
    }

    pub fn alerts(&self) -> &[Alert] {
        self.alerts.alerts()
    }

    pub fn results_html(&self) -> &str {
        &self.page.results_html
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn settings(&self) -> &UiSettings {
        &self.settings
    }

    fn on_voting_view(&self) -> bool {
        self.view == PageView::Voting && self.page.has_vote_form
    }

    fn option(&self, value: &str) -> Option<&VotingOption> {
        self.page.options.iter().find(|option| option.value == value)
    }

    fn select_option(&mut self, value: String) -> Vec<Effect> {
        if self.state == VoteState::Submitting {
            return Vec::new();
        }
        if self.option(&value).is_none() {
            tracing::trace!("No option with value {}", value);
            return Vec::new();
        }

        let mut effects = Vec::new();
        match self.selection.replace(value.clone()) {
            Some(previous) if previous == value => {}
            Some(previous) => {
                effects.push(Effect::Highlight {
                    value: previous,
                    selected: false,
                });
                effects.push(Effect::Highlight {
                    value: value.clone(),
                    selected: true,
                });
            }
            None => effects.push(Effect::Highlight {
                value: value.clone(),
                selected: true,
            }),
        }

        self.state = VoteState::OptionSelected;
        self.submit = SubmitButton {
            enabled: true,
            label: SubmitLabel::CastVote,
        };
        effects.push(Effect::UpdateSubmitButton(self.submit.clone()));
        effects.push(Effect::Schedule {
            after: self.settings.label_delay(),
            event: UiEvent::LabelTimerElapsed(value),
        });
        effects
    }

    fn show_vote_label(&mut self, value: &str) -> Vec<Effect> {
        if self.state != VoteState::OptionSelected || !self.is_selected(value) {
            return Vec::new();
        }
        let Some(text) = self.option(value).map(|option| option.text.clone()) else {
            return Vec::new();
        };

        self.submit.label = SubmitLabel::VoteFor(text);
        vec![Effect::UpdateSubmitButton(self.submit.clone())]
    }

    fn submit_vote(&mut self) -> Vec<Effect> {
        match self.state {
            VoteState::Submitting => Vec::new(),
            VoteState::NoneSelected => self.show_alert(AlertLevel::Warning, NO_SELECTION_MESSAGE),
            VoteState::OptionSelected => {
                let Some(value) = self.selection.value().map(str::to_string) else {
                    return self.show_alert(AlertLevel::Warning, NO_SELECTION_MESSAGE);
                };

                self.state = VoteState::Submitting;
                self.submit = SubmitButton {
                    enabled: false,
                    label: SubmitLabel::Casting,
                };
                tracing::info!("Casting vote for option {}", value);

                vec![
                    Effect::UpdateSubmitButton(self.submit.clone()),
                    Effect::PlaySuccessAnimation(value.clone()),
                    Effect::SubmitVote { value },
                ]
            }
        }
    }

    fn submit_add_option(&mut self, text: &str) -> Vec<Effect> {
        if self.add_option_busy {
            return Vec::new();
        }

        match validate_new_option(text) {
            Ok(text) => {
                self.add_option_busy = true;
                vec![Effect::AddOptionBusy, Effect::SubmitAddOption { text }]
            }
            Err(rejection) => {
                let mut effects = self.show_alert(AlertLevel::Warning, rejection.to_string());
                effects.push(Effect::Focus {
                    field: Field::NewOption,
                    select_all: false,
                });
                effects
            }
        }
    }

    fn key_pressed(&mut self, press: &KeyPress) -> Vec<Effect> {
        match shortcut_for(press, self.on_voting_view()) {
            Some(Shortcut::Navigate(path)) => vec![Effect::Navigate(path.to_string())],
            Some(Shortcut::SelectOption(value)) => self.select_option(value),
            Some(Shortcut::SubmitVote) if self.state == VoteState::OptionSelected && self.submit.enabled => {
                self.submit_vote()
            }
            Some(Shortcut::SubmitVote) | None => Vec::new(),
        }
    }

    fn show_alert(&mut self, level: AlertLevel, message: impl Into<String>) -> Vec<Effect> {
        let alert = self.alerts.push(level, message);
        let id = alert.id;
        vec![
            Effect::ShowAlert(alert),
            Effect::Schedule {
                after: self.settings.alert_dismiss(),
                event: UiEvent::AlertExpired(id),
            },
        ]
    }

    fn expire_alert(&mut self, id: u64) -> Vec<Effect> {
        if !self.alerts.fade(id) {
            return Vec::new();
        }
        vec![
            Effect::FadeAlert(id),
            Effect::Schedule {
                after: self.settings.alert_fade(),
                event: UiEvent::AlertFaded(id),
            },
        ]
    }

    fn remove_alert(&mut self, id: u64) -> Vec<Effect> {
        if self.alerts.remove(id) {
            vec![Effect::RemoveAlert(id)]
        } else {
            Vec::new()
        }
    }
}
