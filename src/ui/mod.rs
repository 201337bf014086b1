// Interaction controller exports
pub mod alert;
pub mod controller;
pub mod keyboard;
pub mod progress;
pub mod refresh;
pub mod toggle;
pub mod validation;

pub use alert::{Alert, AlertLevel, AlertStack};
pub use controller::{Effect, Field, PageView, PollPage, SubmitButton, SubmitLabel, UiEvent, VoteController, VoteState};
pub use keyboard::{Key, KeyPress, Shortcut};
pub use progress::{progress_animations, ProgressAnimation, ProgressTiming};
pub use refresh::{extract_results_panel, AutoRefresher, HttpPageFetcher, PageFetcher, RefreshError, RefreshHandle, RefreshOutcome, RefreshSkip};
pub use toggle::{EditMode, EditToggles};
pub use validation::{validate_new_option, OptionRejection, MAX_OPTION_LEN};
