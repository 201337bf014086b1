use std::sync::LazyLock;
use std::time::Duration;

use scraper::{Html, Selector};

static PROGRESS_BAR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".progress-bar").expect("valid selector"));

/// How result bars grow from 0% to their width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTiming {
    pub duration: Duration,
    pub delay: Duration,
}

impl ProgressTiming {
    /// First paint of the page
    pub const INITIAL: ProgressTiming = ProgressTiming {
        duration: Duration::from_millis(1000),
        delay: Duration::from_millis(100),
    };

    /// After a refreshed results panel is spliced in
    pub const REFRESH: ProgressTiming = ProgressTiming {
        duration: Duration::from_millis(500),
        delay: Duration::from_millis(50),
    };

    pub fn transition(&self) -> String {
        format!("width {}s ease-in-out", self.duration.as_secs_f64())
    }
}

/// One bar to reset to 0% and animate back to `target_width`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressAnimation {
    /// Position among the `.progress-bar` elements of the fragment
    pub index: usize,
    pub target_width: String,
    pub transition: String,
    pub delay: Duration,
}

/// Animations for every progress bar found in a markup fragment
pub fn progress_animations(fragment: &str, timing: ProgressTiming) -> Vec<ProgressAnimation> {
    let html = Html::parse_fragment(fragment);

    html.select(&PROGRESS_BAR)
        .enumerate()
        .map(|(index, bar)| ProgressAnimation {
            index,
            target_width: bar
                .value()
                .attr("style")
                .and_then(style_width)
                .unwrap_or_default(),
            transition: timing.transition(),
            delay: timing.delay,
        })
        .collect()
}

/// `width` declaration of an inline style attribute
fn style_width(style: &str) -> Option<String> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .find(|(property, _)| property.trim().eq_ignore_ascii_case("width"))
        .map(|(_, value)| value.trim().to_string())
}
