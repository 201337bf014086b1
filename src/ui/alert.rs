use crate::maps::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Success,
    Warning,
    Danger,
}

impl AlertLevel {
    fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Info => "info",
            AlertLevel::Success => "success",
            AlertLevel::Warning => "warning",
            AlertLevel::Danger => "danger",
        }
    }
}

/// Dismissible banner inserted at the top of the page container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: u64,
    pub level: AlertLevel,
    pub message: String,
    /// Cleared when the fade-out starts
    pub shown: bool,
}

impl Alert {
    pub fn css_class(&self) -> String {
        let mut class = format!("alert alert-{} alert-dismissible fade", self.level.as_str());
        if self.shown {
            class.push_str(" show");
        }
        class
    }

    pub fn render_html(&self) -> String {
        format!(
            r#"<div class="{}" role="alert">{}<button type="button" class="btn-close" data-bs-dismiss="alert"></button></div>"#,
            self.css_class(),
            escape_html(&self.message)
        )
    }
}

/// Alerts currently on the page, newest first
#[derive(Debug, Default)]
pub struct AlertStack {
    next_id: u64,
    alerts: Vec<Alert>,
}

impl AlertStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: AlertLevel, message: impl Into<String>) -> Alert {
        self.next_id += 1;
        let alert = Alert {
            id: self.next_id,
            level,
            message: message.into(),
            shown: true,
        };
        self.alerts.insert(0, alert.clone());
        alert
    }

    /// Start the fade-out; false if the alert is gone or already fading
    pub fn fade(&mut self, id: u64) -> bool {
        match self.alerts.iter_mut().find(|a| a.id == id && a.shown) {
            Some(alert) => {
                alert.shown = false;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.id != id);
        self.alerts.len() != before
    }

    pub fn clear(&mut self) {
        self.alerts.clear();
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut stack = AlertStack::new();
        stack.push(AlertLevel::Info, "first");
        let second = stack.push(AlertLevel::Warning, "second");
        assert_eq!(stack.alerts()[0].id, second.id);
    }

    #[test]
    fn test_fade_then_remove() {
        let mut stack = AlertStack::new();
        let alert = stack.push(AlertLevel::Warning, "Please select an option before voting!");
        assert!(alert.css_class().ends_with("fade show"));

        assert!(stack.fade(alert.id));
        assert!(!stack.fade(alert.id));
        assert_eq!(stack.alerts()[0].css_class(), "alert alert-warning alert-dismissible fade");

        assert!(stack.remove(alert.id));
        assert!(!stack.remove(alert.id));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_message_is_escaped() {
        let mut stack = AlertStack::new();
        let alert = stack.push(AlertLevel::Danger, "<b>x</b>");
        assert!(alert.render_html().contains("&lt;b&gt;x&lt;/b&gt;"));
    }
}
