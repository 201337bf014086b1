use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    View,
    Edit,
}

/// Per-option `view<N>` / `edit<N>` element pairs on the management view
#[derive(Debug, Default)]
pub struct EditToggles {
    modes: BTreeMap<usize, EditMode>,
}

impl EditToggles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs present on the page, all starting in view mode
    pub fn with_pairs(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            modes: indices.into_iter().map(|i| (i, EditMode::View)).collect(),
        }
    }

    pub fn mode(&self, index: usize) -> Option<EditMode> {
        self.modes.get(&index).copied()
    }

    /// Flip a pair; `None` when either element is missing
    pub fn toggle(&mut self, index: usize) -> Option<EditMode> {
        let mode = self.modes.get_mut(&index)?;
        *mode = match *mode {
            EditMode::View => EditMode::Edit,
            EditMode::Edit => EditMode::View,
        };
        Some(*mode)
    }

    pub fn reset(&mut self) {
        for mode in self.modes.values_mut() {
            *mode = EditMode::View;
        }
    }
}
