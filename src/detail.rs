/*
 * Detail Level Module
 *
 * Rendering quality flag flipped by the 'D' key. It has no effect on the
 * simulation; the renderer reads it to decide whether to draw halos on
 * bright stars and streaks on near ones.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailLevel {
    #[default]
    Full,
    Basic,
}

impl DetailLevel {
    pub fn toggled(self) -> Self {
        match self {
            DetailLevel::Full => DetailLevel::Basic,
            DetailLevel::Basic => DetailLevel::Full,
        }
    }

    pub fn is_full(self) -> bool {
        self == DetailLevel::Full
    }

    pub fn label(self) -> &'static str {
        match self {
            DetailLevel::Full => "FULL",
            DetailLevel::Basic => "BASIC",
        }
    }

    // Text shown by the status indicator
    pub fn status_text(self) -> String {
        format!("Details: {} (Press 'D' to toggle)", self.label())
    }
}
