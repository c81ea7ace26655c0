use ratatui::layout::Rect;

/// The Retry button shown on the game-over screen.
///
/// Visible exactly while the loop is stopped. Its screen area is whatever the
/// last frame drew, so clicks keep working across resizes.
#[derive(Debug, Clone, Default)]
pub struct RetryControl {
    visible: bool,
    area: Option<Rect>,
}

impl RetryControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Make the control visible; returns false if it already was
    pub fn show(&mut self) -> bool {
        if self.visible {
            return false;
        }
        self.visible = true;
        self.area = None;
        true
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.area = None;
    }

    /// Record where the last frame drew the button
    pub fn place(&mut self, area: Option<Rect>) {
        if self.visible {
            self.area = area;
        }
    }

    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    /// Whether a click at (column, row) lands on the button
    pub fn hit(&self, column: u16, row: u16) -> bool {
        self.visible
            && self.area.is_some_and(|area| {
                column >= area.x
                    && column < area.x.saturating_add(area.width)
                    && row >= area.y
                    && row < area.y.saturating_add(area.height)
            })
    }
}
