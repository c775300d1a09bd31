use crate::output::{CssClass, RenderedStatus};

pub const ICON_DND_EMPTY: &str = "\u{ec08}";
pub const ICON_DND_NEW: &str = "\u{ec09}";
pub const ICON_EMPTY: &str = "\u{eaa2}";
pub const ICON_NEW: &str = "\u{eb9a}";

/// State of the notification daemon: do-not-disturb flag and number of unread notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationStatus {
    pub dnd: bool,
    pub count: i64,
}

impl NotificationStatus {
    /// Build the status from the raw answers of the daemon. Anything but `true` means DND is off,
    /// and an unreadable count is 0.
    pub fn from_raw(dnd: &str, count: &str) -> Self {
        NotificationStatus { dnd: dnd.trim().eq_ignore_ascii_case("true"), count: count.trim().parse().unwrap_or(0) }
    }

    pub fn icon(&self) -> &'static str {
        match (self.dnd, self.count > 0) {
            (true, true) => ICON_DND_NEW,
            (true, false) => ICON_DND_EMPTY,
            (false, true) => ICON_NEW,
            (false, false) => ICON_EMPTY,
        }
    }

    pub fn render(&self) -> RenderedStatus {
        let class = if self.dnd { "dnd" } else { "normal" };
        RenderedStatus::new(
            format!("{} {} ", self.count, self.icon()),
            format!("{} unread notifications", self.count),
            CssClass::Many(vec![class.to_string()]),
        )
    }
}
