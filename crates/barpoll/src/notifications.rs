use status_render::NotificationStatus;

use crate::command::CommandRunner;

/// Ask swaync for its do-not-disturb state and the number of unread notifications.
pub fn query(runner: &impl CommandRunner) -> NotificationStatus {
    let dnd = runner.run_or_empty("swaync-client", &["--get-dnd"]);
    let count = runner.run_or_empty("swaync-client", &["-c"]);
    NotificationStatus::from_raw(&dnd, &count)
}
