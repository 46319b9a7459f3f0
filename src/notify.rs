use crate::dom::NodeId;
use crate::page::Page;
use crate::scheduler::TimerAction;
use crate::Result;

const NOTIFICATION_CLASS: &str = "notification";
/// Entrance is deferred a tick so the transition can observe the off-screen
/// starting transform.
const ENTRANCE_DELAY_MS: i64 = 10;
const DISPLAY_MS: i64 = 5000;
const EXIT_MS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    fn class_name(self) -> &'static str {
        match self {
            Self::Success => "notification-success",
            Self::Error => "notification-error",
        }
    }

    fn background(self) -> &'static str {
        match self {
            Self::Success => "var(--success-color)",
            Self::Error => "var(--error-color)",
        }
    }
}

/// Show a toast notification. At most one exists at a time: any notification
/// still on the page is removed first, then the new one is appended to the
/// body and its slide-in/slide-out/removal timers are scheduled.
pub fn show_notification(page: &mut Page, message: &str, kind: NotificationKind) -> Result<()> {
    let existing = page.find_all(&format!(".{NOTIFICATION_CLASS}"))?;
    for node in existing {
        page.dom.detach(node);
    }

    let body = page.dom.body_or_root();
    let node = page
        .dom
        .create_element(body, "div".to_string(), Default::default());
    page.dom.add_class(node, NOTIFICATION_CLASS);
    page.dom.add_class(node, kind.class_name());
    page.dom.set_text_content(node, message);

    page.dom.set_style_property(node, "position", "fixed");
    page.dom.set_style_property(node, "top", "20px");
    page.dom.set_style_property(node, "right", "20px");
    page.dom.set_style_property(node, "background-color", kind.background());
    page.dom.set_style_property(node, "color", "var(--white)");
    page.dom.set_style_property(node, "padding", "var(--spacing-lg)");
    page.dom.set_style_property(node, "border-radius", "var(--radius-lg)");
    page.dom.set_style_property(node, "box-shadow", "var(--shadow-lg)");
    page.dom.set_style_property(node, "z-index", "3000");
    page.dom.set_style_property(node, "max-width", "400px");
    page.dom.set_style_property(node, "font-weight", "600");
    page.dom.set_style_property(node, "transform", "translateX(100%)");
    page.dom.set_style_property(
        node,
        "transition",
        "transform var(--transition-base)",
    );

    page.scheduler
        .schedule(ENTRANCE_DELAY_MS, TimerAction::NotificationSlideIn(node));
    page.scheduler
        .schedule(DISPLAY_MS, TimerAction::NotificationSlideOut(node));

    if page.trace.enabled {
        page.trace
            .log(format!("notification shown: {message}"));
    }
    Ok(())
}

/// Timer actions guard on attachment: a notification replaced before its
/// timers fire was detached, and its stale timers must not touch it.
pub(crate) fn slide_in(page: &mut Page, node: NodeId) {
    if !page.dom.is_attached(node) {
        return;
    }
    page.dom.set_style_property(node, "transform", "translateX(0)");
}

pub(crate) fn slide_out(page: &mut Page, node: NodeId) {
    if !page.dom.is_attached(node) {
        return;
    }
    page.dom.set_style_property(node, "transform", "translateX(100%)");
    page.scheduler
        .schedule(EXIT_MS, TimerAction::NotificationRemove(node));
}

pub(crate) fn remove(page: &mut Page, node: NodeId) {
    if !page.dom.is_attached(node) {
        return;
    }
    page.dom.detach(node);
}
