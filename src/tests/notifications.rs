use super::*;

#[test]
fn notification_lifecycle_runs_to_removal() -> Result<()> {
    let mut page = Page::from_html("<body><main></main></body>")?;

    show_notification(&mut page, "Feito!", NotificationKind::Success)?;
    assert_eq!(page.count(".notification")?, 1);
    page.assert_text(".notification", "Feito!")?;
    assert_eq!(
        page.style_property(".notification", "transform")?.as_deref(),
        Some("translateX(100%)")
    );
    assert_eq!(
        page.style_property(".notification", "background-color")?.as_deref(),
        Some("var(--success-color)")
    );

    page.advance_time(10)?;
    assert_eq!(
        page.style_property(".notification", "transform")?.as_deref(),
        Some("translateX(0)")
    );

    page.advance_time(4990)?;
    assert_eq!(
        page.style_property(".notification", "transform")?.as_deref(),
        Some("translateX(100%)")
    );

    page.advance_time(300)?;
    assert_eq!(page.count(".notification")?, 0);
    Ok(())
}

#[test]
fn error_kind_gets_error_styling() -> Result<()> {
    let mut page = Page::from_html("<body></body>")?;

    show_notification(&mut page, "Falhou", NotificationKind::Error)?;
    page.assert_has_class(".notification", "notification-error")?;
    assert_eq!(
        page.style_property(".notification", "background-color")?.as_deref(),
        Some("var(--error-color)")
    );
    Ok(())
}

#[test]
fn newer_notification_replaces_the_older_one() -> Result<()> {
    let mut page = Page::from_html("<body></body>")?;

    show_notification(&mut page, "primeira", NotificationKind::Success)?;
    show_notification(&mut page, "segunda", NotificationKind::Error)?;

    assert_eq!(page.count(".notification")?, 1);
    page.assert_text(".notification", "segunda")?;
    Ok(())
}

#[test]
fn stale_timers_of_a_replaced_notification_are_inert() -> Result<()> {
    let mut page = Page::from_html("<body></body>")?;

    show_notification(&mut page, "primeira", NotificationKind::Success)?;
    page.advance_time(2000)?;
    show_notification(&mut page, "segunda", NotificationKind::Success)?;

    // First notification's slide-out fires at 5000 against a detached node.
    page.advance_time(3000)?;
    assert_eq!(page.count(".notification")?, 1);
    page.assert_text(".notification", "segunda")?;

    // Second one still completes its own lifecycle.
    page.advance_time(2300)?;
    assert_eq!(page.count(".notification")?, 0);
    Ok(())
}

#[test]
fn notification_attaches_to_body_when_present() -> Result<()> {
    let mut page = Page::from_html("<html><body><div id='app'></div></body></html>")?;

    show_notification(&mut page, "Oi", NotificationKind::Success)?;
    page.assert_exists("body .notification")?;
    Ok(())
}
