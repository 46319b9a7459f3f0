use super::*;

#[test]
fn install_marks_section_under_initial_scroll_active() -> Result<()> {
    let page = installed_template()?;
    page.assert_has_class("a[href='#home']", "active")?;
    assert!(!page.has_class("a[href='#services']", "active")?);
    Ok(())
}

#[test]
fn header_gains_scrolled_class_past_threshold() -> Result<()> {
    let mut page = installed_template()?;

    page.scroll_to(100)?;
    assert!(!page.has_class(".header", "scrolled")?);

    page.scroll_to(101)?;
    page.assert_has_class(".header", "scrolled")?;

    page.scroll_to(50)?;
    assert!(!page.has_class(".header", "scrolled")?);
    Ok(())
}

#[test]
fn active_nav_updates_only_after_debounce_window() -> Result<()> {
    let mut page = installed_template()?;

    page.scroll_to(700)?;
    page.assert_has_class("a[href='#home']", "active")?;

    page.advance_time(9)?;
    page.assert_has_class("a[href='#home']", "active")?;

    page.advance_time(1)?;
    page.assert_has_class("a[href='#services']", "active")?;
    assert!(!page.has_class("a[href='#home']", "active")?);
    Ok(())
}

#[test]
fn rapid_scrolls_coalesce_into_one_nav_update() -> Result<()> {
    let mut page = installed_template()?;

    page.scroll_to(300)?;
    let pending = page.pending_timer_count();
    page.scroll_to(700)?;
    page.scroll_to(1300)?;
    assert_eq!(page.pending_timer_count(), pending);

    // The trailing update reads the final scroll position.
    page.advance_time(10)?;
    page.assert_has_class("a[href='#gallery']", "active")?;
    Ok(())
}

#[test]
fn anchor_click_scrolls_below_header_with_margin() -> Result<()> {
    let mut page = installed_template()?;

    page.click("a[href='#services']")?;
    assert_eq!(page.scroll_y(), 500);

    page.advance_time(10)?;
    page.assert_has_class("a[href='#services']", "active")?;
    Ok(())
}

#[test]
fn anchor_click_near_top_clamps_to_zero() -> Result<()> {
    let mut page = installed_template()?;

    page.scroll_to(700)?;
    page.click("a[href='#home']")?;
    assert_eq!(page.scroll_y(), 0);
    Ok(())
}

#[test]
fn anchor_to_missing_target_does_nothing() -> Result<()> {
    let html = r#"
        <header class='header'></header>
        <a class='nav-link' href='#nowhere'>Dead</a>
    "#;
    let mut page = Page::from_html(html)?;
    InteractionController::install(&mut page)?;

    page.click("a[href='#nowhere']")?;
    assert_eq!(page.scroll_y(), 0);
    Ok(())
}

#[test]
fn probe_outside_every_section_clears_all_links() -> Result<()> {
    let mut page = installed_template()?;

    page.scroll_to(2500)?;
    page.advance_time(10)?;
    assert_eq!(page.count(".nav-link")?, 4);
    for href in ["#home", "#services", "#gallery", "#contact"] {
        assert!(!page.has_class(&format!("a[href='{href}']"), "active")?);
    }
    Ok(())
}

#[test]
fn overlapping_sections_resolve_to_the_later_one() -> Result<()> {
    let html = r#"
        <nav id='nav'>
          <a class='nav-link' href='#first'>First</a>
          <a class='nav-link' href='#second'>Second</a>
        </nav>
        <button id='mobile-menu-btn'></button>
        <section id='first'></section>
        <section id='second'></section>
    "#;
    let mut page = Page::from_html(html)?;
    page.set_layout("#first", section_rect(0, 600))?;
    page.set_layout("#second", section_rect(100, 600))?;
    InteractionController::install(&mut page)?;

    page.assert_has_class("a[href='#second']", "active")?;
    assert!(!page.has_class("a[href='#first']", "active")?);
    Ok(())
}

#[test]
fn install_twice_is_an_error() -> Result<()> {
    let mut page = installed_template()?;
    assert!(matches!(
        InteractionController::install(&mut page),
        Err(Error::Runtime(_))
    ));
    Ok(())
}

#[test]
fn trace_records_events_and_timers() -> Result<()> {
    let mut page = installed_template()?;
    page.set_trace_enabled(true);

    page.scroll_to(700)?;
    page.advance_time(10)?;

    let logs = page.take_trace_logs();
    assert!(logs.iter().any(|line| line.contains("event scroll")));
    assert!(logs.iter().any(|line| line.contains("timer")));
    assert!(page.take_trace_logs().is_empty());
    Ok(())
}
