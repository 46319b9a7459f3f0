use super::*;

#[test]
fn menu_button_toggles_button_and_nav() -> Result<()> {
    let mut page = installed_template()?;

    page.click("#mobile-menu-btn")?;
    page.assert_has_class("#mobile-menu-btn", "active")?;
    page.assert_has_class("#nav", "active")?;

    page.click("#mobile-menu-btn")?;
    assert!(!page.has_class("#mobile-menu-btn", "active")?);
    assert!(!page.has_class("#nav", "active")?);
    Ok(())
}

#[test]
fn nav_link_click_closes_open_menu() -> Result<()> {
    let mut page = installed_template()?;

    page.click("#mobile-menu-btn")?;
    page.click("a[href='#services']")?;
    assert!(!page.has_class("#nav", "active")?);
    assert!(!page.has_class("#mobile-menu-btn", "active")?);
    Ok(())
}

#[test]
fn outside_click_closes_menu_but_inside_click_does_not() -> Result<()> {
    let mut page = installed_template()?;

    page.click("#mobile-menu-btn")?;
    page.click("#nav")?;
    page.assert_has_class("#nav", "active")?;

    page.click(".hero-title")?;
    assert!(!page.has_class("#nav", "active")?);
    Ok(())
}

#[test]
fn resize_to_desktop_closes_menu_after_debounce() -> Result<()> {
    let mut page = installed_template()?;

    page.click("#mobile-menu-btn")?;
    page.resize_to(1024, 768)?;
    page.assert_has_class("#nav", "active")?;

    page.advance_time(99)?;
    page.assert_has_class("#nav", "active")?;
    page.advance_time(1)?;
    assert!(!page.has_class("#nav", "active")?);
    Ok(())
}

#[test]
fn resize_to_mobile_width_leaves_menu_alone() -> Result<()> {
    let mut page = installed_template()?;

    page.click("#mobile-menu-btn")?;
    page.resize_to(500, 800)?;
    page.advance_time(100)?;
    page.assert_has_class("#nav", "active")?;
    Ok(())
}

#[test]
fn rapid_resizes_coalesce_into_one_timer() -> Result<()> {
    let mut page = installed_template()?;

    page.resize_to(900, 700)?;
    let pending = page.pending_timer_count();
    page.resize_to(1000, 700)?;
    page.resize_to(1100, 700)?;
    assert_eq!(page.pending_timer_count(), pending);

    page.advance_time(100)?;
    Ok(())
}

#[test]
fn gallery_item_click_opens_modal_with_image() -> Result<()> {
    let mut page = installed_template()?;

    page.click(".gallery-item")?;
    assert_eq!(
        page.style_property("#gallery-modal", "display")?.as_deref(),
        Some("block")
    );
    assert_eq!(page.attr("#modal-image", "src")?.as_deref(), Some("a.jpg"));
    assert_eq!(page.attr("#modal-image", "alt")?.as_deref(), Some("Foto A"));
    assert_eq!(
        page.style_property("body", "overflow")?.as_deref(),
        Some("hidden")
    );
    Ok(())
}

#[test]
fn click_on_image_inside_item_still_opens_modal() -> Result<()> {
    let mut page = installed_template()?;

    page.click("img[src='b.jpg']")?;
    assert_eq!(page.attr("#modal-image", "src")?.as_deref(), Some("b.jpg"));
    Ok(())
}

#[test]
fn close_button_hides_modal_and_restores_scrolling() -> Result<()> {
    let mut page = installed_template()?;

    page.click(".gallery-item")?;
    page.click("#close-modal")?;
    assert_eq!(
        page.style_property("#gallery-modal", "display")?.as_deref(),
        Some("none")
    );
    assert_eq!(
        page.style_property("body", "overflow")?.as_deref(),
        Some("auto")
    );
    Ok(())
}

#[test]
fn backdrop_click_closes_but_inner_click_does_not() -> Result<()> {
    let mut page = installed_template()?;

    page.click(".gallery-item")?;
    page.click("#modal-image")?;
    assert_eq!(
        page.style_property("#gallery-modal", "display")?.as_deref(),
        Some("block")
    );

    page.click("#gallery-modal")?;
    assert_eq!(
        page.style_property("#gallery-modal", "display")?.as_deref(),
        Some("none")
    );
    Ok(())
}

#[test]
fn escape_closes_modal_only_while_open() -> Result<()> {
    let mut page = installed_template()?;

    page.key_down("Escape")?;
    assert_eq!(page.style_property("#gallery-modal", "display")?, None);

    page.click(".gallery-item")?;
    page.key_down("Enter")?;
    assert_eq!(
        page.style_property("#gallery-modal", "display")?.as_deref(),
        Some("block")
    );

    page.key_down("Escape")?;
    assert_eq!(
        page.style_property("#gallery-modal", "display")?.as_deref(),
        Some("none")
    );
    Ok(())
}
