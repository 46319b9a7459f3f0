use super::*;

const OBSERVED_HTML: &str = r#"
    <div class='service-card' id='near'></div>
    <div class='feature' id='edge'></div>
    <div class='gallery-item' id='far'></div>
    <div class='contact-item' id='above'></div>
    <p id='plain'></p>
"#;

fn observed_page() -> Result<Page> {
    let mut page = Page::from_html(OBSERVED_HTML)?;
    page.set_layout("#near", section_rect(100, 200))?;
    page.set_layout("#edge", section_rect(730, 200))?;
    page.set_layout("#far", section_rect(2000, 200))?;
    page.set_layout(
        "#above",
        Rect {
            top: -300,
            left: 0,
            width: 1280,
            height: 200,
        },
    )?;
    InteractionController::install(&mut page)?;
    Ok(page)
}

#[test]
fn visible_elements_animate_at_install() -> Result<()> {
    let page = observed_page()?;
    page.assert_has_class("#near", "fade-in-up")?;
    assert!(!page.has_class("#far", "fade-in-up")?);
    assert!(!page.has_class("#plain", "fade-in-up")?);
    Ok(())
}

#[test]
fn threshold_counts_the_bottom_margin() -> Result<()> {
    // Effective viewport bottom is 800 - 50 = 750, so an element at 730 with
    // height 200 shows exactly 20px: ratio 0.1, right on the threshold.
    let page = observed_page()?;
    page.assert_has_class("#edge", "fade-in-up")?;

    let mut page = Page::from_html(OBSERVED_HTML)?;
    page.set_layout("#edge", section_rect(731, 200))?;
    InteractionController::install(&mut page)?;
    assert!(!page.has_class("#edge", "fade-in-up")?);
    Ok(())
}

#[test]
fn element_fully_above_the_viewport_does_not_animate() -> Result<()> {
    let page = observed_page()?;
    assert!(!page.has_class("#above", "fade-in-up")?);
    Ok(())
}

#[test]
fn growing_the_viewport_animates_after_the_resize_settles() -> Result<()> {
    let mut page = Page::from_html(OBSERVED_HTML)?;
    page.set_layout("#far", section_rect(900, 200))?;
    InteractionController::install(&mut page)?;
    assert!(!page.has_class("#far", "fade-in-up")?);

    page.resize_to(1280, 1100)?;
    assert!(!page.has_class("#far", "fade-in-up")?);

    page.advance_time(100)?;
    page.assert_has_class("#far", "fade-in-up")?;
    Ok(())
}

#[test]
fn scrolling_into_view_animates_once_and_persists() -> Result<()> {
    let mut page = observed_page()?;

    page.scroll_to(1500)?;
    page.assert_has_class("#far", "fade-in-up")?;

    page.scroll_to(0)?;
    page.advance_time(10)?;
    page.assert_has_class("#far", "fade-in-up")?;
    Ok(())
}
