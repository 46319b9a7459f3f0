use super::*;

#[test]
fn parse_nested_markup_and_read_text() -> Result<()> {
    let page = Page::from_html("<div id='a'><p>Olá <b>mundo</b>!</p></div>")?;
    page.assert_text("#a", "Olá mundo!")?;
    page.assert_text("#a b", "mundo")?;
    Ok(())
}

#[test]
fn character_references_are_decoded() -> Result<()> {
    let page = Page::from_html("<p id='t'>a &amp; b &lt;c&gt; &#233; &#x41;</p>")?;
    page.assert_text("#t", "a & b <c> é A")?;
    Ok(())
}

#[test]
fn void_and_self_closing_tags_do_not_swallow_siblings() -> Result<()> {
    let page = Page::from_html("<img src='x.png'><br><input id='i'/><p id='p'>fim</p>")?;
    page.assert_text("#p", "fim")?;
    assert_eq!(page.count("img")?, 1);
    Ok(())
}

#[test]
fn list_items_and_paragraphs_close_implicitly() -> Result<()> {
    let page = Page::from_html("<ul><li>um<li>dois<li>três</ul><p>a<p>b")?;
    assert_eq!(page.count("ul li")?, 3);
    assert_eq!(page.count("p")?, 2);
    Ok(())
}

#[test]
fn script_content_is_raw_text() -> Result<()> {
    let page = Page::from_html("<script>if (a < b) { run(); }</script><p id='p'>ok</p>")?;
    page.assert_text("script", "if (a < b) { run(); }")?;
    page.assert_text("#p", "ok")?;
    Ok(())
}

#[test]
fn unclosed_tags_recover_at_end_of_input() -> Result<()> {
    let page = Page::from_html("<div><span id='s'>solto")?;
    page.assert_text("#s", "solto")?;
    Ok(())
}

#[test]
fn selector_forms_match_expected_elements() -> Result<()> {
    let page = Page::from_html(
        r#"
        <div class='card featured' data-kind='promo'>
          <a href='#top' class='link'>topo</a>
          <a href='/fora' class='link'>fora</a>
        </div>
        <div class='card'></div>
    "#,
    )?;

    assert_eq!(page.count("div")?, 2);
    assert_eq!(page.count(".card")?, 2);
    assert_eq!(page.count(".card.featured")?, 1);
    assert_eq!(page.count("[data-kind]")?, 1);
    assert_eq!(page.count("[data-kind='promo']")?, 1);
    assert_eq!(page.count("a[href^='#']")?, 1);
    assert_eq!(page.count(".featured .link")?, 2);
    assert_eq!(page.count(".card a, div")?, 4);
    assert!(!page.exists("[data-kind='outro']")?);
    Ok(())
}

#[test]
fn unsupported_combinators_are_rejected() -> Result<()> {
    let page = Page::from_html("<div><p>x</p></div>")?;
    assert!(matches!(
        page.exists("div > p"),
        Err(Error::UnsupportedSelector(_))
    ));
    assert!(matches!(
        page.exists("div + p"),
        Err(Error::UnsupportedSelector(_))
    ));
    Ok(())
}

#[test]
fn missing_selector_is_reported_with_the_selector() -> Result<()> {
    let mut page = Page::from_html("<div></div>")?;
    match page.click("#sumiu") {
        Err(Error::SelectorNotFound(selector)) => assert_eq!(selector, "#sumiu"),
        other => panic!("unexpected: {other:?}"),
    }
    Ok(())
}

#[test]
fn style_attribute_survives_url_values() -> Result<()> {
    let page = Page::from_html(
        "<div id='d' style=\"color: red; background: url(a;b.png); --x: 1\"></div>",
    )?;
    assert_eq!(page.style_property("#d", "color")?.as_deref(), Some("red"));
    assert_eq!(
        page.style_property("#d", "background")?.as_deref(),
        Some("url(a;b.png)")
    );
    assert_eq!(page.style_property("#d", "--x")?.as_deref(), Some("1"));
    Ok(())
}

#[test]
fn textarea_and_select_pick_up_initial_values() -> Result<()> {
    let page = Page::from_html(
        r#"
        <textarea id='t'>rascunho</textarea>
        <select id='s'>
          <option value='a'>A</option>
          <option value='b' selected>B</option>
        </select>
        <input id='i' value='pronto'>
    "#,
    )?;
    page.assert_value("#t", "rascunho")?;
    page.assert_value("#s", "b")?;
    assert_eq!(page.value("#i")?, "pronto");
    Ok(())
}

#[test]
fn assertion_failure_carries_a_dom_snippet() -> Result<()> {
    let page = Page::from_html("<p id='p'>real</p>")?;
    match page.assert_text("#p", "esperado") {
        Err(Error::AssertionFailed {
            expected, actual, dom_snippet, ..
        }) => {
            assert_eq!(expected, "esperado");
            assert_eq!(actual, "real");
            assert!(dom_snippet.contains("<p"));
        }
        other => panic!("unexpected: {other:?}"),
    }
    Ok(())
}
