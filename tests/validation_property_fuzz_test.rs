use proptest::prelude::*;
use proptest::test_runner::{TestCaseError, TestCaseResult};
use sitewire::{InteractionController, Page};

const FORM_HTML: &str = r#"
    <form id='contact-form'>
      <input id='name' name='name' required>
      <input id='email' name='email' required>
      <input id='phone' name='phone'>
      <textarea id='message' name='message' required></textarea>
    </form>
"#;

fn blur_with(field: &str, value: &str) -> Result<bool, TestCaseError> {
    let mut page = Page::from_html(FORM_HTML)
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    InteractionController::install(&mut page)
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    page.type_text(field, value)
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    page.blur(field)
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    page.has_class(field, "error")
        .map_err(|err| TestCaseError::fail(err.to_string()))
}

fn email_local_strategy() -> BoxedStrategy<String> {
    "[a-z0-9._%+-]{1,16}".boxed()
}

fn email_domain_strategy() -> BoxedStrategy<String> {
    ("[a-z0-9-]{1,12}", "[a-z]{2,6}")
        .prop_map(|(host, tld)| format!("{host}.{tld}"))
        .boxed()
}

fn digits(len: std::ops::RangeInclusive<usize>) -> BoxedStrategy<String> {
    proptest::collection::vec(0u8..10, len)
        .prop_map(|ds| ds.into_iter().map(|d| char::from(b'0' + d)).collect())
        .boxed()
}

fn separator_strategy() -> BoxedStrategy<&'static str> {
    prop_oneof![Just(""), Just("-"), Just("."), Just(" ")].boxed()
}

fn check_email(value: &str, expect_error: bool) -> TestCaseResult {
    let flagged = blur_with("#email", value)?;
    prop_assert_eq!(flagged, expect_error, "email {}", value);
    Ok(())
}

fn check_phone(value: &str, expect_error: bool) -> TestCaseResult {
    let flagged = blur_with("#phone", value)?;
    prop_assert_eq!(flagged, expect_error, "phone {}", value);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn well_formed_emails_pass(
        local in email_local_strategy(),
        domain in email_domain_strategy(),
    ) {
        check_email(&format!("{local}@{domain}"), false)?;
    }

    #[test]
    fn emails_without_an_at_sign_fail(
        local in email_local_strategy(),
        domain in email_domain_strategy(),
    ) {
        check_email(&format!("{local}{domain}"), true)?;
    }

    #[test]
    fn emails_without_a_dotted_domain_fail(
        local in email_local_strategy(),
        host in "[a-z0-9]{1,12}",
    ) {
        check_email(&format!("{local}@{host}"), true)?;
    }

    #[test]
    fn emails_with_embedded_spaces_fail(
        left in "[a-z]{1,8}",
        right in "[a-z]{1,8}",
        domain in email_domain_strategy(),
    ) {
        check_email(&format!("{left} {right}@{domain}"), true)?;
    }

    #[test]
    fn brazilian_phone_shapes_pass(
        area in digits(2..=2),
        prefix in digits(4..=5),
        suffix in digits(4..=4),
        parens in any::<bool>(),
        sep_a in separator_strategy(),
        sep_b in separator_strategy(),
    ) {
        let area = if parens { format!("({area})") } else { area };
        check_phone(&format!("{area}{sep_a}{prefix}{sep_b}{suffix}"), false)?;
    }

    #[test]
    fn alphabetic_phone_input_fails(value in "[a-zA-Z]{1,20}") {
        check_phone(&value, true)?;
    }

    #[test]
    fn too_short_numeric_phones_fail(value in digits(1..=7)) {
        check_phone(&value, true)?;
    }
}
