use crate::dom::{self, NodeId};
use crate::events::{EventState, VisualState};
use crate::notify::{self, NotificationKind};
use crate::page::Page;
use crate::{Error, Result};

pub(crate) const MSG_REQUIRED: &str = "Este campo é obrigatório";
pub(crate) const MSG_INVALID_EMAIL: &str = "Por favor, insira um email válido";
pub(crate) const MSG_INVALID_PHONE: &str = "Por favor, insira um telefone válido";
pub(crate) const MSG_SUBMIT_SUCCESS: &str =
    "Mensagem enviada com sucesso! Entraremos em contato em breve.";

const ERROR_MESSAGE_CLASS: &str = "error-message";

/// Compiled validation patterns, built once at controller install. The phone
/// pattern is deliberately loose: it accepts Brazilian landline and mobile
/// shapes with or without the area-code parentheses and separators.
#[derive(Debug)]
pub(crate) struct FormRules {
    email: fancy_regex::Regex,
    phone: fancy_regex::Regex,
}

impl FormRules {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            email: compile_rule(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")?,
            phone: compile_rule(r"^\(?[0-9]{2}\)?[-. ]?[0-9]{4,5}[-. ]?[0-9]{4}$")?,
        })
    }
}

fn compile_rule(pattern: &str) -> Result<fancy_regex::Regex> {
    fancy_regex::Regex::new(pattern)
        .map_err(|err| Error::Runtime(format!("invalid validation pattern: {err}")))
}

fn rule_matches(rule: &fancy_regex::Regex, value: &str) -> Result<bool> {
    rule.is_match(value)
        .map_err(|err| Error::Runtime(format!("validation pattern failed: {err}")))
}

/// Validate every `[required]` control in the form. All fields are checked
/// even after the first failure so each one shows its own message.
pub(crate) fn validate_form(page: &mut Page, form: NodeId) -> Result<bool> {
    let required: Vec<NodeId> = page
        .dom
        .descendants(form)
        .into_iter()
        .filter(|node| {
            page.dom.element(*node).is_some_and(|element| {
                element.required && !element.disabled && dom::is_form_control_tag(&element.tag_name)
            })
        })
        .collect();

    let mut is_valid = true;
    for field in required {
        if !validate_field(page, field)? {
            is_valid = false;
        }
    }
    Ok(is_valid)
}

/// Validate one control: required first, then the name-specific format rule.
/// Any previous error on the field is cleared before re-checking.
pub(crate) fn validate_field(page: &mut Page, field: NodeId) -> Result<bool> {
    clear_field_error(page, field);

    let Some(element) = page.dom.element(field) else {
        return Ok(true);
    };
    if element.disabled {
        return Ok(true);
    }
    let value = element.value.trim().to_string();
    let name = element.attrs.get("name").cloned();
    let required = element.required;

    let message = {
        let rules = page
            .controller
            .form_rules
            .as_ref()
            .ok_or_else(|| Error::Runtime("form validation rules not installed".into()))?;
        if required && value.is_empty() {
            Some(MSG_REQUIRED)
        } else if name.as_deref() == Some("email")
            && !value.is_empty()
            && !rule_matches(&rules.email, &value)?
        {
            Some(MSG_INVALID_EMAIL)
        } else if name.as_deref() == Some("phone") && !value.is_empty() {
            let compact: String = value.chars().filter(|ch| !ch.is_whitespace()).collect();
            if rule_matches(&rules.phone, &compact)? {
                None
            } else {
                Some(MSG_INVALID_PHONE)
            }
        } else {
            None
        }
    };

    match message {
        Some(message) => {
            show_field_error(page, field, message);
            Ok(false)
        }
        None => Ok(true),
    }
}

/// Mark the field and show an inline message right after it. An existing
/// message element is reused so repeated failures never stack messages.
fn show_field_error(page: &mut Page, field: NodeId, message: &str) {
    page.dom.add_class(field, VisualState::FieldError.class_name());

    let Some(parent) = page.dom.parent(field) else {
        return;
    };
    let existing = page
        .dom
        .children(parent)
        .iter()
        .copied()
        .find(|child| page.dom.has_class(*child, ERROR_MESSAGE_CLASS));

    let note = match existing {
        Some(node) => node,
        None => {
            let node = page
                .dom
                .create_element(parent, "span".to_string(), Default::default());
            page.dom.add_class(node, ERROR_MESSAGE_CLASS);
            page.dom.set_style_property(node, "color", "var(--error-color)");
            page.dom
                .set_style_property(node, "font-size", "var(--font-size-sm)");
            page.dom
                .set_style_property(node, "margin-top", "var(--spacing-xs)");
            page.dom.set_style_property(node, "display", "block");
            node
        }
    };
    page.dom.set_text_content(note, message);
}

pub(crate) fn clear_field_error(page: &mut Page, field: NodeId) {
    page.dom
        .remove_class(field, VisualState::FieldError.class_name());

    let Some(parent) = page.dom.parent(field) else {
        return;
    };
    let notes: Vec<NodeId> = page
        .dom
        .children(parent)
        .iter()
        .copied()
        .filter(|child| page.dom.has_class(*child, ERROR_MESSAGE_CLASS))
        .collect();
    for note in notes {
        page.dom.detach(note);
    }
}

/// Submit path: block the native submission, validate, and on success record
/// the payload, confirm to the user and reset the form. An invalid form shows
/// its field errors and nothing else.
pub(crate) fn handle_submit(page: &mut Page, form: NodeId, event: &mut EventState) -> Result<()> {
    event.prevent_default();

    if !validate_form(page, form)? {
        return Ok(());
    }

    let data = collect_form_data(page, form);
    if page.trace.enabled {
        let summary: Vec<String> = data
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        page.trace
            .log(format!("form submitted: {}", summary.join("&")));
    }
    page.submissions.push(data);

    notify::show_notification(page, MSG_SUBMIT_SUCCESS, NotificationKind::Success)?;
    page.dom.reset_form_controls(form);
    Ok(())
}

/// Named control values in document order, the shape `FormData` would carry.
fn collect_form_data(page: &Page, form: NodeId) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for node in page.dom.descendants(form) {
        let Some(element) = page.dom.element(node) else {
            continue;
        };
        if !dom::is_form_control_tag(&element.tag_name) || element.disabled {
            continue;
        }
        let Some(name) = element.attrs.get("name") else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        out.push((name.clone(), element.value.clone()));
    }
    out
}
