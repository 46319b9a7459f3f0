use crate::dom::NodeId;
use crate::events::{Binding, BindingTarget, EventKind, EventState, Handler, VisualState};
use crate::forms::{self, FormRules};
use crate::notify;
use crate::page::{Page, Rect};
use crate::scheduler::TimerAction;
use crate::selector::Selector;
use crate::{Error, Result};

/// Scroll offset past which the header switches to its condensed state.
const HEADER_SCROLL_THRESHOLD: i64 = 100;
/// Gap kept between the header and a smooth-scroll target.
const SMOOTH_SCROLL_MARGIN: i64 = 20;
/// Probe offset used when deciding which section is "current".
const NAV_PROBE_OFFSET: i64 = 200;
/// Viewport width above which the mobile menu is force-closed.
const MOBILE_MENU_MAX_WIDTH: i64 = 768;
const SCROLL_DEBOUNCE_MS: i64 = 10;
const RESIZE_DEBOUNCE_MS: i64 = 100;
/// Intersection observation: 10% visibility, bottom edge pulled up 50px.
const OBSERVER_THRESHOLD: f64 = 0.1;
const OBSERVER_BOTTOM_MARGIN: i64 = 50;

const OBSERVED_SELECTOR: &str = ".service-card, .feature, .gallery-item, .contact-item";
const FORM_CONTROL_SELECTOR: &str = "input, select, textarea";

/// Per-page controller state: cached element handles, pending debounce
/// timers and the observed-element list. Lives inside [`Page`] so handlers
/// can reach it without a second mutable borrow.
#[derive(Debug, Default)]
pub(crate) struct ControllerState {
    pub(crate) installed: bool,
    pub(crate) scroll_timer: Option<i64>,
    pub(crate) resize_timer: Option<i64>,
    pub(crate) observed: Vec<NodeId>,
    pub(crate) header: Option<NodeId>,
    pub(crate) menu_btn: Option<NodeId>,
    pub(crate) nav: Option<NodeId>,
    pub(crate) modal: Option<NodeId>,
    pub(crate) modal_image: Option<NodeId>,
    pub(crate) contact_form: Option<NodeId>,
    pub(crate) form_rules: Option<FormRules>,
}

/// Wires all page interactivity exactly once. There is no API beyond
/// installation; every behavior runs off the binding table it registers.
/// Features whose elements are missing are silently left unwired.
#[derive(Debug)]
pub struct InteractionController;

impl InteractionController {
    pub fn install(page: &mut Page) -> Result<()> {
        if page.controller.installed {
            return Err(Error::Runtime(
                "interaction controller already installed".into(),
            ));
        }

        let header = page.find(".header")?;
        let menu_btn = page.find("#mobile-menu-btn")?;
        let nav = page.find("#nav")?;
        let modal = page.find("#gallery-modal")?;
        let modal_image = page.find("#modal-image")?;
        let close_modal = page.find("#close-modal")?;
        let contact_form = page.find("#contact-form")?;

        let mut bindings = Vec::new();
        bindings.push(on("a[href^='#']", EventKind::Click, Handler::SmoothScrollAnchor)?);

        if header.is_some() {
            bindings.push(on_document(EventKind::Scroll, Handler::HeaderScrollEffect));
        }

        if menu_btn.is_some() && nav.is_some() {
            bindings.push(on("#mobile-menu-btn", EventKind::Click, Handler::ToggleMobileMenu)?);
            bindings.push(on(".nav-link", EventKind::Click, Handler::CloseMenuOnNavLink)?);
            bindings.push(on_document(EventKind::Click, Handler::CloseMenuOnOutsideClick));
        }

        if modal.is_some() && modal_image.is_some() && close_modal.is_some() {
            bindings.push(on(".gallery-item", EventKind::Click, Handler::OpenGalleryModal)?);
            bindings.push(on("#close-modal", EventKind::Click, Handler::CloseGalleryModal)?);
            bindings.push(on("#gallery-modal", EventKind::Click, Handler::CloseModalOnBackdrop)?);
            bindings.push(on_document(EventKind::KeyDown, Handler::CloseModalOnEscape));
        }

        let form_rules = if contact_form.is_some() {
            bindings.push(on("#contact-form", EventKind::Submit, Handler::SubmitContactForm)?);
            bindings.push(on(FORM_CONTROL_SELECTOR, EventKind::Blur, Handler::ValidateFieldOnBlur)?);
            bindings.push(on(
                FORM_CONTROL_SELECTOR,
                EventKind::Input,
                Handler::ClearFieldErrorOnInput,
            )?);
            Some(FormRules::new()?)
        } else {
            None
        };

        bindings.push(on_document(EventKind::Scroll, Handler::ScrollDebounce));
        bindings.push(on_document(EventKind::Scroll, Handler::ObserveIntersections));
        bindings.push(on_document(EventKind::Resize, Handler::ResizeDebounce));

        let observed = page.find_all(OBSERVED_SELECTOR)?;

        page.bindings = bindings;
        page.controller = ControllerState {
            installed: true,
            scroll_timer: None,
            resize_timer: None,
            observed,
            header,
            menu_btn,
            nav,
            modal,
            modal_image,
            contact_form,
            form_rules,
        };

        // The original runs these once on page load, before any scrolling.
        update_active_nav(page)?;
        evaluate_intersections(page)?;
        Ok(())
    }
}

fn on(selector: &str, event: EventKind, handler: Handler) -> Result<Binding> {
    Ok(Binding {
        target: BindingTarget::Selector(Selector::parse(selector)?),
        event,
        handler,
    })
}

fn on_document(event: EventKind, handler: Handler) -> Binding {
    Binding {
        target: BindingTarget::Document,
        event,
        handler,
    }
}

pub(crate) fn run_handler(
    page: &mut Page,
    handler: Handler,
    node: NodeId,
    event: &mut EventState,
) -> Result<()> {
    if page.trace.events {
        page.trace.log(format!("handler {}", handler.name()));
    }

    match handler {
        Handler::SmoothScrollAnchor => smooth_scroll(page, node, event),
        Handler::HeaderScrollEffect => {
            header_scroll_effect(page);
            Ok(())
        }
        Handler::ScrollDebounce => {
            if page.controller.scroll_timer.is_none() {
                let id = page
                    .scheduler
                    .schedule(SCROLL_DEBOUNCE_MS, TimerAction::UpdateActiveNav);
                page.controller.scroll_timer = Some(id);
            }
            Ok(())
        }
        Handler::ObserveIntersections => evaluate_intersections(page),
        Handler::ToggleMobileMenu => {
            toggle_mobile_menu(page);
            Ok(())
        }
        Handler::CloseMenuOnNavLink => {
            close_mobile_menu(page);
            Ok(())
        }
        Handler::CloseMenuOnOutsideClick => {
            close_menu_on_outside_click(page, event);
            Ok(())
        }
        Handler::OpenGalleryModal => {
            open_gallery_modal(page, node);
            Ok(())
        }
        Handler::CloseGalleryModal => {
            close_gallery_modal(page);
            Ok(())
        }
        Handler::CloseModalOnBackdrop => {
            if event.target == Some(node) {
                close_gallery_modal(page);
            }
            Ok(())
        }
        Handler::CloseModalOnEscape => {
            if event.key.as_deref() == Some("Escape") && modal_visible(page) {
                close_gallery_modal(page);
            }
            Ok(())
        }
        Handler::ResizeDebounce => {
            if page.controller.resize_timer.is_none() {
                let id = page
                    .scheduler
                    .schedule(RESIZE_DEBOUNCE_MS, TimerAction::ResizeSettled);
                page.controller.resize_timer = Some(id);
            }
            Ok(())
        }
        Handler::SubmitContactForm => forms::handle_submit(page, node, event),
        Handler::ValidateFieldOnBlur => {
            if field_belongs_to_contact_form(page, node) {
                forms::validate_field(page, node)?;
            }
            Ok(())
        }
        Handler::ClearFieldErrorOnInput => {
            if field_belongs_to_contact_form(page, node) {
                forms::clear_field_error(page, node);
            }
            Ok(())
        }
    }
}

pub(crate) fn run_timer_action(page: &mut Page, action: TimerAction) -> Result<()> {
    match action {
        TimerAction::UpdateActiveNav => {
            page.controller.scroll_timer = None;
            update_active_nav(page)
        }
        TimerAction::ResizeSettled => {
            page.controller.resize_timer = None;
            if page.viewport.inner_width > MOBILE_MENU_MAX_WIDTH {
                close_mobile_menu(page);
            }
            // A taller viewport can newly expose observed elements.
            evaluate_intersections(page)
        }
        TimerAction::NotificationSlideIn(node) => {
            notify::slide_in(page, node);
            Ok(())
        }
        TimerAction::NotificationSlideOut(node) => {
            notify::slide_out(page, node);
            Ok(())
        }
        TimerAction::NotificationRemove(node) => {
            notify::remove(page, node);
            Ok(())
        }
    }
}

fn smooth_scroll(page: &mut Page, anchor: NodeId, event: &mut EventState) -> Result<()> {
    event.prevent_default();
    let Some(href) = page.dom.attr(anchor, "href").map(ToOwned::to_owned) else {
        return Ok(());
    };
    let Some(id) = href.strip_prefix('#') else {
        return Ok(());
    };
    if id.is_empty() {
        return Ok(());
    }
    let Some(target) = page.dom.by_id(id) else {
        return Ok(());
    };

    let header_height = page
        .controller
        .header
        .map(|header| page.rect(header).height)
        .unwrap_or(0);
    let y = page.rect(target).top - header_height - SMOOTH_SCROLL_MARGIN;
    // The browser animates this; the deterministic model lands immediately
    // and emits a single scroll event.
    page.scroll_to(y.max(0))
}

fn header_scroll_effect(page: &mut Page) {
    let Some(header) = page.controller.header else {
        return;
    };
    if page.viewport.scroll_y > HEADER_SCROLL_THRESHOLD {
        page.dom.add_class(header, VisualState::Scrolled.class_name());
    } else {
        page.dom.remove_class(header, VisualState::Scrolled.class_name());
    }
}

fn toggle_mobile_menu(page: &mut Page) {
    let (Some(menu_btn), Some(nav)) = (page.controller.menu_btn, page.controller.nav) else {
        return;
    };
    page.dom.toggle_class(menu_btn, VisualState::Active.class_name());
    page.dom.toggle_class(nav, VisualState::Active.class_name());
}

pub(crate) fn close_mobile_menu(page: &mut Page) {
    let (Some(menu_btn), Some(nav)) = (page.controller.menu_btn, page.controller.nav) else {
        return;
    };
    page.dom.remove_class(menu_btn, VisualState::Active.class_name());
    page.dom.remove_class(nav, VisualState::Active.class_name());
}

fn close_menu_on_outside_click(page: &mut Page, event: &EventState) {
    let (Some(menu_btn), Some(nav)) = (page.controller.menu_btn, page.controller.nav) else {
        return;
    };
    let Some(target) = event.target else {
        return;
    };
    if page.dom.contains(nav, target) || page.dom.contains(menu_btn, target) {
        return;
    }
    close_mobile_menu(page);
}

fn open_gallery_modal(page: &mut Page, item: NodeId) {
    let (Some(modal), Some(modal_image)) = (page.controller.modal, page.controller.modal_image)
    else {
        return;
    };
    let Some(img) = page
        .dom
        .descendants(item)
        .into_iter()
        .find(|node| {
            page.dom
                .tag_name(*node)
                .is_some_and(|tag| tag.eq_ignore_ascii_case("img"))
        })
    else {
        return;
    };

    let src = page.dom.attr(img, "src").unwrap_or("").to_string();
    let alt = page.dom.attr(img, "alt").unwrap_or("").to_string();
    page.dom.set_attr(modal_image, "src", &src);
    page.dom.set_attr(modal_image, "alt", &alt);
    page.dom.set_style_property(modal, "display", "block");

    let body = page.dom.body_or_root();
    page.dom.set_style_property(body, "overflow", "hidden");
}

fn close_gallery_modal(page: &mut Page) {
    let Some(modal) = page.controller.modal else {
        return;
    };
    page.dom.set_style_property(modal, "display", "none");
    let body = page.dom.body_or_root();
    page.dom.set_style_property(body, "overflow", "auto");
}

fn modal_visible(page: &Page) -> bool {
    page.controller
        .modal
        .and_then(|modal| page.dom.style_property(modal, "display"))
        .is_some_and(|display| display == "block")
}

/// Recompute which nav link is active. Pure function of the current scroll
/// position: the last `section[id]` whose vertical span contains
/// `scroll_y + 200` wins; with no match, no link is active.
pub(crate) fn update_active_nav(page: &mut Page) -> Result<()> {
    let sections = page.find_all("section[id]")?;
    let probe = page.viewport.scroll_y + NAV_PROBE_OFFSET;

    let mut current: Option<String> = None;
    for section in sections {
        let rect = page.rect(section);
        if probe >= rect.top && probe < rect.top + rect.height {
            if let Some(id) = page.dom.attr(section, "id") {
                current = Some(id.to_string());
            }
        }
    }

    let links = page.find_all(".nav-link")?;
    for link in links {
        let matches_current = match (&current, page.dom.attr(link, "href")) {
            (Some(id), Some(href)) => href == format!("#{id}"),
            _ => false,
        };
        if matches_current {
            page.dom.add_class(link, VisualState::Active.class_name());
        } else {
            page.dom.remove_class(link, VisualState::Active.class_name());
        }
    }
    Ok(())
}

/// One-shot fade-in: the first time an observed element intersects the
/// (bottom-shrunk) viewport by at least the threshold, it gains the
/// animation class and is never touched again.
fn evaluate_intersections(page: &mut Page) -> Result<()> {
    let viewport_top = page.viewport.scroll_y;
    let viewport_bottom = viewport_top + page.viewport.inner_height - OBSERVER_BOTTOM_MARGIN;

    for node in page.controller.observed.clone() {
        if page.dom.has_class(node, VisualState::FadeInUp.class_name()) {
            continue;
        }
        let rect = page.rect(node);
        if intersection_ratio(rect, viewport_top, viewport_bottom) >= OBSERVER_THRESHOLD {
            page.dom.add_class(node, VisualState::FadeInUp.class_name());
        }
    }
    Ok(())
}

fn intersection_ratio(rect: Rect, top: i64, bottom: i64) -> f64 {
    if rect.height <= 0 {
        return if rect.top >= top && rect.top < bottom {
            1.0
        } else {
            0.0
        };
    }
    let visible_top = rect.top.max(top);
    let visible_bottom = (rect.top + rect.height).min(bottom);
    let visible = visible_bottom - visible_top;
    (visible as f64 / rect.height as f64).max(0.0)
}

fn field_belongs_to_contact_form(page: &Page, field: NodeId) -> bool {
    page.controller
        .contact_form
        .is_some_and(|form| page.dom.contains(form, field))
}
