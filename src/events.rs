use crate::dom::NodeId;
use crate::selector::Selector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventKind {
    Click,
    Scroll,
    Resize,
    KeyDown,
    Submit,
    Input,
    Blur,
}

impl EventKind {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::KeyDown => "keydown",
            Self::Submit => "submit",
            Self::Input => "input",
            Self::Blur => "blur",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) kind: EventKind,
    pub(crate) target: Option<NodeId>,
    pub(crate) key: Option<String>,
    pub(crate) default_prevented: bool,
}

impl EventState {
    pub(crate) fn new(kind: EventKind, target: Option<NodeId>, key: Option<String>) -> Self {
        Self {
            kind,
            target,
            key,
            default_prevented: false,
        }
    }

    pub(crate) fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Where a binding listens: on nodes matching a selector, or on the document
/// itself (fires once per event regardless of target). Selectors are parsed
/// at install time so a bad selector fails there, not at dispatch.
#[derive(Debug, Clone)]
pub(crate) enum BindingTarget {
    Selector(Selector),
    Document,
}

/// Controller actions. Every page behavior is one of these, invoked through
/// the binding table — the declarative equivalent of scattered
/// `addEventListener` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Handler {
    SmoothScrollAnchor,
    HeaderScrollEffect,
    ScrollDebounce,
    ObserveIntersections,
    ToggleMobileMenu,
    CloseMenuOnNavLink,
    CloseMenuOnOutsideClick,
    OpenGalleryModal,
    CloseGalleryModal,
    CloseModalOnBackdrop,
    CloseModalOnEscape,
    ResizeDebounce,
    SubmitContactForm,
    ValidateFieldOnBlur,
    ClearFieldErrorOnInput,
}

impl Handler {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::SmoothScrollAnchor => "smooth-scroll-anchor",
            Self::HeaderScrollEffect => "header-scroll-effect",
            Self::ScrollDebounce => "scroll-debounce",
            Self::ObserveIntersections => "observe-intersections",
            Self::ToggleMobileMenu => "toggle-mobile-menu",
            Self::CloseMenuOnNavLink => "close-menu-on-nav-link",
            Self::CloseMenuOnOutsideClick => "close-menu-on-outside-click",
            Self::OpenGalleryModal => "open-gallery-modal",
            Self::CloseGalleryModal => "close-gallery-modal",
            Self::CloseModalOnBackdrop => "close-modal-on-backdrop",
            Self::CloseModalOnEscape => "close-modal-on-escape",
            Self::ResizeDebounce => "resize-debounce",
            Self::SubmitContactForm => "submit-contact-form",
            Self::ValidateFieldOnBlur => "validate-field-on-blur",
            Self::ClearFieldErrorOnInput => "clear-field-error-on-input",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Binding {
    pub(crate) target: BindingTarget,
    pub(crate) event: EventKind,
    pub(crate) handler: Handler,
}

/// Visual states the controller toggles. Applied as CSS classes so the page
/// stylesheet owns the actual presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VisualState {
    Scrolled,
    Active,
    FadeInUp,
    FieldError,
}

impl VisualState {
    pub(crate) fn class_name(self) -> &'static str {
        match self {
            Self::Scrolled => "scrolled",
            Self::Active => "active",
            Self::FadeInUp => "fade-in-up",
            Self::FieldError => "error",
        }
    }
}
