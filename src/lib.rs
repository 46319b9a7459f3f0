//! Deterministic interaction layer for a marketing-site template.
//!
//! The crate models the page as an in-memory DOM and wires the template's
//! interactivity (navigation, mobile menu, gallery modal, form validation,
//! scroll-triggered animation) through one explicitly constructed
//! [`InteractionController`]. Everything runs without a browser: scrolling,
//! resizing and timers are driven through the [`Page`] API, so the full
//! behavior is observable from ordinary tests.
//!
//! ```
//! use sitewire::{InteractionController, Page};
//!
//! # fn main() -> sitewire::Result<()> {
//! let html = r#"
//!     <header class='header'><button id='mobile-menu-btn'></button>
//!       <nav id='nav'><a class='nav-link' href='#about'>About</a></nav>
//!     </header>
//!     <section id='about'></section>
//! "#;
//! let mut page = Page::from_html(html)?;
//! InteractionController::install(&mut page)?;
//! page.click("#mobile-menu-btn")?;
//! assert!(page.has_class("#nav", "active")?);
//! # Ok(())
//! # }
//! ```

use std::error::Error as StdError;
use std::fmt;

mod controller;
mod customize;
mod dom;
mod events;
mod forms;
mod html;
mod notify;
mod page;
mod scheduler;
mod selector;
mod trace;


pub use controller::InteractionController;
pub use customize::{
    BusinessInfo, ContactInfo, GalleryImage, Service, set_business_info, set_gallery_images,
    set_services, set_theme_colors,
};
pub use notify::{NotificationKind, show_notification};
pub use page::{Page, Rect};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    Runtime(String),
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::Runtime(msg) => write!(f, "runtime error: {msg}"),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
        }
    }
}

impl StdError for Error {}
