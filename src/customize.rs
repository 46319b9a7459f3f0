//! Template customization: one-shot content rewrites applied to a parsed
//! page. Each function degrades silently when the section it targets is
//! missing, so a trimmed-down page can still be customized.

use crate::dom::NodeId;
use crate::page::Page;
use crate::Result;

const DEFAULT_SERVICE_ICON: &str = "🔧";
const SERVICE_BUTTON_LABEL: &str = "Saiba Mais";
const GALLERY_OVERLAY_LABEL: &str = "Ver Imagem";

/// Contact detail replacements. Every field is independently optional;
/// absent (or empty) fields leave the existing content alone.
#[derive(Debug, Clone, Default)]
pub struct ContactInfo {
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub hours: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BusinessInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub contact: Option<ContactInfo>,
}

#[derive(Debug, Clone)]
pub struct Service {
    pub icon: Option<String>,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct GalleryImage {
    pub src: String,
    pub alt: Option<String>,
}

/// Set theme colors as custom properties on the root element, named
/// `--{name}` so the stylesheet picks them up.
pub fn set_theme_colors(page: &mut Page, colors: &[(&str, &str)]) -> Result<()> {
    let Some(root) = page.dom.root_element() else {
        return Ok(());
    };
    for (name, value) in colors {
        page.dom
            .set_style_property(root, &format!("--{name}"), value);
    }
    Ok(())
}

/// Rewrite the branded text slots: logo, hero title and subtitle, and the
/// four contact detail paragraphs (address, phone, email, opening hours, in
/// markup order). Address and hours may span multiple lines. Each field is
/// independently optional; only the fields that carry text are applied.
pub fn set_business_info(page: &mut Page, info: &BusinessInfo) -> Result<()> {
    if let Some(name) = present(&info.name) {
        if let Some(logo) = page.find(".logo h1")? {
            page.dom.set_text_content(logo, name);
        }
        if let Some(title) = page.find(".hero-title")? {
            page.dom
                .set_text_content(title, &format!("Bem-vindo ao {name}"));
        }
    }
    if let Some(description) = present(&info.description) {
        if let Some(subtitle) = page.find(".hero-subtitle")? {
            page.dom.set_text_content(subtitle, description);
        }
    }

    if let Some(contact) = &info.contact {
        let slots = page.find_all(".contact-item p")?;
        let fields = [
            (&contact.address, true),
            (&contact.phone, false),
            (&contact.email, false),
            (&contact.hours, true),
        ];
        for (slot, (field, multiline)) in slots.into_iter().zip(fields) {
            let Some(text) = present(field) else {
                continue;
            };
            if multiline {
                set_multiline_text(page, slot, text);
            } else {
                page.dom.set_text_content(slot, text);
            }
        }
    }
    Ok(())
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|text| !text.is_empty())
}

/// Replace the service cards. An empty list leaves the existing cards alone.
pub fn set_services(page: &mut Page, services: &[Service]) -> Result<()> {
    if services.is_empty() {
        return Ok(());
    }
    let Some(grid) = page.find(".services-grid")? else {
        return Ok(());
    };
    for child in page.dom.children(grid).to_vec() {
        page.dom.detach(child);
    }

    for service in services {
        let card = page
            .dom
            .create_element(grid, "div".to_string(), Default::default());
        page.dom.add_class(card, "service-card");

        let icon = page
            .dom
            .create_element(card, "div".to_string(), Default::default());
        page.dom.add_class(icon, "service-icon");
        page.dom.set_text_content(
            icon,
            service.icon.as_deref().unwrap_or(DEFAULT_SERVICE_ICON),
        );

        let title = page
            .dom
            .create_element(card, "h3".to_string(), Default::default());
        page.dom.set_text_content(title, &service.title);

        let description = page
            .dom
            .create_element(card, "p".to_string(), Default::default());
        page.dom.set_text_content(description, &service.description);

        let button = page
            .dom
            .create_element(card, "button".to_string(), Default::default());
        page.dom.add_class(button, "btn");
        page.dom.add_class(button, "btn-outline");
        page.dom.set_text_content(button, SERVICE_BUTTON_LABEL);
    }
    Ok(())
}

/// Replace the gallery items. Images without alt text get a numbered
/// placeholder, counted from one.
pub fn set_gallery_images(page: &mut Page, images: &[GalleryImage]) -> Result<()> {
    if images.is_empty() {
        return Ok(());
    }
    let Some(grid) = page.find(".gallery-grid")? else {
        return Ok(());
    };
    for child in page.dom.children(grid).to_vec() {
        page.dom.detach(child);
    }

    for (idx, image) in images.iter().enumerate() {
        let item = page
            .dom
            .create_element(grid, "div".to_string(), Default::default());
        page.dom.add_class(item, "gallery-item");

        let img = page
            .dom
            .create_element(item, "img".to_string(), Default::default());
        page.dom.set_attr(img, "src", &image.src);
        let alt = match &image.alt {
            Some(alt) => alt.clone(),
            None => format!("Imagem da galeria {}", idx + 1),
        };
        page.dom.set_attr(img, "alt", &alt);
        page.dom.set_attr(img, "loading", "lazy");

        let overlay = page
            .dom
            .create_element(item, "div".to_string(), Default::default());
        page.dom.add_class(overlay, "gallery-overlay");

        let label = page
            .dom
            .create_element(overlay, "span".to_string(), Default::default());
        page.dom.set_text_content(label, GALLERY_OVERLAY_LABEL);
    }
    Ok(())
}

fn set_multiline_text(page: &mut Page, node: NodeId, text: &str) {
    page.dom.set_text_content(node, "");
    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            page.dom
                .create_element(node, "br".to_string(), Default::default());
        }
        if !line.is_empty() {
            page.dom.create_text(node, line.to_string());
        }
    }
}
