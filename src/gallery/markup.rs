use super::{CategoryButton, GalleryContainer, ImageElement};
use crate::i18n::category_i18n_attrs;
use crate::registry::MetadataRegistry;
use std::fmt::Write;

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn push_attr(out: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        let _ = write!(out, r#" {}="{}""#, name, escape_html(value));
    }
}

/// `<img …>` for one gallery element, with deferred sources written as
/// `data-src`/`data-srcset`.
pub fn image_tag(element: &ImageElement, alt_fallback: &str) -> String {
    let attrs = &element.attributes;
    let mut tag = String::from("<img");

    push_attr(&mut tag, "src", element.src.as_deref());
    push_attr(&mut tag, "srcset", element.srcset.as_deref());
    push_attr(&mut tag, "data-src", element.deferred_src.as_deref());
    push_attr(&mut tag, "data-srcset", element.deferred_srcset.as_deref());

    let alt = attrs
        .alt
        .as_deref()
        .filter(|a| !a.is_empty())
        .unwrap_or(alt_fallback);
    let _ = write!(tag, r#" alt="{}""#, escape_html(alt));

    push_attr(&mut tag, "data-full", attrs.full.as_deref());
    push_attr(&mut tag, "data-title", attrs.title.as_deref());
    push_attr(&mut tag, "data-caption", attrs.caption.as_deref());
    push_attr(&mut tag, "data-date", attrs.date.as_deref());
    push_attr(&mut tag, "data-camera", attrs.camera.as_deref());
    push_attr(&mut tag, "data-settings", attrs.settings.as_deref());
    push_attr(&mut tag, "data-public-id", attrs.public_id.as_deref());

    let _ = write!(
        tag,
        r#" loading="{}" style="--i: {}""#,
        element.loading.as_str(),
        element.style_index
    );
    if element.bound {
        tag.push_str(r#" data-lightbox-bound="true""#);
    }
    tag.push('>');
    tag
}

/// One `gallery-category` block per container; hidden containers carry
/// `display:none`.
pub fn category_sections(
    containers: &[GalleryContainer],
    registry: &MetadataRegistry,
    alt_fallback: &str,
) -> String {
    let mut html = String::new();

    for container in containers {
        let category = container.category.as_deref().unwrap_or_default();
        let _ = writeln!(
            html,
            r#"      <div class="gallery-category" data-category="{}"{}>"#,
            escape_html(category),
            if container.visible {
                ""
            } else {
                r#" style="display:none;""#
            }
        );

        for element in &container.elements {
            let title = registry.lookup(element.reference()).title;
            let _ = writeln!(html, r#"        <div class="gallery-img-wrapper">"#);
            let _ = writeln!(html, "          {}", image_tag(element, alt_fallback));
            let _ = writeln!(
                html,
                r#"          <div class="gallery-img-title">{}</div>"#,
                escape_html(&title)
            );
            let _ = writeln!(html, "        </div>");
        }

        let _ = writeln!(html, "      </div>");
    }

    html
}

/// Desktop button row plus the mobile dropdown whose toggle shows the active
/// category.
pub fn category_buttons(buttons: &[CategoryButton]) -> String {
    let desktop: Vec<String> = buttons
        .iter()
        .map(|b| {
            format!(
                r#"          <button class="category-btn{}" data-category="{}"{}>{}</button>"#,
                if b.active { " active" } else { "" },
                escape_html(&b.category),
                category_i18n_attrs(&b.category, false),
                escape_html(&b.label)
            )
        })
        .collect();

    let mobile: Vec<String> = buttons
        .iter()
        .map(|b| {
            format!(
                r#"            <button class="category-btn" data-category="{}"{}>{}</button>"#,
                escape_html(&b.category),
                category_i18n_attrs(&b.category, false),
                escape_html(&b.label)
            )
        })
        .collect();

    let toggle = buttons
        .iter()
        .find(|b| b.active)
        .or_else(|| buttons.first());
    let (toggle_label, toggle_i18n) = match toggle {
        Some(b) => (
            format!("{} \u{25BC}", b.label),
            category_i18n_attrs(&b.category, true),
        ),
        None => ("All \u{25BC}".to_string(), String::new()),
    };

    format!(
        r#"    <div class="portfolio-categories">
      <div class="portfolio-categories-desktop">
{}
      </div>
      <div class="portfolio-categories-mobile">
        <button class="category-dropdown-toggle" id="categoryDropdownToggle"{}>{}</button>
        <div class="category-dropdown-menu" id="categoryDropdownMenu">
{}
        </div>
      </div>
    </div>"#,
        desktop.join("\n"),
        toggle_i18n,
        escape_html(&toggle_label),
        mobile.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::{GalleryRenderer, LoadingHint};
    use crate::registry::ImageAttributes;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Fox" & hare</b>"#),
            "&lt;b&gt;&quot;Fox&quot; &amp; hare&lt;/b&gt;"
        );
    }

    #[test]
    fn test_image_tag_writes_deferred_sources() {
        let mut element = ImageElement::new(ImageAttributes {
            caption: Some("Comet \"NEOWISE\"".to_string()),
            public_id: Some("images/astro/_4".to_string()),
            ..ImageAttributes::new("https://cdn.example.com/_4.jpg")
        });
        element.style_index = 4;
        element.dehydrate();

        let tag = image_tag(&element, "Portfolio image");
        assert!(tag.starts_with("<img data-src=\"https://cdn.example.com/_4.jpg\""));
        assert!(!tag.contains(" src="));
        assert!(tag.contains(r#"alt="Portfolio image""#));
        assert!(tag.contains(r#"data-caption="Comet &quot;NEOWISE&quot;""#));
        assert!(tag.contains(r#"data-public-id="images/astro/_4""#));
        assert!(tag.contains(r#"loading="lazy" style="--i: 4""#));
        assert!(!tag.contains("data-lightbox-bound"));
    }

    #[test]
    fn test_category_sections_hide_inactive_containers() {
        let mut registry = MetadataRegistry::default();
        let renderer = GalleryRenderer::new(LoadingHint::Lazy);

        let mut astro = GalleryContainer::for_category("astro", Vec::new());
        renderer.render(
            &mut astro,
            &[ImageAttributes {
                title: Some("Moonrise".to_string()),
                ..ImageAttributes::new("images/astro/_7.jpg")
            }],
            &mut registry,
        );
        let mut wildlife = GalleryContainer::for_category("wildlife", Vec::new());
        wildlife.visible = false;

        let html = category_sections(&[astro, wildlife], &registry, "Portfolio image");
        assert!(html.contains(r#"<div class="gallery-category" data-category="astro">"#));
        assert!(html.contains(
            r#"<div class="gallery-category" data-category="wildlife" style="display:none;">"#
        ));
        assert!(html.contains(r#"<div class="gallery-img-title">Moonrise</div>"#));
        assert!(html.contains(r#"data-lightbox-bound="true""#));
    }

    #[test]
    fn test_category_buttons_markup() {
        let buttons = vec![
            CategoryButton {
                category: "astro".to_string(),
                label: "Astro".to_string(),
                active: true,
                labels: None,
            },
            CategoryButton {
                category: "Of_the_photographer".to_string(),
                label: "Of The Photographer".to_string(),
                active: false,
                labels: None,
            },
        ];

        let html = category_buttons(&buttons);
        assert!(html.contains(
            r#"<button class="category-btn active" data-category="astro" data-i18n-en="Astro" data-i18n-nb="Astro">Astro</button>"#
        ));
        assert!(html.contains(
            r#"<button class="category-btn" data-category="Of_the_photographer">Of The Photographer</button>"#
        ));
        assert!(html.contains("Astro \u{25BC}</button>"));
    }
}
