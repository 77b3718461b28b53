use super::CommandError;
use crate::Config;
use crate::catalog::{Catalog, CategoryGroup, ImageRecord};
use crate::gallery::{GalleryContainer, ImageElement};
use crate::i18n::{Language, STORAGE_KEY};
use crate::page::{IMAGE_PARAM, PortfolioPage};
use crate::registry::ImageAttributes;
use crate::static_files::StaticFileHandler;
use crate::templating::TemplateEngine;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const PAGES: [&str; 5] = ["index", "portfolio", "about", "showcase", "blog"];

/// Copied from the source directory into the output when present.
pub const ASSETS: [&str; 3] = ["style.css", "script.js", "images/portrait.jpg"];

const FEATURED_LIMIT: usize = 3;
const SHOWCASE_LIMIT: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewReport {
    pub rendered: Vec<String>,
    pub skipped: Vec<String>,
    pub copied: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct PreviewImage {
    url: String,
    title: String,
    caption: String,
    public_id: String,
    category: String,
    /// Deep link into the portfolio viewer.
    link: String,
}

impl From<&ImageRecord> for PreviewImage {
    fn from(record: &ImageRecord) -> Self {
        Self {
            link: format!(
                "portfolio.html?{}={}",
                IMAGE_PARAM,
                urlencoding::encode(&record.url)
            ),
            url: record.url.clone(),
            title: record.title.clone(),
            caption: record.caption.clone(),
            public_id: record.public_id.clone(),
            category: record.category_or_default().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct PreviewCategory {
    name: String,
    display_name: String,
    count: usize,
    active: bool,
}

/// Regenerates the preview pages from the data file and the page templates.
pub async fn run_preview(config: &Config) -> Result<PreviewReport, CommandError> {
    let catalog = Catalog::load(&config.data.data_file).await?;
    info!(
        "Loaded {} records from {:?}",
        catalog.len(),
        config.data.data_file
    );

    let output = &config.preview.output_directory;
    tokio::fs::create_dir_all(output).await?;

    let mut report = PreviewReport {
        copied: copy_assets(&config.preview.source_directory, output).await?,
        ..PreviewReport::default()
    };

    let mut globals = build_globals(&catalog, config);

    // Asset links carry `?v=<mtime>` so the server can mark them immutable.
    let assets = StaticFileHandler::new(output.clone());
    assets.refresh_file_versions().await;
    for (key, asset) in [("style_url", "style.css"), ("script_url", "script.js")] {
        let url = assets.get_versioned_url(asset).await;
        globals.insert(key.into(), liquid::model::Value::scalar(url));
    }

    let engine = TemplateEngine::new(config.preview.template_directory.clone());

    for page in PAGES {
        let template = format!("{}.html.liquid", page);
        if !engine.has_template(&template).await {
            warn!("Template not found: {:?}", engine.template_dir().join(&template));
            report.skipped.push(page.to_string());
            continue;
        }

        let mut page_globals = globals.clone();
        page_globals.insert("page".into(), liquid::model::Value::scalar(page));
        let html = engine.render_template(&template, page_globals).await?;

        let target = output.join(format!("{}.html", page));
        tokio::fs::write(&target, html).await?;
        debug!("Wrote {:?}", target);
        report.rendered.push(page.to_string());
    }

    info!(
        "Generated preview pages in {:?}: {}",
        output,
        report.rendered.join(", ")
    );
    Ok(report)
}

async fn copy_assets(source: &Path, output: &Path) -> Result<Vec<PathBuf>, CommandError> {
    let mut copied = Vec::new();

    for asset in ASSETS {
        let from = source.join(asset);
        if !tokio::fs::try_exists(&from).await.unwrap_or(false) {
            debug!("Asset not present, skipping: {:?}", from);
            continue;
        }

        let to = output.join(asset);
        if let Some(parent) = to.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::copy(&from, &to).await?;
        copied.push(PathBuf::from(asset));
    }

    Ok(copied)
}

/// Portfolio containers, one per category; the first group is active.
fn containers(groups: &[CategoryGroup]) -> Vec<GalleryContainer> {
    groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let elements = group
                .images
                .iter()
                .map(|record| ImageElement::new(ImageAttributes::from_record(record)))
                .collect();
            GalleryContainer::for_category(group.name.clone(), elements).marked_active(i == 0)
        })
        .collect()
}

fn build_globals(catalog: &Catalog, config: &Config) -> liquid::Object {
    let site = &config.site;
    let groups = catalog.grouped(site.preferred_category.as_deref());
    let page = PortfolioPage::from_containers(containers(&groups), site, &config.lightbox);

    let featured: Vec<PreviewImage> = catalog
        .featured(FEATURED_LIMIT)
        .into_iter()
        .map(PreviewImage::from)
        .collect();
    let showcase: Vec<PreviewImage> = catalog
        .featured(SHOWCASE_LIMIT)
        .into_iter()
        .map(PreviewImage::from)
        .collect();

    let about_portrait = catalog.first_in_category(&site.portrait_category);
    let portrait = about_portrait.or_else(|| catalog.records().first());
    let portrait_alt = |record: &ImageRecord| {
        if record.title.is_empty() {
            format!("Portrait of {}", site.name)
        } else {
            record.title.clone()
        }
    };

    let fallback_post_image = featured
        .first()
        .map(|i| i.url.clone())
        .or_else(|| catalog.records().first().map(|r| r.url.clone()))
        .unwrap_or_default();

    let active = page.active_category().map(str::to_string);
    let categories: Vec<PreviewCategory> = groups
        .iter()
        .map(|group| PreviewCategory {
            name: group.name.clone(),
            display_name: group.display_name.clone(),
            count: group.images.len(),
            active: active.as_deref() == Some(group.name.as_str()),
        })
        .collect();

    liquid::object!({
        "site": {
            "name": site.name.clone(),
            "default_alt": site.default_alt.clone(),
        },
        "lang": Language::default().as_str(),
        "lang_storage_key": STORAGE_KEY,
        "featured": featured,
        "showcase": showcase,
        "has_portrait": portrait.is_some(),
        "portrait_url": portrait.map(|r| r.url.clone()).unwrap_or_default(),
        "portrait_alt": portrait.map(portrait_alt).unwrap_or_default(),
        "has_about_portrait": about_portrait.is_some(),
        "about_portrait_url": about_portrait.map(|r| r.url.clone()).unwrap_or_default(),
        "about_portrait_alt": about_portrait.map(portrait_alt).unwrap_or_default(),
        "fallback_post_image": fallback_post_image,
        "categories": categories,
        "active_category": active.unwrap_or_default(),
        "category_buttons": page.buttons_html(),
        "gallery_sections": page.sections_html(),
        "image_count": catalog.len() as i64,
        "lightbox_fade_ms": config.lightbox.fade_delay_ms as i64,
        "lightbox_swipe_px": config.lightbox.swipe_threshold_px as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn record(public_id: &str, category: &str, featured: bool) -> ImageRecord {
        ImageRecord {
            url: format!("https://res.example.com/{}.jpg", public_id),
            public_id: public_id.to_string(),
            title: public_id.rsplit('/').next().unwrap().to_string(),
            caption: String::new(),
            category: category.to_string(),
            featured,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            record("images/wildlife/fox", "wildlife", false),
            record("images/astro/orion", "astro", true),
            record("images/Of_the_photographer/me", "Of_the_photographer", false),
            record("images/astro/pleiades", "astro", false),
        ])
    }

    #[test]
    fn test_globals_select_featured_and_portrait() {
        let globals = build_globals(&catalog(), &Config::default());
        let value = liquid::model::Value::Object(globals);
        let json = serde_json::to_value(&value).unwrap();

        assert_eq!(json["featured"].as_array().unwrap().len(), 1);
        assert_eq!(
            json["featured"][0]["link"],
            "portfolio.html?image=https%3A%2F%2Fres.example.com%2Fimages%2Fastro%2Forion.jpg"
        );
        assert_eq!(
            json["about_portrait_url"],
            "https://res.example.com/images/Of_the_photographer/me.jpg"
        );
        assert_eq!(json["active_category"], "astro");
        assert_eq!(json["categories"][0]["name"], "astro");
        assert_eq!(json["categories"][0]["count"], 2);
        assert_eq!(
            json["fallback_post_image"],
            "https://res.example.com/images/astro/orion.jpg"
        );

        let sections = json["gallery_sections"].as_str().unwrap();
        assert!(sections.contains(r#"<div class="gallery-category" data-category="astro">"#));
        assert!(sections.contains(
            r#"<div class="gallery-category" data-category="wildlife" style="display:none;">"#
        ));
    }

    #[test]
    fn test_globals_without_portrait_category() {
        let catalog = Catalog::new(vec![record("images/wildlife/fox", "wildlife", false)]);
        let globals = build_globals(&catalog, &Config::default());
        let json = serde_json::to_value(liquid::model::Value::Object(globals)).unwrap();

        assert_eq!(json["has_about_portrait"], false);
        assert_eq!(json["has_portrait"], true);
        assert_eq!(json["portrait_alt"], "fox");
        assert_eq!(json["featured"].as_array().unwrap().len(), 1);
        assert_eq!(json["active_category"], "wildlife");
    }

    #[tokio::test]
    async fn test_missing_data_file_fails() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.data.data_file = dir.path().join("_data/images.yml");
        config.preview.output_directory = dir.path().join("preview");

        let error = run_preview(&config).await.unwrap_err();
        assert_eq!(error.exit_code(), 1);
        assert!(!config.preview.output_directory.exists());
    }

    #[tokio::test]
    async fn test_missing_templates_are_skipped() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.data.data_file = dir.path().join("_data/images.yml");
        config.preview.source_directory = dir.path().to_path_buf();
        config.preview.template_directory = dir.path().join("templates");
        config.preview.output_directory = dir.path().join("preview");

        catalog().save(&config.data.data_file).await.unwrap();
        fs::create_dir_all(dir.path().join("templates")).unwrap();
        fs::write(
            dir.path().join("templates/blog.html.liquid"),
            "<p>{{ page }} for {{ site.name }}</p>",
        )
        .unwrap();
        fs::write(dir.path().join("style.css"), "body {}").unwrap();

        let report = run_preview(&config).await.unwrap();
        assert_eq!(report.rendered, vec!["blog"]);
        assert_eq!(report.skipped.len(), 4);
        assert_eq!(report.copied, vec![PathBuf::from("style.css")]);

        let blog = fs::read_to_string(dir.path().join("preview/blog.html")).unwrap();
        assert_eq!(blog, "<p>blog for Portfolio</p>");
        assert!(dir.path().join("preview/style.css").exists());
    }
}
