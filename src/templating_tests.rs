use super::*;
use std::fs;
use tempfile::TempDir;

fn setup_test_templates() -> (TempDir, TemplateEngine) {
    let temp_dir = TempDir::new().unwrap();
    let template_path = temp_dir.path();

    let header_content = r#"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
    <title>{% if page_title %}{{ page_title }} - {% endif %}{{ site.name }}</title>
</head>
<body>"#;
    fs::write(template_path.join(HEADER_TEMPLATE), header_content).unwrap();

    let footer_content = r#"</body>
</html>"#;
    fs::write(template_path.join(FOOTER_TEMPLATE), footer_content).unwrap();

    let index_content = r#"{{ header }}
<section class="featured">
{% for img in featured %}  <a href="{{ img.link }}">{{ img.title }}</a>
{% endfor %}</section>
{{ footer }}"#;
    fs::write(template_path.join("index.html.liquid"), index_content).unwrap();

    let broken_content = "{{ header }}{% for img in featured %}";
    fs::write(template_path.join("broken.html.liquid"), broken_content).unwrap();

    let engine = TemplateEngine::new(template_path.to_path_buf());
    (temp_dir, engine)
}

fn globals() -> liquid::Object {
    liquid::object!({
        "lang": "nb",
        "page_title": "Home",
        "site": { "name": "Test Portfolio" },
        "featured": [
            { "title": "Orion", "link": "portfolio.html?image=a.jpg" },
            { "title": "Fox", "link": "portfolio.html?image=b.jpg" },
        ],
    })
}

#[tokio::test]
async fn test_render_with_partials() {
    let (_temp_dir, engine) = setup_test_templates();

    let html = engine
        .render_template("index.html.liquid", globals())
        .await
        .unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<html lang="nb">"#));
    assert!(html.contains("<title>Home - Test Portfolio</title>"));
    assert!(html.contains(r#"<a href="portfolio.html?image=b.jpg">Fox</a>"#));
    assert!(html.trim_end().ends_with("</html>"));
}

#[tokio::test]
async fn test_missing_lightbox_partial_renders_empty() {
    let (temp_dir, engine) = setup_test_templates();
    fs::write(
        temp_dir.path().join("portfolio.html.liquid"),
        "[{{ lightbox }}]",
    )
    .unwrap();

    let html = engine
        .render_template("portfolio.html.liquid", globals())
        .await
        .unwrap();
    assert_eq!(html, "[]");
}

#[tokio::test]
async fn test_missing_template() {
    let (_temp_dir, engine) = setup_test_templates();

    assert!(!engine.has_template("about.html.liquid").await);
    let result = engine
        .render_template("about.html.liquid", globals())
        .await;
    assert!(matches!(result, Err(TemplateError::NotFound(_))));
}

#[tokio::test]
async fn test_parse_error() {
    let (_temp_dir, engine) = setup_test_templates();

    let result = engine.render_template("broken.html.liquid", globals()).await;
    assert!(matches!(result, Err(TemplateError::ParseFailed { .. })));
}

#[tokio::test]
async fn test_cache_reloads_modified_template() {
    let (temp_dir, engine) = setup_test_templates();
    let path = temp_dir.path().join("blog.html.liquid");

    fs::write(&path, "first").unwrap();
    assert_eq!(engine.load_template("blog.html.liquid").await.unwrap(), "first");

    fs::write(&path, "second").unwrap();
    let later = SystemTime::now() + std::time::Duration::from_secs(5);
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(later)
        .unwrap();

    assert_eq!(engine.load_template("blog.html.liquid").await.unwrap(), "second");
}
