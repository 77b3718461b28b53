use super::*;
use tempfile::TempDir;

fn record(public_id: &str, category: &str, featured: bool) -> ImageRecord {
    ImageRecord {
        url: format!("https://res.example.com/{}.jpg", public_id),
        public_id: public_id.to_string(),
        title: public_id.rsplit('/').next().unwrap_or(public_id).to_string(),
        caption: String::new(),
        category: category.to_string(),
        featured,
    }
}

#[test]
fn test_deduplicated_keeps_first_record_per_public_id() {
    let mut duplicate = record("images/astro/_1", "astro", false);
    duplicate.title = "Second copy".to_string();

    let catalog = Catalog::deduplicated(vec![
        record("images/astro/_1", "astro", false),
        record("images/astro/_2", "astro", false),
        duplicate,
    ]);

    assert_eq!(catalog.len(), 2);
    let first = &catalog.records()[0];
    assert_eq!(first.public_id, "images/astro/_1");
    assert_eq!(first.title, "_1");
}

#[test]
fn test_categories_put_preferred_first() {
    let catalog = Catalog::new(vec![
        record("images/landscapes/_1", "landscapes", false),
        record("images/astro/_1", "astro", false),
        record("images/wildlife/_1", "wildlife", false),
        record("images/landscapes/_2", "landscapes", false),
    ]);

    assert_eq!(
        catalog.categories(Some("astro")),
        vec!["astro", "landscapes", "wildlife"]
    );
    assert_eq!(
        catalog.categories(Some("missing")),
        vec!["landscapes", "astro", "wildlife"]
    );
    assert_eq!(
        catalog.categories(None),
        vec!["landscapes", "astro", "wildlife"]
    );
}

#[test]
fn test_grouped_collects_uncategorized_records() {
    let catalog = Catalog::new(vec![
        record("loose", "", false),
        record("images/astro/_1", "astro", false),
    ]);

    let groups = catalog.grouped(Some("astro"));
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name, "astro");
    assert_eq!(groups[1].name, UNCATEGORIZED);
    assert_eq!(groups[1].display_name, "Uncategorized");
    assert_eq!(groups[1].images.len(), 1);
}

#[test]
fn test_featured_falls_back_to_first_records() {
    let plain = Catalog::new(vec![
        record("a", "astro", false),
        record("b", "astro", false),
        record("c", "astro", false),
        record("d", "astro", false),
    ]);
    let ids: Vec<_> = plain.featured(3).iter().map(|r| r.public_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);

    let tagged = Catalog::new(vec![
        record("a", "astro", false),
        record("b", "astro", true),
        record("c", "astro", false),
    ]);
    let ids: Vec<_> = tagged.featured(3).iter().map(|r| r.public_id.as_str()).collect();
    assert_eq!(ids, vec!["b"]);
}

#[test]
fn test_nice_category_name() {
    assert_eq!(nice_category_name("Of_the_photographer"), "Of The Photographer");
    assert_eq!(nice_category_name("wild__life-birds"), "Wild Life Birds");
    assert_eq!(nice_category_name("astro"), "Astro");
    assert_eq!(nice_category_name(""), "");
}

#[tokio::test]
async fn test_save_and_load_data_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("_data").join("images.yml");

    let catalog = Catalog::new(vec![
        record("images/astro/_1", "astro", true),
        record("images/landscapes/_2", "landscapes", false),
    ]);
    catalog.save(&path).await.unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("public_id: images/astro/_1"));
    assert!(written.contains("featured: true"));

    let loaded = Catalog::load(&path).await.unwrap();
    assert_eq!(loaded.records(), catalog.records());
}

#[tokio::test]
async fn test_load_missing_data_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = Catalog::load(&temp_dir.path().join("images.yml")).await;
    assert!(matches!(result, Err(CatalogError::DataFileMissing(_))));
}

#[tokio::test]
async fn test_load_empty_data_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("images.yml");
    std::fs::write(&path, "").unwrap();

    let catalog = Catalog::load(&path).await.unwrap();
    assert!(catalog.is_empty());
}
