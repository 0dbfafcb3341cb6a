use std::fs;

use gem_placeholders::{
    batch::{self, BatchOptions},
    rendering::FontBook,
    Job, JobSet, PlaceholderConfig, RenderError, Renderer,
};
use image::GenericImageView;

fn run_into(cfg: &PlaceholderConfig, root: &std::path::Path, set: Option<JobSet>) -> Result<Vec<gem_placeholders::RenderedAsset>, RenderError> {
    let renderer = Renderer::with_fonts(cfg, FontBook::builtin());
    let opts = BatchOptions { root: Some(root.to_path_buf()), set, ..Default::default() };
    batch::run(cfg, &renderer, &opts)
}

#[test]
fn default_manifest_writes_every_file() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = PlaceholderConfig::default();
    let assets = run_into(&cfg, tmp.path(), None).unwrap();
    assert_eq!(assets.len(), cfg.jobs.len());
    for job in &cfg.jobs {
        let path = tmp.path().join(job.file());
        let img = image::open(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        assert_eq!(img.dimensions(), job.size(), "{}", path.display());
    }
    assert!(tmp.path().join("diamonds/emerald/emerald-top.png").is_file());
    assert!(tmp.path().join("placeholders/icon.png").is_file());
    assert!(tmp.path().join("thumbnails/earrings").is_dir());
    assert!(tmp.path().join("thumbnails/bracelets").is_dir());

    // directories already exist on the second pass
    let again = run_into(&cfg, tmp.path(), Some(JobSet::Simple)).unwrap();
    assert_eq!(again.len(), 4);
}

#[test]
fn manifest_lists_generated_assets() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = PlaceholderConfig::default();
    let assets = run_into(&cfg, &tmp.path().join("img"), Some(JobSet::Detailed)).unwrap();
    let manifest = tmp.path().join("out/manifest.json");
    batch::write_manifest(&manifest, &assets).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&manifest).unwrap()).unwrap();
    assert_eq!(v["version"], 1);
    let listed = v["assets"].as_array().unwrap();
    assert_eq!(listed.len(), 12);
    assert_eq!(listed[0]["kind"], "ring");
    assert_eq!(listed[5]["kind"], "diamond:round");
    assert_eq!(listed[5]["width"], 800);
}

#[test]
fn unknown_cut_aborts_before_writing_anything() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = PlaceholderConfig::default();
    cfg.jobs = vec![
        Job::Card { file: "cards/first.png".into(), text: "First".into(), size: (64, 64) },
        Job::Diamond { file: "cuts/pear.png".into(), cut: "pear".into(), size: (200, 200) },
    ];
    let err = run_into(&cfg, tmp.path(), None).unwrap_err();
    assert!(matches!(err, RenderError::UnsupportedCut(ref c) if c == "pear"));
    assert!(!tmp.path().join("cards").exists());
}

#[test]
fn first_render_failure_stops_the_run() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = PlaceholderConfig::default();
    let card = |file: &str| Job::Card { file: file.into(), text: "x".into(), size: (32, 32) };
    cfg.jobs = vec![card("a.png"), card("b.gif.txt"), card("c.png")];
    let err = run_into(&cfg, tmp.path(), None).unwrap_err();
    assert!(matches!(err, RenderError::UnsupportedFormat(_)));
    assert!(tmp.path().join("a.png").is_file());
    assert!(!tmp.path().join("c.png").exists());
}

#[test]
fn dry_run_touches_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = PlaceholderConfig::default();
    let renderer = Renderer::with_fonts(&cfg, FontBook::builtin());
    let opts = BatchOptions { root: Some(tmp.path().join("root")), dry_run: true, ..Default::default() };
    let assets = batch::run(&cfg, &renderer, &opts).unwrap();
    assert!(assets.is_empty());
    assert!(!tmp.path().join("root").exists());
}

#[test]
fn aliased_filter_renders_its_chart() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = PlaceholderConfig::default();
    let renderer = Renderer::with_fonts(&cfg, FontBook::builtin());
    let opts = BatchOptions { root: Some(tmp.path().to_path_buf()), only: Some("Clarity-Grades".into()), ..Default::default() };
    let assets = batch::run(&cfg, &renderer, &opts).unwrap();
    assert_eq!(assets.len(), 1);
    assert!(tmp.path().join("diamonds/clarity/clarity-grades.jpg").is_file());
    assert!(!tmp.path().join("thumbnails").exists());
}
