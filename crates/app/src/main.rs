use std::fs;

use anyhow::Context as _;
use bookverse_application::AppContext;
use bookverse_catalog::Catalog;
use bookverse_core::Page;
use bookverse_storage::Storage;
use bookverse_ui::Ui;
use directories::ProjectDirs;

mod logging;

/// Overrides the saved start page for one launch, e.g. `BOOKVERSE_START_PAGE=groups`.
const START_PAGE_ENV: &str = "BOOKVERSE_START_PAGE";

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let project_dirs =
        ProjectDirs::from("dev", "bookverse", "bookverse").context("resolve project dirs")?;

    let _log_guard = logging::init_logging(&project_dirs.data_dir().join("logs"))?;

    let config_dir = project_dirs.config_dir();
    fs::create_dir_all(config_dir)
        .with_context(|| format!("create config dir {}", config_dir.display()))?;

    let db_path = config_dir.join("bookverse.db");
    let storage = Storage::open(&db_path)?;
    let settings = storage.load_settings()?;
    tracing::info!(db = %db_path.display(), "settings loaded");

    let mut ctx = AppContext::new(settings, Catalog::sample());
    if let Ok(tag) = std::env::var(START_PAGE_ENV) {
        let page = Page::from_tag(&tag);
        tracing::info!(%tag, page = page.as_str(), "start page override");
        ctx = ctx.with_start_page(page);
    }

    let ctx = Ui::new(ctx).run()?;
    storage.save_settings(&ctx.settings)?;
    tracing::info!("settings saved, exiting");

    Ok(())
}
