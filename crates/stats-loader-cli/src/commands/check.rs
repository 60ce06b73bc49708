//! Check command implementation.
//!
//! Validates settings and reports each profile's manifest status without
//! rendering anything.

use stats_loader::{Engine, LoaderFactories, Status};
use stats_loader_config::{ConfigValidator, FsValidator, SchemaValidator, Settings};

use crate::cli::{CheckArgs, GlobalArgs};
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load settings (`--config`, discovery, or defaults)
/// 2. Validate option values of every profile
/// 3. Check stats files exist (unless `--schema-only`)
/// 4. Check loader classes are known
/// 5. Report manifest status per profile (unless `--schema-only`)
///
/// # Errors
///
/// Returns the first validation failure.
pub fn execute(global: &GlobalArgs, args: CheckArgs) -> Result<()> {
    ui::info("Checking settings...");
    let settings = utils::load_settings(global)?;

    if args.show {
        print!("{}", settings.to_toml()?);
    }

    SchemaValidator.validate_all(&settings)?;
    ui::success("Option values are valid");

    let factories = LoaderFactories::default();
    for name in settings.profile_names() {
        let loader_class = &settings.profile(name)?.loader_class;
        if !factories.contains(loader_class) {
            ui::warning(&format!(
                "Profile {name} uses loader `{loader_class}`, which only an embedding \
                 application can register"
            ));
        }
    }

    if args.schema_only {
        ui::success("All checks passed!");
        return Ok(());
    }

    let root = utils::project_root()?;
    FsValidator::new(&root).validate_all(&settings)?;
    ui::success("Stats files exist");

    report_manifests(settings, &factories);

    ui::success("All checks passed!");
    Ok(())
}

/// Print the build status each profile's manifest reports. A failed or
/// in-progress build is a warning, not a check failure.
fn report_manifests(settings: Settings, factories: &LoaderFactories) {
    let names: Vec<String> = settings.profile_names().map(str::to_string).collect();
    let engine = Engine::new(settings);

    for name in names {
        let Ok(options) = engine.settings().profile(&name) else {
            continue;
        };
        if !factories.contains(&options.loader_class)
            || options.stats_file.to_string_lossy().contains("{locale}")
        {
            continue;
        }

        match engine.get_assets(&name) {
            Ok(manifest) => {
                let message = format!(
                    "{name}: build {} ({} bundles)",
                    ui::status_label(&manifest.status),
                    manifest.chunks.len()
                );
                match manifest.status {
                    Status::Done => ui::success(&message),
                    Status::Error => {
                        ui::warning(&message);
                        ui::warning(&manifest.build_error().to_string());
                    }
                    _ => ui::warning(&message),
                }
            }
            Err(err) => ui::error(&format!("{name}: {err}")),
        }
    }
}
