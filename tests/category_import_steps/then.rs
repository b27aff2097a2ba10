//! Then steps for category import BDD scenarios.

use super::world::{ImportWorld, run_async};
use rstest_bdd_macros::then;
use taskdeck::category::services::ImportError;

#[then("{count:u64} categories are reported as inserted")]
fn inserted_count(world: &ImportWorld, count: u64) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing import result in scenario world"))?;
    let summary = result
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected import failure: {err}"))?;

    let inserted = u64::try_from(summary.inserted())?;
    eyre::ensure!(
        inserted == count,
        "expected {count} inserted categories, found {inserted}"
    );
    Ok(())
}

#[then(r#"the catalogue contains "{name}" with code "{code}" marked active"#)]
fn catalogue_contains_active(
    world: &ImportWorld,
    name: String,
    code: String,
) -> Result<(), eyre::Report> {
    let categories = run_async(world.catalog.list())
        .map_err(|err| eyre::eyre!("listing failed: {err}"))?;
    let category = categories
        .iter()
        .find(|item| item.name().as_str() == name)
        .ok_or_else(|| eyre::eyre!("category {name} was not stored"))?;

    eyre::ensure!(
        category.code() == Some(code.as_str()),
        "expected code {code}, found {:?}",
        category.code()
    );
    eyre::ensure!(category.is_active(), "expected {name} to be active");
    Ok(())
}

#[then("the catalogue holds {count:u64} categories")]
fn catalogue_size(world: &ImportWorld, count: u64) -> Result<(), eyre::Report> {
    let categories = run_async(world.catalog.list())
        .map_err(|err| eyre::eyre!("listing failed: {err}"))?;
    let stored = u64::try_from(categories.len())?;
    eyre::ensure!(
        stored == count,
        "expected {count} stored categories, found {stored}"
    );
    Ok(())
}

#[then("the import fails because the upload is empty")]
fn fails_with_empty_upload(world: &ImportWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing import result in scenario world"))?;
    eyre::ensure!(
        matches!(result, Err(ImportError::EmptyUpload)),
        "expected an empty upload error, got {result:?}"
    );
    Ok(())
}

#[then("the import fails because the document is malformed")]
fn fails_with_malformed_document(world: &ImportWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing import result in scenario world"))?;
    eyre::ensure!(
        matches!(result, Err(ImportError::MalformedDocument(_))),
        "expected a malformed document error, got {result:?}"
    );
    Ok(())
}
