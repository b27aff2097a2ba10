//! Given steps for category import BDD scenarios.

use super::world::{ImportWorld, Upload, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskdeck::category::services::CreateCategoryRequest;

#[given("an empty category catalogue")]
fn empty_catalogue(world: &mut ImportWorld) {
    world.upload = Upload::Rows(Vec::new());
}

#[given(r#"a stored category "{name}""#)]
fn stored_category(world: &mut ImportWorld, name: String) -> Result<(), eyre::Report> {
    run_async(world.catalog.create(CreateCategoryRequest::new(name)))
        .wrap_err("store category before import")?;
    Ok(())
}

#[given(r#"an upload row "{name}" with code "{code}" and active flag "{active}""#)]
fn upload_row(world: &mut ImportWorld, name: String, code: String, active: String) {
    world.push_row(&name, &code, &active);
}

#[given(r#"an upload row "{name}" with code "{code}" and no active flag"#)]
fn upload_row_without_flag(world: &mut ImportWorld, name: String, code: String) {
    world.push_row(&name, &code, "");
}

#[given(r#"an upload row without a name and code "{code}""#)]
fn upload_row_without_name(world: &mut ImportWorld, code: String) {
    world.push_row("", &code, "true");
}

#[given("an empty upload")]
fn empty_upload(world: &mut ImportWorld) {
    world.upload = Upload::Raw(Vec::new());
}

#[given("an upload containing plain text")]
fn plain_text_upload(world: &mut ImportWorld) {
    world.upload = Upload::Raw(b"Name,Code,Active\nDrinks,D1,true\n".to_vec());
}
