//! When steps for category import BDD scenarios.

use super::world::{ImportWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the upload is imported")]
fn import_upload(world: &mut ImportWorld) -> Result<(), eyre::Report> {
    let document = world.document().wrap_err("render upload workbook")?;
    world.last_result = Some(run_async(world.import.import_stream(document.as_slice())));
    Ok(())
}
