use std::path::Path;

use openmc_bench_runner::prelude::*;

/// Ten reflected slabs of burnt fuel, each carrying 251 nuclides, to stress cross-section lookups.
fn model() -> ModelDir {
    ModelDir::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("model"))
}

fn main() -> BenchResult<()> {
    let builder =
        BenchmarkDefinitionBuilder::new_with_init("CrossSectionLookups").with_model(model());

    run(builder)?;

    Ok(())
}
