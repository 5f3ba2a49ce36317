use std::path::Path;

use openmc_bench_runner::prelude::*;

/// 100 concentric spherical shells of near-vacuum hydrogen around a 1 MeV point source, so the
/// run time is dominated by distance-to-boundary calculations.
fn model() -> ModelDir {
    ModelDir::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("model"))
}

fn main() -> BenchResult<()> {
    let builder = BenchmarkDefinitionBuilder::new_with_init("NestedSpheres").with_model(model());

    run(builder)?;

    Ok(())
}
