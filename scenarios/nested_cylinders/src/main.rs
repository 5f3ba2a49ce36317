use std::path::Path;

use openmc_bench_runner::prelude::*;

/// 100 concentric cylindrical shells of near-vacuum hydrogen, capped at z = ±50 cm, around a 1 MeV
/// point source.
fn model() -> ModelDir {
    ModelDir::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("model"))
}

fn main() -> BenchResult<()> {
    let builder = BenchmarkDefinitionBuilder::new_with_init("NestedCylinders").with_model(model());

    run(builder)?;

    Ok(())
}
