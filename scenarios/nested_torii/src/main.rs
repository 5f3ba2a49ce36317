use std::path::Path;

use openmc_bench_runner::prelude::*;

/// 100 nested torus shells of near-vacuum hydrogen inside a vacuum-bounded sphere, with the 1 MeV
/// point source at the centre of the innermost tube.
fn model() -> ModelDir {
    ModelDir::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("model"))
}

fn main() -> BenchResult<()> {
    let builder = BenchmarkDefinitionBuilder::new_with_init("NestedTorii").with_model(model());

    run(builder)?;

    Ok(())
}
