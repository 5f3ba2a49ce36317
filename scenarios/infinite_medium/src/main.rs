use std::path::Path;

use openmc_bench_runner::prelude::*;

/// A sphere of 4.5% enriched UO2, large enough to behave like an infinite medium, run in
/// eigenvalue mode.
fn model() -> ModelDir {
    ModelDir::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("model"))
}

fn main() -> BenchResult<()> {
    let builder =
        BenchmarkDefinitionBuilder::new_with_init("InfiniteMediumEigenvalue").with_model(model());

    run(builder)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_exports_openmc_inputs() {
        let dir = tempfile::tempdir().unwrap();

        model().export_to_dir(dir.path()).unwrap();

        for file in ["materials.xml", "geometry.xml", "settings.xml"] {
            assert!(dir.path().join(file).is_file(), "{file} not exported");
        }
        let settings = std::fs::read_to_string(dir.path().join("settings.xml")).unwrap();
        assert!(settings.contains("<run_mode>eigenvalue</run_mode>"));
    }
}
