use vergen_gix::{BuildBuilder, Emitter, GixBuilder, RustcBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let build = BuildBuilder::default().build_timestamp(true).build()?;
    let gix = GixBuilder::default().sha(true).branch(true).build()?;
    let rustc = RustcBuilder::default().semver(true).build()?;

    // Builds outside a git checkout fall back to defaults; keep output quiet.
    Emitter::default()
        .quiet()
        .add_instructions(&build)?
        .add_instructions(&gix)?
        .add_instructions(&rustc)?
        .emit()?;

    Ok(())
}
