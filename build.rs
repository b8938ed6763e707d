//! This build script copies the `memory.x` file from the crate root into a directory where
//! the linker can always find it at build time.

use std::{env, fs::File, io::Write, path::PathBuf};

fn main() -> std::io::Result<()> {
    // Put memory layout in the output directory and ensure it's on the linker search path.
    let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    File::create(out.join("memory.x"))?.write_all(include_bytes!("memory.x"))?;
    println!("cargo:rustc-link-search={}", out.display());

    // Build time is the clock's starting point until a phone sets it
    File::create(out.join("utc.rs"))?.write_fmt(format_args!(
        "const UTC_EPOCH: i64 = {:?};",
        chrono::Utc::now().timestamp()
    ))?;

    Ok(())
}
