use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    // Put the linker script somewhere the linker can find it
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());

    let linker = if cfg!(feature = "stm32g081") {
        include_bytes!("memory_g081.x").as_ref()
    } else {
        include_bytes!("memory_g071.x").as_ref()
    };

    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(linker)
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    println!("cargo:rerun-if-changed=memory_g071.x");
    println!("cargo:rerun-if-changed=memory_g081.x");
    println!("cargo:rerun-if-changed=build.rs");
}
