// Build script to ensure all FFI exports are included in the DLL on Windows
use std::env;
use std::fs;
use std::path::PathBuf;

const EXPORTS: &[&str] = &[
    "hatchery_version",
    "hatchery_free_string",
    "hatchery_last_error",
    "hatchery_generate_creature",
    "hatchery_generate_encounter",
    "hatchery_generate_item",
    "hatchery_breed",
    "hatchery_session_hash",
    "hatchery_rarity_census",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Only configure exports on Windows
    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows") {
        return;
    }
    let target = env::var("TARGET").unwrap_or_default();

    if target.contains("gnu") {
        // GNU linker: Export all symbols marked with #[no_mangle]
        println!("cargo:rustc-cdylib-link-arg=-Wl,--export-all-symbols");
    } else if target.contains("msvc") {
        // MSVC linker: generate a .def file listing the bridge
        let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap_or_else(|_| ".".into()));
        let def_path = out_dir.join("hatchery_core.def");
        let mut def = String::from("LIBRARY hatchery_core\nEXPORTS\n");
        for name in EXPORTS {
            def.push_str("    ");
            def.push_str(name);
            def.push('\n');
        }
        if fs::write(&def_path, def).is_ok() {
            println!("cargo:rustc-cdylib-link-arg=/DEF:{}", def_path.display());
        }
    }
}
