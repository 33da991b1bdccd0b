// Build script: libobs API version, plus the linker path when building the OBS module

use std::env;
use std::fs;
use std::path::Path;

const DEFAULT_API_MAJOR: u32 = 30;
const DEFAULT_API_MINOR: u32 = 0;

fn main() {
    println!("cargo:rerun-if-env-changed=LIBOBS_LIB_DIR");
    println!("cargo:rerun-if-env-changed=LIBOBS_API_MAJOR");
    println!("cargo:rerun-if-env-changed=LIBOBS_API_MINOR");

    write_api_version();

    // Only the `obs` feature links against libobs / obs-frontend-api
    if env::var_os("CARGO_FEATURE_OBS").is_some() {
        link_libobs();
    }
}

fn api_component(var: &str, default: u32, max: u32) -> u32 {
    match env::var(var) {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(n) if n <= max => n,
            _ => panic!("{} must be an integer between 0 and {}, got {:?}", var, max, value),
        },
        Err(_) => default,
    }
}

fn write_api_version() {
    let major = api_component("LIBOBS_API_MAJOR", DEFAULT_API_MAJOR, 0xff);
    let minor = api_component("LIBOBS_API_MINOR", DEFAULT_API_MINOR, 0xff);

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let contents = format!(
        "pub const LIBOBS_API_MAJOR_VER: u32 = {};\n\
         pub const LIBOBS_API_MINOR_VER: u32 = {};\n\
         pub const LIBOBS_API_PATCH_VER: u32 = 0;\n",
        major, minor
    );
    fs::write(Path::new(&out_dir).join("libobs_api.rs"), contents)
        .expect("failed to write libobs_api.rs");
}

fn link_libobs() {
    match env::var("LIBOBS_LIB_DIR") {
        Ok(dir) => println!("cargo:rustc-link-search=native={}", dir),
        Err(_) => {
            // Fall back to the usual install locations
            let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
            if target_os == "linux" {
                println!("cargo:rustc-link-search=native=/usr/lib/x86_64-linux-gnu");
                println!("cargo:rustc-link-search=native=/usr/lib");
            }
        }
    }
}
