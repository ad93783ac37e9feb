use std::env;
use std::fs;
use std::path::Path;

/// Place the workspace `config.toml` next to the backend binary, where
/// `load_config` looks for it.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap();

    // OUT_DIR is target/<profile>/build/backend-<hash>/out
    let Some(bin_dir) = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
    else {
        println!("cargo:warning=no {} directory above {}", profile, out_dir);
        return;
    };

    let config = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    if !config.exists() {
        println!("cargo:warning=no config.toml in the workspace root, the embedded default applies");
        return;
    }
    let dest = bin_dir.join("config.toml");
    if let Err(e) = fs::copy(&config, &dest) {
        panic!("copying config.toml to {}: {}", dest.display(), e);
    }
}
