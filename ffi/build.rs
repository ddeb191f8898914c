use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");
    println!("cargo:rerun-if-env-changed=CRUD_FFI_HEADER_DIR");

    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => return,
    };

    let bindings = match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("CRUD_FFI_H")
        .generate()
    {
        Ok(bindings) => bindings,
        Err(e) => {
            println!("cargo:warning=cbindgen skipped: {e}");
            return;
        }
    };
    bindings.write_to_file(out_dir.join("crud_ffi.h"));

    // Relative paths resolve against the ffi crate directory.
    if let Ok(dir) = env::var("CRUD_FFI_HEADER_DIR") {
        let dir = PathBuf::from(&crate_dir).join(dir);
        if let Err(e) = std::fs::create_dir_all(&dir) {
            println!("cargo:warning=cannot create {}: {e}", dir.display());
            return;
        }
        let path = dir.join("crud_ffi.h");
        bindings.write_to_file(&path);
        println!("cargo:warning=wrote {}", path.display());
    }
}
