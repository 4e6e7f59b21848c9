#[cfg(feature = "openfhe")]
use std::{env, path::PathBuf};

/// Link against OpenMP runtime (required when OpenFHE is built with OpenMP)
#[cfg(feature = "openfhe")]
fn link_openmp() {
    #[cfg(target_os = "macos")]
    {
        let omp_paths = ["/opt/homebrew/opt/libomp/lib", "/usr/local/opt/libomp/lib"];

        for path in &omp_paths {
            if PathBuf::from(path).join("libomp.dylib").exists() {
                println!("cargo::rustc-link-search=native={path}");
                println!("cargo::rustc-link-lib=omp");
                return;
            }
        }

        eprintln!("cargo::warning=libomp not found; OpenFHE may have been built without OpenMP");
    }

    #[cfg(target_os = "linux")]
    println!("cargo::rustc-link-lib=gomp");
}

#[cfg(feature = "openfhe")]
fn main() {
    println!("cargo::rerun-if-env-changed=OPENFHE_INSTALL_DIR");
    let install = env::var("OPENFHE_INSTALL_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/usr/local"));

    let include = install.join("include/openfhe");
    let lib = install.join("lib");

    if !include.join("pke/openfhe.h").exists() {
        panic!(
            "OpenFHE headers not found under {include:?}. Install OpenFHE or set OPENFHE_INSTALL_DIR."
        );
    }

    cxx_build::bridge("src/lib.rs")
        .file("src/wrapper.cc")
        .include(&include)
        .include(include.join("core"))
        .include(include.join("pke"))
        .include(include.join("binfhe"))
        .include(include.join("third-party/include"))
        .flag_if_supported("-std=c++17")
        .flag_if_supported("-O2")
        .flag_if_supported("-Wno-unused-parameter")
        .flag_if_supported("-Wno-sign-compare")
        .compile("lattice_openfhe_sys");

    println!("cargo::rustc-link-search=native={}", lib.display());
    println!("cargo::rustc-link-lib=OPENFHEpke");
    println!("cargo::rustc-link-lib=OPENFHEcore");

    #[cfg(target_os = "macos")]
    println!("cargo::rustc-link-lib=c++");
    #[cfg(target_os = "linux")]
    println!("cargo::rustc-link-lib=stdc++");

    link_openmp();

    println!("cargo::rerun-if-changed=src/lib.rs");
    println!("cargo::rerun-if-changed=src/wrapper.h");
    println!("cargo::rerun-if-changed=src/wrapper.cc");
    println!("cargo::rerun-if-changed=build.rs");
}

// Without the feature there is nothing to compile or link.
#[cfg(not(feature = "openfhe"))]
fn main() {
    println!("cargo::rerun-if-changed=build.rs");
}
