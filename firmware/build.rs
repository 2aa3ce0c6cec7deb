//! Build script for the firmware.
//!
//! Puts `memory.x` on the linker search path and checks that the CYW43439
//! radio blobs are present before `include_bytes!` tries to read them.

use std::env;
use std::fs;
use std::path::PathBuf;

/// Radio firmware and country locale matrix, loaded at startup.
const RADIO_BLOBS: [&str; 2] = ["43439A0.bin", "43439A0_clm.bin"];

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set by cargo"));
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set by cargo"));

    fs::copy(manifest_dir.join("memory.x"), out_dir.join("memory.x"))
        .expect("Failed to copy memory.x");
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");

    let blob_dir = manifest_dir.join("cyw43-firmware");
    for blob in RADIO_BLOBS {
        let path = blob_dir.join(blob);
        println!("cargo:rerun-if-changed={}", path.display());
        if !path.exists() {
            panic!(
                "Missing {}: copy it from the cyw43-firmware directory of the embassy repository",
                path.display()
            );
        }
    }

    // Settings are baked in with option_env!, so rebuild when they change
    for key in [
        "WIFI_SSID",
        "WIFI_PASSWORD",
        "PC_IP",
        "PORT",
        "LISTEN_PORT",
        "DEVICE_ID",
        "HAPTIC_EFFECT",
        "HAPTIC_ON_PRESS",
        "EVENT_PAYLOAD",
        "STATUS_LED",
    ] {
        println!("cargo:rerun-if-env-changed={key}");
    }

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
