//! Build script for graphir-export
//!
//! Generates Rust code from the GraphIR protobuf definition using prost-build.

use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_path = PathBuf::from("proto/graph_ir.proto");

    // Verify proto file exists
    if !proto_path.exists() {
        return Err(format!(
            "GraphIR proto file not found at: {}\n\
             Please ensure proto/graph_ir.proto exists.",
            proto_path.display()
        )
        .into());
    }

    // Get output directory from cargo
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    // Configure prost-build
    let mut config = prost_build::Config::new();

    // BTreeMap keeps ext_attrs and init_attrs in key order
    config.btree_map(["."]);

    // JSON rendering of every message
    config.type_attribute(
        ".",
        "#[derive(serde::Serialize, serde::Deserialize)] #[serde(default)]",
    );

    // Set output directory
    config.out_dir(&out_dir);

    // Compile GraphIR proto
    config.compile_protos(&[&proto_path], &["proto/"])?;

    // Tell cargo to rerun if proto files change
    println!("cargo:rerun-if-changed=proto/graph_ir.proto");
    println!("cargo:rerun-if-changed=build.rs");

    Ok(())
}
