//! Example: export a model description to GraphIR
//!
//! Loads a JSON model description, exports it to a GraphIR protobuf file and
//! optionally writes the JSON rendering next to it.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --example export_model -- model.json model.graphir --json model.graphir.json
//! ```

use std::env;

use graphir_export::io::save_graph_with_stats;
use graphir_export::prelude::*;
use tracing_subscriber::EnvFilter;

fn option_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

fn main() -> ExportResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <model.json> <output.graphir> [options]", args[0]);
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --json <path>      Also write the JSON rendering");
        eprintln!("  --config <path>    Read export options from a JSON file");
        eprintln!("  --model-name <s>   Model name written to the header");
        eprintln!("  --truncate         Cut payloads over 100 characters (debug dumps)");
        eprintln!("  --node-dictionary  Embed each node's attribute dictionary");
        eprintln!("  --dump             Log the JSON rendering at debug level");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];

    let mut options = match option_value(&args, "--config") {
        Some(path) => ExportOptions::from_json(&std::fs::read_to_string(path)?)?,
        None => ExportOptions::default(),
    };
    if let Some(name) = option_value(&args, "--model-name") {
        options = options.with_model_name(name);
    }
    if args.iter().any(|a| a == "--truncate") {
        options = options.with_payload_policy(PayloadPolicy::reference());
    }
    if args.iter().any(|a| a == "--node-dictionary") {
        options = options.with_node_dictionary(true);
    }
    if args.iter().any(|a| a == "--dump") {
        options = options.with_json_dump(true);
    }

    let source = load_source_model(input_path)?;
    println!(
        "Loaded {}: {} functions, {} variables",
        input_path,
        source.function_count(),
        source.variable_count()
    );

    let (graph, stats) = export_model(&source, &options)?;
    let saved = save_graph_with_stats(&graph, output_path)?;

    if let Some(json_path) = option_value(&args, "--json") {
        save_graph_json(&graph, json_path)?;
        println!("JSON rendering saved to {}", json_path);
    }

    println!();
    println!("Export Results:");
    println!("  Nodes:              {}", stats.nodes);
    println!("  Input edges:        {}", stats.input_edges);
    println!("  Output edges:       {}", stats.output_edges);
    println!("  Payloads:           {}", stats.payloads);
    println!("  Truncated payloads: {}", stats.payloads_truncated);
    println!("  Size:               {} bytes", saved.size_bytes);
    println!();
    println!("Saved to {}", output_path);

    if graph_ir_to_model(&graph, &source).is_none() {
        println!("Round-trip import is not available");
    }

    Ok(())
}
