//! Build script for marten-html.
//!
//! Generates the named character reference table from `data/entities.json`.

mod named_entities;

fn main() -> anyhow::Result<()> {
    println!("cargo:rerun-if-changed=build");
    println!("cargo:rerun-if-changed=data/entities.json");
    named_entities::generate()
}
