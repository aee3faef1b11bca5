//! Turns the WHATWG `entities.json` into a sorted Rust table.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::{env, fs};

use anyhow::{Context, bail};
use serde::Deserialize;

const ENTITIES_JSON: &str = "data/entities.json";

/// The WHATWG entity count; a shorter file means a truncated download.
const EXPECTED_ENTITIES: usize = 2231;

#[derive(Deserialize)]
struct CharacterEntity {
    codepoints: Vec<u32>,
    characters: String,
}

pub fn generate() -> anyhow::Result<()> {
    let json = fs::read_to_string(ENTITIES_JSON)
        .with_context(|| format!("reading {ENTITIES_JSON}"))?;
    let entities: BTreeMap<String, CharacterEntity> =
        serde_json::from_str(&json).with_context(|| format!("parsing {ENTITIES_JSON}"))?;

    if entities.len() != EXPECTED_ENTITIES {
        bail!(
            "{ENTITIES_JSON} has {} entities, expected {EXPECTED_ENTITIES}",
            entities.len()
        );
    }

    // BTreeMap iteration is byte-ordered, which the prefix search relies on.
    let mut source = String::from("&[\n");
    for (name, entity) in &entities {
        let Some(name) = name.strip_prefix('&') else {
            bail!("entity {name:?} does not start with '&'");
        };
        let decoded: Option<String> = entity.codepoints.iter().copied().map(char::from_u32).collect();
        if decoded.as_deref() != Some(entity.characters.as_str()) {
            bail!("entity {name:?} has codepoints that disagree with its characters");
        }
        writeln!(source, "    ({name:?}, {:?}),", entity.characters)?;
    }
    source.push_str("]\n");

    let out_dir = PathBuf::from(env::var("OUT_DIR").context("OUT_DIR is not set")?);
    fs::write(out_dir.join("named_entities.rs"), source).context("writing named_entities.rs")?;
    Ok(())
}
