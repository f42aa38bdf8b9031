// Compiles the evolution rule table into the binary.
//
// The RON source is parsed with the shared `schema` types and re-encoded with
// postcard, so a malformed rule file fails the build instead of the first
// lookup at runtime.

use schema::RuleTableData;
use std::env;
use std::fs;
use std::path::Path;

const RULES_SOURCE: &str = "data/evolution_rules.ron";

fn main() {
    println!("cargo:rerun-if-changed={}", RULES_SOURCE);

    let source = fs::read_to_string(RULES_SOURCE)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", RULES_SOURCE, e));
    let table: RuleTableData = ron::from_str(&source)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", RULES_SOURCE, e));
    let bytes = table
        .to_compiled()
        .unwrap_or_else(|e| panic!("Failed to encode rule table: {}", e));

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest = Path::new(&out_dir).join("evolution_rules.bin");
    fs::write(&dest, bytes).unwrap_or_else(|e| panic!("Failed to write {}: {}", dest.display(), e));
}
