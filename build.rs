use std::collections::HashSet;
use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/nonb_motifs.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the motif catalog before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or unescaped backslashes.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    let motifs = catalog.get("motifs").unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing 'motifs' field\n\
             The catalog must have a top-level 'motifs' array.\n"
        );
    });

    let motifs = motifs.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: 'motifs' must be an array\n\
             Got: {motifs}\n"
        );
    });

    assert!(
        !motifs.is_empty(),
        "\n\nCATALOG BUILD ERROR: 'motifs' array is empty\n"
    );

    validate_motifs(motifs);

    println!(
        "cargo:warning=Validated motif catalog: {} motifs",
        motifs.len()
    );
}

fn validate_motifs(motifs: &[serde_json::Value]) {
    let mut seen = HashSet::new();

    for (i, motif) in motifs.iter().enumerate() {
        let name = motif
            .get("name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_else(|| {
                panic!("\n\nCATALOG BUILD ERROR: Motif at index {i} missing 'name' field\n")
            });

        assert!(
            !name.trim().is_empty(),
            "\n\nCATALOG BUILD ERROR: Motif at index {i} has an empty name\n"
        );

        let pattern = motif
            .get("pattern")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_else(|| {
                panic!(
                    "\n\nCATALOG BUILD ERROR: Motif '{name}' (index {i}) missing 'pattern' field\n"
                )
            });

        assert!(
            !pattern.is_empty(),
            "\n\nCATALOG BUILD ERROR: Motif '{name}' (index {i}) has an empty pattern\n"
        );

        assert!(
            seen.insert(name.to_string()),
            "\n\nCATALOG BUILD ERROR: Duplicate motif name '{name}' (index {i})\n\
             Motif names must be unique.\n"
        );
    }
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/nonb_motifs.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
