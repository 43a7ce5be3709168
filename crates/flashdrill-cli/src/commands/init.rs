//! The `flashdrill init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("flashdrill.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("data")?;
    write_if_missing(
        Path::new("data/greek_vocabulary_edited.csv"),
        SAMPLE_VOCABULARY,
    )?;
    write_if_missing(Path::new("data/greek_verb_form_edited.csv"), SAMPLE_VERBS)?;

    println!("\nNext steps:");
    println!("  1. Replace the sample CSVs in data/ with your own decks");
    println!("  2. Run: flashdrill validate --file data/greek_verb_form_edited.csv --mode verb");
    println!("  3. Run: flashdrill train --source vocabulary");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# flashdrill configuration

data_dir = "data"
vocabulary_file = "greek_vocabulary_edited.csv"
verb_file = "greek_verb_form_edited.csv"
results_dir = "."

[defaults]
extreme = true
shuffle = true
limit = 0
record_mistakes = false
auto_review = true
font_size = 60
"#;

const SAMPLE_VOCABULARY: &str = "\
\"house,home\",noun,το σπίτι
water,noun,το νερό
\"to write,to spell\",verb,γράφω
\"good,fine\",adjective,καλός
tomorrow,adverb,αύριο
";

const SAMPLE_VERBS: &str = "\
write,γράφω,γράφεις,γράφει,γράφουμε,γράφετε,γράφουν
be,είμαι,είσαι,είναι,είμαστε,είστε,είναι
rain,—,—,βρέχει,—,—,—
";
