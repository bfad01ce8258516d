use anyhow::Result;
use gpui_labelled_progress::progress::LabelledProgressStyle;

/// Print the JSON schema of the progress style file.
///
/// ```sh
/// cargo run -p generate-style-schema > progress-style.schema.json
/// ```
fn main() -> Result<()> {
    let schema = schemars::schema_for!(LabelledProgressStyle);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
