//! Instruction text sent alongside each image.

use imgextract_core::FieldList;

/// Human-readable label for well-known columns; anything else is used verbatim.
fn describe(field: &str) -> String {
    match field {
        "email" => "Email (email address)".to_string(),
        "firstname" => "First name".to_string(),
        "name" => "Name (full name)".to_string(),
        other => other.to_string(),
    }
}

/// Build the extraction instruction for `fields`.
///
/// The model is asked for a bare JSON array whose objects carry exactly the
/// requested keys (`filename` is filled locally and never requested).
pub fn build_prompt(fields: &FieldList) -> String {
    let requested: Vec<&str> = fields.requested().collect();

    let mut prompt = String::from(
        "This image contains a table. Please extract the following information \
         from all rows in the table (excluding the header row):\n",
    );
    for (i, field) in requested.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, describe(field)));
    }

    prompt.push_str("\nReturn in the following JSON array format (JSON only, no explanation):\n[\n  {\n");
    let lines: Vec<String> = requested
        .iter()
        .map(|f| format!("    \"{f}\": \"extracted {f} 1\""))
        .collect();
    prompt.push_str(&lines.join(",\n"));
    prompt.push_str("\n  }\n]\n\n");
    prompt.push_str("Extract all rows. If no data is found, return an empty array.");
    prompt
}
