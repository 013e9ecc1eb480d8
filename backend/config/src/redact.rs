//! Secret masking for config display.

/// Mask a secret for display, keeping only the last four characters as a hint.
///
/// `sk-test123456` becomes `***3456`; secrets of four characters or fewer
/// become `***`.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count > 4 {
        let tail: String = secret.chars().skip(count - 4).collect();
        format!("***{tail}")
    } else {
        "***".to_string()
    }
}
