//! Shared utility functions.

/// File extensions treated as inventory, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Maximum length of a Discord message body.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// Returns true if the file name ends in `.` plus one of
/// [`IMAGE_EXTENSIONS`]. A bare `.png` counts.
pub fn has_image_extension(file_name: &str) -> bool {
    suffix_after_dot(file_name).is_some_and(|ext| {
        IMAGE_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed))
    })
}

/// Returns true if the file name ends in `.zip`, compared case-insensitively.
pub fn has_zip_extension(file_name: &str) -> bool {
    suffix_after_dot(file_name).is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

fn suffix_after_dot(file_name: &str) -> Option<&str> {
    file_name.rsplit_once('.').map(|(_, ext)| ext)
}

/// Truncates a string to a maximum length in characters, with ellipsis.
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_length.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
