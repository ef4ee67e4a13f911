//! Axis, title and legend text derived from column names.

/// First character uppercased, the rest lowercased (`"Shots_Made"` →
/// `"Shots_made"`).
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Underscores become spaces, then [`capitalize`] (`"Shots_Made"` →
/// `"Shots made"`).
pub fn format_label(name: &str) -> String {
    capitalize(&name.replace('_', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_lowers_the_tail() {
        assert_eq!(capitalize("Shots_Made"), "Shots_made");
        assert_eq!(capitalize("location_x"), "Location_x");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("é"), "É");
    }

    #[test]
    fn format_label_replaces_underscores() {
        assert_eq!(format_label("Shots_Attempted"), "Shots attempted");
        assert_eq!(format_label("game"), "Game");
        assert_eq!(format_label("_x"), " x");
    }
}
