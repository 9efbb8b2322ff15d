/// Sanitize filename to remove invalid characters
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if c.is_control() => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("test/file.mp4"), "test_file.mp4");
        assert_eq!(sanitize_filename("normal-name.mp4"), "normal-name.mp4");
        assert_eq!(sanitize_filename(" a:b\n.mp4 "), "a_b_.mp4");
    }
}
