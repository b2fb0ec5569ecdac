use std::borrow::Cow;

/// Language tag for a file path: the lowercase extension without its dot,
/// or the bare file name when there is no usable extension.
///
/// An extension is usable if it is non-empty, at most 10 characters long
/// and belongs to the last path component.
pub fn language_tag(path: &str) -> Cow<'_, str> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.len() <= 10 => {
            if ext.bytes().any(|b| b.is_ascii_uppercase()) {
                Cow::Owned(ext.to_ascii_lowercase())
            } else {
                Cow::Borrowed(ext)
            }
        }
        _ => Cow::Borrowed(file_name),
    }
}

/// Leading-whitespace width of a line, tabs counted as one level each
pub fn indent_depth(line: &str) -> u32 {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_extension() {
        assert_eq!(language_tag("main.rs"), "rs");
        assert_eq!(language_tag("meta/main.js"), "js");
        assert_eq!(language_tag("style.css"), "css");
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(language_tag("Makefile"), "Makefile");
        assert_eq!(language_tag("docs/LICENSE"), "LICENSE");
    }

    #[test]
    fn test_dot_in_directory_only() {
        assert_eq!(language_tag("v1.2/README"), "README");
    }

    #[test]
    fn test_case_normalization() {
        assert_eq!(language_tag("IMAGE.SVG"), "svg");
        assert_eq!(language_tag("Script.JS"), "js");
    }

    #[test]
    fn test_long_extension_rejected() {
        assert_eq!(language_tag("file.verylongextension"), "file.verylongextension");
    }

    #[test]
    fn test_indent_depth() {
        assert_eq!(indent_depth("fn main() {"), 0);
        assert_eq!(indent_depth("    let x = 1;"), 4);
        assert_eq!(indent_depth("\t\treturn;"), 2);
        assert_eq!(indent_depth(""), 0);
    }
}
