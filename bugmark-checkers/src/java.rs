//! Line-level helpers for approximate Java source inspection.
//!
//! None of this is a parser. String literals and block comments are not
//! recognized; the sample checks only need to see through `//` comments
//! and count braces.

/// The code part of a line, dropping a trailing `//` comment.
pub fn strip_line_comment(line: &str) -> &str {
    match line.find("//") {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Brace depth at the start of each line.
pub fn brace_depths(lines: &[String]) -> Vec<usize> {
    let mut depths = Vec::with_capacity(lines.len());
    let mut depth: usize = 0;
    for line in lines {
        depths.push(depth);
        for ch in strip_line_comment(line).chars() {
            match ch {
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
    }
    depths
}

/// 1-based column of byte offset `byte_pos` in `line`.
pub fn column_of(line: &str, byte_pos: usize) -> usize {
    line[..byte_pos].chars().count() + 1
}

/// Split a parameter list on commas that are not inside `<...>`.
pub fn split_params(params: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (pos, ch) in params.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(params[start..pos].trim());
                start = pos + 1;
            }
            _ => {}
        }
    }
    let last = params[start..].trim();
    if !last.is_empty() || !parts.is_empty() {
        parts.push(last);
    }
    parts
}

/// The type of a single parameter declaration such as `final List<A> as`.
pub fn param_type(param: &str) -> String {
    let tokens: Vec<&str> = param
        .split_whitespace()
        .filter(|t| *t != "final" && !t.starts_with('@'))
        .collect();
    match tokens.split_last() {
        Some((_, ty)) if !ty.is_empty() => ty.join(" "),
        Some((only, _)) => (*only).to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_comment() {
        assert_eq!(strip_line_comment("int x; // 1 << 40"), "int x; ");
        assert_eq!(strip_line_comment("int x;"), "int x;");
    }

    #[test]
    fn test_brace_depths() {
        let lines: Vec<String> = vec!["class A {", "  void f() {", "  }", "  // {", "}"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(brace_depths(&lines), vec![0, 1, 2, 1, 1]);
    }

    #[test]
    fn test_split_params_respects_generics() {
        assert_eq!(
            split_params("Map<K, V> m, int n"),
            vec!["Map<K, V> m", "int n"]
        );
        assert!(split_params("").is_empty());
        assert!(split_params("  ").is_empty());
    }

    #[test]
    fn test_param_type() {
        assert_eq!(param_type("A a"), "A");
        assert_eq!(param_type("final @Nullable List<A> as"), "List<A>");
        assert_eq!(param_type("String... args"), "String...");
    }

    #[test]
    fn test_column_of() {
        assert_eq!(column_of("  B c(D d)", 4), 5);
    }
}
