//! Attaches JSDoc blocks to the declaration that immediately follows them.

/// Looks backward from `decl_start` (a byte offset into `source`) for a `/** ... */`
/// block comment with nothing but whitespace between it and the declaration. Returns
/// the comment body with the `/**`/`*/` fence and leading `*` gutters stripped.
pub(crate) fn preceding_doc_comment(source: &str, decl_start: usize) -> Option<String> {
    let before = source.get(..decl_start)?;
    let trimmed_end = before.trim_end();
    if !trimmed_end.ends_with("*/") {
        return None;
    }
    let comment_end = trimmed_end.len();
    let comment_start = trimmed_end.rfind("/**")?;
    let raw = &trimmed_end[comment_start + 3..comment_end - 2];

    let body: Vec<&str> = raw
        .lines()
        .map(|line| {
            let line = line.trim_start();
            line.strip_prefix('*').unwrap_or(line).trim_start()
        })
        .collect();

    let joined = body.join("\n").trim().to_string();
    if joined.is_empty() { None } else { Some(joined) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attaches_simple_doc_block() {
        let source = "/**\n * Describes a thing.\n */\nexport interface Thing {}";
        let decl_start = source.find("export interface").unwrap();
        let doc = preceding_doc_comment(source, decl_start).unwrap();
        assert_eq!(doc, "Describes a thing.");
    }

    #[test]
    fn ignores_comment_separated_by_code() {
        let source = "/** doc */\nconst x = 1;\nexport interface Thing {}";
        let decl_start = source.find("export interface").unwrap();
        assert!(preceding_doc_comment(source, decl_start).is_none());
    }

    #[test]
    fn returns_none_without_a_comment() {
        let source = "export interface Thing {}";
        assert!(preceding_doc_comment(source, 0).is_none());
    }
}
