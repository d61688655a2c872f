//! Prompt construction and completion cleanup.

/// Instruction used by HTML refinement when the caller supplies none.
pub const DEFAULT_FIX_INSTRUCTION: &str =
    "Fix grammar, make the tone professional, and ensure HTML structure is clean.";

/// Prompt asking for a professional rephrasing in the same language.
pub fn rephrase_prompt(text: &str) -> String {
    format!(
        "Please rephrase the following text to be more professional and clear while \
         maintaining the original meaning. Keep the same language (Chinese or English). \
         Only return the rephrased text without any explanations:\n\n{text}"
    )
}

/// Prompt asking for refined HTML that keeps the document structure intact.
pub fn fix_html_prompt(html: &str, instruction: &str) -> String {
    format!(
        "You are an expert HTML and Content Editor.\n\
         Your task is to refine the following HTML content based on this instruction: \"{instruction}\"\n\
         \n\
         Rules:\n\
         1. Correct any grammar or spelling errors in the text content.\n\
         2. Improve the professional tone of the text.\n\
         3. DO NOT remove existing CSS classes (like 'title', 'content-block', 'page').\n\
         4. DO NOT remove structural divs (like 'page', 'page-content').\n\
         5. Return ONLY the raw HTML code inside the <body> tag. Do not return Markdown formatting (no ```html).\n\
         \n\
         Input HTML:\n\
         {html}\n"
    )
}

/// Remove markdown code fences a model may wrap HTML in, then trim.
///
/// ```
/// use folio_gemini::strip_code_fences;
///
/// assert_eq!(strip_code_fences("```html\n<p>Hi</p>\n```"), "<p>Hi</p>");
/// ```
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```html", "").replace("```", "").trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rephrase_prompt_ends_with_text() {
        let prompt = rephrase_prompt("我喜歡寫程式");
        assert!(prompt.starts_with("Please rephrase the following text"));
        assert!(prompt.contains("Keep the same language (Chinese or English)."));
        assert!(prompt.ends_with(":\n\n我喜歡寫程式"));
    }

    #[test]
    fn test_fix_html_prompt_preserves_structure_rules() {
        let prompt = fix_html_prompt(r#"<div class="page">x</div>"#, DEFAULT_FIX_INSTRUCTION);
        assert!(prompt.contains(&format!("instruction: \"{DEFAULT_FIX_INSTRUCTION}\"")));
        assert!(prompt.contains("'title', 'content-block', 'page'"));
        assert!(prompt.contains("'page', 'page-content'"));
        assert!(prompt.contains("Input HTML:\n<div class=\"page\">x</div>"));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("  <p>a</p>  "), "<p>a</p>");
        assert_eq!(strip_code_fences("```\n<p>a</p>\n```\n"), "<p>a</p>");
        assert_eq!(
            strip_code_fences("Here:\n```html\n<p>a</p>```"),
            "Here:\n\n<p>a</p>"
        );
    }
}
