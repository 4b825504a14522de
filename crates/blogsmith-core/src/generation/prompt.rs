//! Prompt construction for the generation pipeline.
//!
//! All three steps share the same system prompt and HTML allow-list; only
//! the user instruction differs.

/// System prompt shared by all three generation calls.
pub const GENERATOR_SYSTEM_PROMPT: &str = "You are a blog post generator";

/// HTML tags the generated output is allowed to use.
pub const ALLOWED_HTML_TAGS: &str = "p,h1,h2,h3,h4,h5,h6,strong,li,ul,ol,i";

/// User prompt for the body generation call.
pub fn body_prompt(topic: &str, keywords: &str) -> String {
    format!(
        "Write a long and detailed SEO-friendly blog post about: {topic}, \
         that targets the following comma-separated keywords: {keywords}. \
         The content should be formatted in SEO-friendly HTML, \
         only use the following HTML tags: {ALLOWED_HTML_TAGS}"
    )
}

/// User prompt for the title generation call. The generated body precedes
/// this as an assistant message.
pub fn title_prompt() -> String {
    format!(
        "Generate appropriate title tag text for the above blog post, \
         only use the following HTML tags: {ALLOWED_HTML_TAGS}"
    )
}

/// User prompt for the meta-description generation call. The generated body
/// precedes this as an assistant message.
pub fn meta_description_prompt() -> String {
    format!(
        "Generate SEO-friendly meta description content for the above blog post, \
         only use the following HTML tags: {ALLOWED_HTML_TAGS}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_prompt_embeds_inputs() {
        let prompt = body_prompt("Cats", "pets,animals");
        assert!(prompt.contains("Cats"));
        assert!(prompt.contains("pets,animals"));
        assert!(prompt.contains(ALLOWED_HTML_TAGS));
    }

    #[test]
    fn test_title_prompt_restricts_tags() {
        assert!(title_prompt().contains(ALLOWED_HTML_TAGS));
        assert!(title_prompt().contains("title tag text"));
    }

    #[test]
    fn test_meta_prompt_restricts_tags() {
        assert!(meta_description_prompt().contains(ALLOWED_HTML_TAGS));
        assert!(meta_description_prompt().contains("meta description"));
    }

    #[test]
    fn test_allow_list_is_stable() {
        for tag in ["p", "h1", "h6", "strong", "li", "ul", "ol", "i"] {
            assert!(
                ALLOWED_HTML_TAGS.split(',').any(|t| t == tag),
                "missing tag {tag}"
            );
        }
    }
}
