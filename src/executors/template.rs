// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 llmflow contributors

//! Literal placeholder substitution
//!
//! Templates are plain strings. There is no templating language: every
//! occurrence of the token is replaced, nothing else is interpreted.

/// Token replaced by the running value in `prompt` templates
pub const QUERY_TOKEN: &str = "{{query}}";

/// Token replaced by the running value in `summarizer` templates
pub const TEXT_TOKEN: &str = "{{text}}";

/// Replace every literal `token` in `template` with `value`
pub fn render(template: &str, token: &str, value: &str) -> String {
    template.replace(token, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_query() {
        assert_eq!(render("Q: {{query}}", QUERY_TOKEN, "hello"), "Q: hello");
    }

    #[test]
    fn test_render_every_occurrence() {
        assert_eq!(
            render("{{text}} / {{text}}", TEXT_TOKEN, "x"),
            "x / x"
        );
    }

    #[test]
    fn test_other_tokens_untouched() {
        assert_eq!(
            render("{{ query }} {{text}}", QUERY_TOKEN, "v"),
            "{{ query }} {{text}}"
        );
    }

    #[test]
    fn test_value_is_not_rescanned() {
        assert_eq!(render("[{{query}}]", QUERY_TOKEN, "{{query}}"), "[{{query}}]");
    }

    #[test]
    fn test_empty_template() {
        assert_eq!(render("", QUERY_TOKEN, "ignored"), "");
    }
}
