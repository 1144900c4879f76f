// Adversarial input: the parser must terminate and degrade to literal
// text, never error out.

use pretty_assertions::assert_eq;
use reddit_markdown::parse_markdown;

#[test]
fn whitespace_only_inputs() {
    assert_eq!(parse_markdown(""), "");
    assert_eq!(parse_markdown("\n\n\n"), "");
    assert_eq!(parse_markdown("   "), "");
    assert_eq!(parse_markdown("\t"), "");
}

#[test]
fn unterminated_constructs_degrade() {
    assert_eq!(parse_markdown("**open"), "<p>**open</p>");
    assert_eq!(parse_markdown("~~open"), "<p>~~open</p>");
    assert_eq!(parse_markdown(">!open"), "<p>&gt;!open</p>");
    assert_eq!(parse_markdown("`open"), "<p>`open</p>");
    assert_eq!(parse_markdown("^(open"), "<p>^(open</p>");
}

#[test]
fn unclosed_fence_is_literal() {
    assert_eq!(parse_markdown("```\ncode"), "<p>```\ncode</p>");
}

#[test]
fn marker_soup_terminates() {
    for input in ["[[[[[[", "((((((", "))))))", "!![![![", "^^^^^", "~*_~*_"] {
        let html = parse_markdown(input);
        assert!(!html.is_empty(), "input: {input:?}");
    }
}

#[test]
fn pipe_runs_terminate() {
    let _ = parse_markdown("||||||||");
    let _ = parse_markdown("|a|\n|a|");
}

#[test]
fn deep_quote_nesting() {
    let input = format!("{}x", "> ".repeat(100));
    let html = parse_markdown(&input);
    assert!(html.contains("<p>x</p>"));
    assert_eq!(html.matches("<blockquote>").count(), 100);
}

#[test]
fn long_input_terminates() {
    let input = "word *a* `b` ".repeat(2_000);
    let html = parse_markdown(&input);
    assert!(html.starts_with("<p>word <em>a</em> <code>b</code>"));
}

#[test]
fn lone_markers_inside_text() {
    assert_eq!(parse_markdown("a * b"), "<p>a * b</p>");
    assert_eq!(parse_markdown("5 > 3"), "<p>5 &gt; 3</p>");
}
