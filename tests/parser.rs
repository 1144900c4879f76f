// Core grammar tests: every block and inline construct, plus the
// degradation behavior of malformed input.

use pretty_assertions::assert_eq;
use reddit_markdown::parse_markdown;

fn assert_html(markdown: &str, expected: &str) {
    assert_eq!(parse_markdown(markdown), expected, "input: {markdown:?}");
}

#[test]
fn paragraphs() {
    assert_html("hello", "<p>hello</p>");
    assert_html("one\n\ntwo", "<p>one</p>\n\n<p>two</p>");
    assert_html("one\n\n\n\ntwo", "<p>one</p>\n\n<p>two</p>");
}

#[test]
fn soft_wrap_joins_lines() {
    assert_html("one\ntwo", "<p>one two</p>");
}

#[test]
fn hard_break() {
    assert_html("a  \nb", "<p>a<br/>\nb</p>");
}

#[test]
fn headings() {
    assert_html("# Title", "<h1>Title</h1>");
    assert_html("### three", "<h3>three</h3>");
    assert_html("#no space", "<h1>no space</h1>");
    assert_html("####### seven", "<h6>seven</h6>");
    assert_html("# T\ntext", "<h1>T</h1>\n\n<p>text</p>");
}

#[test]
fn horizontal_line() {
    assert_html("---", "<hr/>");
    assert_html("***\ntext", "<hr/>\n\n<p>text</p>");
    assert_html("___", "<hr/>");
}

#[test]
fn styled_text() {
    assert_html("**bold**", "<p><strong>bold</strong></p>");
    assert_html("__bold__", "<p><strong>bold</strong></p>");
    assert_html("*em*", "<p><em>em</em></p>");
    assert_html("_em_", "<p><em>em</em></p>");
    assert_html("~~gone~~", "<p><del>gone</del></p>");
    assert_html(
        ">!secret!<",
        "<p><span class=\"md-spoiler-text\">secret</span></p>",
    );
    assert_html(
        "**bold** and *em*",
        "<p><strong>bold</strong> and <em>em</em></p>",
    );
}

#[test]
fn underscore_does_not_close_mid_word() {
    assert_html("snake_case_name", "<p>snake_case_name</p>");
}

#[test]
fn unterminated_style_is_literal() {
    assert_html("**open", "<p>**open</p>");
}

#[test]
fn backslash_escapes() {
    assert_html(r"\*literal\*", "<p>*literal*</p>");
    assert_html(r"a \\ b", "<p>a \\ b</p>");
}

#[test]
fn superscript() {
    assert_html("x^2", "<p>x<sup>2</sup></p>");
    assert_html("^(two words)", "<p><sup>two words</sup></p>");
}

#[test]
fn inline_code() {
    assert_html("`code`", "<p><code>code</code></p>");
    assert_html("`a*b*`", "<p><code>a*b*</code></p>");
    assert_html("`` `tick` ``", "<p><code>`tick`</code></p>");
    assert_html("`open", "<p>`open</p>");
}

#[test]
fn html_is_escaped() {
    assert_html("<b>&</b>", "<p>&lt;b&gt;&amp;&lt;/b&gt;</p>");
    assert_html("\"hi\"", "<p>&quot;hi&quot;</p>");
}

#[test]
fn entities_pass_through() {
    assert_html("AT&amp;T", "<p>AT&amp;T</p>");
    assert_html("&#38; &#x26;", "<p>&#38; &#x26;</p>");
}

#[test]
fn bare_url_link() {
    assert_html(
        "see https://example.com now",
        "<p>see <a href=\"https://example.com\">https://example.com</a> now</p>",
    );
}

#[test]
fn manual_link() {
    assert_html(
        "[text](https://example.com)",
        "<p><a href=\"https://example.com\">text</a></p>",
    );
    assert_html(
        "[a](/b \"t\")",
        "<p><a href=\"/b\" title=\"t\">a</a></p>",
    );
    assert_html(
        "[**b**](/x)",
        "<p><a href=\"/x\"><strong>b</strong></a></p>",
    );
}

#[test]
fn link_needs_word_boundary() {
    assert_html("word/r/foo", "<p>word/r/foo</p>");
}

#[test]
fn link_in_heading() {
    assert_html("# [a](/b)", "<h1><a href=\"/b\">a</a></h1>");
}

#[test]
fn quote() {
    assert_html("> quoted", "<blockquote>\n<p>quoted</p>\n</blockquote>");
    assert_html("> a\n> b", "<blockquote>\n<p>a b</p>\n</blockquote>");
    assert_html(
        "> a\n> \n> b",
        "<blockquote>\n<p>a</p>\n\n<p>b</p>\n</blockquote>",
    );
    assert_html(
        "> > deep",
        "<blockquote>\n<blockquote>\n<p>deep</p>\n</blockquote>\n</blockquote>",
    );
}

#[test]
fn unordered_list() {
    assert_html("- a\n- b", "<ul>\n<li>a</li>\n<li>b</li>\n</ul>");
    assert_html("* a\n* b", "<ul>\n<li>a</li>\n<li>b</li>\n</ul>");
}

#[test]
fn ordered_list() {
    assert_html("1. x\n2. y", "<ol>\n<li>x</li>\n<li>y</li>\n</ol>");
    // Ordered lists must start at 1.
    assert_html("3. x", "<p>3. x</p>");
}

#[test]
fn list_then_paragraph() {
    assert_html(
        "- a\n\ntext",
        "<ul>\n<li>a</li>\n</ul>\n\n<p>text</p>",
    );
}

#[test]
fn list_entry_continuation() {
    assert_html("- a\n  b", "<ul>\n<li>a b</li>\n</ul>");
}

#[test]
fn nested_list() {
    assert_html(
        "- a\n  - b\n  - c",
        "<ul>\n<li>a\n\n<ul>\n<li>b</li>\n<li>c</li>\n</ul></li>\n</ul>",
    );
}

#[test]
fn list_entry_with_blocks() {
    // An indented blank line upgrades the entry from inline text to
    // full blocks.
    assert_html(
        "- a\n  \n  b",
        "<ul>\n<li><p>a</p>\n\n<p>b</p></li>\n</ul>",
    );
}

#[test]
fn fenced_code() {
    assert_html("```\ncode\n```", "<pre><code>code\n</code></pre>");
    assert_html(
        "```\na\nb\n```",
        "<pre><code>a\nb\n</code></pre>",
    );
}

#[test]
fn indented_code() {
    assert_html("    code", "<pre><code>code\n</code></pre>");
    assert_html("    a\n    b", "<pre><code>a\nb\n</code></pre>");
}

#[test]
fn code_keeps_markup_literal() {
    assert_html(
        "```\n**not bold**\n```",
        "<pre><code>**not bold**\n</code></pre>",
    );
}

#[test]
fn table() {
    assert_html(
        "|a|b|\n|-|-|\n|c|d|",
        "<table><thead>\n<tr>\n<th>a</th>\n<th>b</th>\n</tr>\n</thead><tbody>\n<tr>\n<td>c</td>\n<td>d</td>\n</tr>\n</tbody></table>",
    );
}

#[test]
fn table_alignment() {
    assert_html(
        "|a|b|\n|:-|-:|\n|c|d|",
        "<table><thead>\n<tr>\n<th align=\"left\">a</th>\n<th align=\"right\">b</th>\n</tr>\n</thead><tbody>\n<tr>\n<td align=\"left\">c</td>\n<td align=\"right\">d</td>\n</tr>\n</tbody></table>",
    );
}

#[test]
fn table_short_row_gets_colspan() {
    assert_html(
        "|a|b|c|\n|-|-|-|\n|x|",
        "<table><thead>\n<tr>\n<th>a</th>\n<th>b</th>\n<th>c</th>\n</tr>\n</thead><tbody>\n<tr>\n<td>x</td>\n<td colspan=\"2\"></td>\n</tr>\n</tbody></table>",
    );
}

#[test]
fn image_from_allowed_domain() {
    assert_html(
        "![alt](https://i.redd.it/x.png)",
        "<p><img src=\"https://i.redd.it/x.png\" alt=\"alt\"></p>",
    );
}

#[test]
fn image_from_other_domain_becomes_link() {
    assert_html(
        "![alt](https://example.com/x.png)",
        "<p><a href=\"https://example.com/x.png\">alt</a></p>",
    );
}
