use safemark::application::render::{
    ComrakRenderService, RenderService, render_markdown, render_service, sanitize_html,
};

const EXECUTABLE_MARKERS: [&str; 8] = [
    "<script",
    "onerror",
    "onload",
    "onclick",
    "href=\"javascript:",
    "src=\"javascript:",
    "<iframe",
    "<object",
];

fn assert_not_executable(html: &str) {
    let lower = html.to_ascii_lowercase();
    for marker in EXECUTABLE_MARKERS {
        assert!(
            !lower.contains(marker),
            "rendered HTML must not contain `{marker}`: {html}"
        );
    }
}

fn render(markdown: &str) -> String {
    render_service()
        .render(markdown)
        .expect("render succeeds")
}

#[test]
fn script_tags_are_removed_with_their_content() {
    let html = render("Hello\n\n<script>alert(1)</script>\n\nworld");

    assert_not_executable(&html);
    assert!(!html.contains("alert(1)"));
    assert!(html.contains("<p>Hello</p>"));
    assert!(html.contains("<p>world</p>"));
}

#[test]
fn event_handler_attributes_are_stripped() {
    let payloads = [
        "<img src=x onerror=alert(1)>",
        "inline <img src=\"cat.png\" onerror=\"alert(1)\"> image",
        "<div onclick=\"alert(1)\">click me</div>",
        "<svg onload=alert(1)></svg>",
        "<body onload=alert(1)>",
    ];

    for payload in payloads {
        assert_not_executable(&render(payload));
    }
}

#[test]
fn javascript_urls_are_neutralised() {
    let payloads = [
        "[click](javascript:alert(1))",
        "[click](JaVaScRiPt:alert(1))",
        "<a href=\"javascript:alert(1)\">x</a>",
        "![img](javascript:alert(1))",
        "<iframe src=\"javascript:alert(1)\"></iframe>",
        "<javascript:alert(1)>",
        "[ref]\n\n[ref]: javascript:alert(1)",
    ];

    for payload in payloads {
        let html = render(payload);
        assert_not_executable(&html);
    }
}

#[test]
fn link_text_survives_when_href_is_dropped() {
    let html = render("[click](javascript:alert(1))");

    assert!(html.contains("click"));
    assert!(!html.to_ascii_lowercase().contains("javascript:alert"));
}

#[test]
fn safe_links_are_kept() {
    let html = render("[docs](https://example.com/docs)");

    assert!(html.contains("href=\"https://example.com/docs\""));
    assert!(html.contains(">docs</a>"));
}

#[test]
fn heading_and_bold_are_rendered() {
    let html = render("# Hello\n\nThis is **bold** text.");

    assert!(html.contains("<h1>Hello</h1>"));
    assert!(html.contains("<p>This is <strong>bold</strong> text.</p>"));
}

#[test]
fn empty_input_renders_empty_output() {
    assert_eq!(render(""), "");
}

#[test]
fn identical_input_renders_identically() {
    let markdown = "# Title\n\n- one\n- two\n\n```rust\nfn main() {}\n```\n\n<b onclick=x>raw</b>";
    let service = ComrakRenderService::default();

    let first = service.render(markdown).expect("render succeeds");
    let second = service.render(markdown).expect("render succeeds");
    let shared = render(markdown);

    assert_eq!(first, second);
    assert_eq!(first, shared);
}

#[test]
fn benign_output_is_a_sanitizer_fixed_point() {
    let documents = [
        "# Title\n\nSome *emphasis* and **strength**.",
        "- one\n- two\n- three",
        "1. first\n2. second",
        "> quoted\n> text",
        "A [link](https://example.com) in a sentence.",
        "```\nplain code\n```",
        "Line with `inline code` and ~~strike~~.",
        "| a | b |\n| - | - |\n| 1 | 2 |",
        "- [x] done\n- [ ] todo",
    ];

    for markdown in documents {
        let html = render(markdown);
        assert_eq!(sanitize_html(&html), html, "not a fixed point: {markdown}");
    }
}

#[test]
fn plain_text_round_trips() {
    let text = "The quick brown fox jumps over the lazy dog 42 times";
    let html = render(text);

    assert!(html.contains(text));
}

#[test]
fn reserved_characters_are_escaped() {
    let html = render("a < b & c > d");

    assert!(html.contains("a &lt; b &amp; c &gt; d"));
}

#[test]
fn gfm_extensions_survive_sanitisation() {
    let html = render("~~gone~~ and https://example.com\n\n| h |\n| - |\n| v |");

    assert!(html.contains("<del>gone</del>"));
    assert!(html.contains("href=\"https://example.com\""));
    assert!(html.contains("<table>"));
    assert!(html.contains("<td>v</td>"));
}

#[test]
fn task_list_checkboxes_survive_sanitisation() {
    let html = render("- [x] done\n- [ ] todo");

    assert!(html.contains(
        "<li><input type=\"checkbox\" checked=\"\" disabled=\"\"> done</li>"
    ));
    assert!(html.contains("<li><input type=\"checkbox\" disabled=\"\"> todo</li>"));
}

#[test]
fn raw_inputs_lose_non_checkbox_types() {
    let html = render("<input type=\"submit\" formaction=\"javascript:alert(1)\" onfocus=\"x()\">");

    assert_not_executable(&html);
    assert!(!html.contains("submit"));
    assert!(!html.contains("formaction"));
    assert!(!html.contains("onfocus"));
}

#[test]
fn malformed_markdown_still_renders() {
    let html = render("**unclosed *emphasis [link](<broken\n\n<div><span>");

    assert!(html.contains("unclosed"));
}

#[tokio::test]
async fn async_render_matches_sync_render() {
    let markdown = "# Hello\n\nThis is **bold** text.";

    let html = render_markdown(markdown).await.expect("render succeeds");

    assert_eq!(html, render(markdown));
}

#[tokio::test]
async fn async_render_of_empty_input_is_empty() {
    let html = render_markdown(String::new()).await.expect("render succeeds");

    assert!(html.is_empty());
}
