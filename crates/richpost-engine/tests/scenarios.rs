use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use richpost_engine::{Document, Span, SpanKind};
use rstest::rstest;

/// Special characters that never sit on a span edge.
const EDGE: &str = " \n\t\r\\'\"\x07\x08\x0b\x0c";

#[test]
fn parse_two_bold_words() {
    let doc = Document::from_markup("**hello** **hello**");
    assert_eq!(doc.plain(), "hello hello");
    assert_eq!(
        doc.spans(),
        &[Span::new(SpanKind::Bold, 0, 5), Span::new(SpanKind::Bold, 6, 5)]
    );
}

#[rstest]
#[case("**hello** **hello**", "hello", "", " ")]
#[case("**one** **two**", "one", "", " **two**")]
#[case("**one** **two**", "two", "", "**one** ")]
#[case("**onetwo**", "two", "", "**one**")]
#[case("**onetwo**", "one", "", "**two**")]
#[case("**aaabbbb**", "aaa", "ccccccccccccccc", "**cccccccccccccccbbbb**")]
#[case("**one**", "one", "three", "**three**")]
#[case(
    "**aaa              ccccc**",
    "aaa",
    "bbbbb",
    "**bbbbb              ccccc**"
)]
#[case(
    "replace [this](github.com) link **pls**",
    "this",
    "thisee",
    "replace [thisee](github.com) link **pls**"
)]
#[case(
    "replace [this](github.com) link **pls**",
    "this",
    "thisee🫡",
    "replace [thisee🫡](github.com) link **pls**"
)]
#[case(
    "remove [this](github.com) link **pls**",
    "this",
    "",
    "remove  link **pls**"
)]
#[case(
    "remove [this link](github.com) **pls**",
    "this",
    "",
    "remove [ link](github.com) **pls**"
)]
#[case("remove __**hello__", "hello", "", "remove __**__")]
#[case("remove __**hello**__", "hello", "", "remove ")]
#[case("    **remove**", "", "", "    **remove**")]
fn replace_scenarios(
    #[case] markup: &str,
    #[case] old: &str,
    #[case] new: &str,
    #[case] expected: &str,
) {
    let doc = Document::from_markup(markup).replace(old, new);
    assert_eq!(doc.to_markup(), expected);
}

#[test]
fn link_grows_with_its_text() {
    let doc = Document::from_markup("replace [this](github.com) link **pls**");
    let replaced = doc.replace("this", "thisee");
    let link = &replaced.spans()[0];
    assert_eq!((link.offset, link.length), (8, 6));
}

#[test]
fn strip_rebases_bold_to_start() {
    let doc = Document::from_markup("    **remove**").strip();
    assert_eq!(doc.to_markup(), "**remove**");
    assert_eq!(doc.spans(), &[Span::new(SpanKind::Bold, 0, 6)]);
}

#[rstest]
#[case("**\n**", "\n")]
#[case("****", "****")]
#[case("** **", " ")]
fn degenerate_markup(#[case] markup: &str, #[case] expected: &str) {
    assert_eq!(Document::from_markup(markup).to_markup(), expected);
}

#[test]
fn span_edges_skip_special_characters() {
    let markup = format!("**{EDGE}__content__{EDGE}**");
    assert_eq!(
        Document::from_markup(&markup).to_markup(),
        format!("{EDGE}**__content**__{EDGE}")
    );
}

#[test]
fn job_post_end_to_end() {
    let markup = "🔥 Rust Developer\n\n\n\n**Stack:** tokio,  serde\n- remote\n- [apply](https://jobs.example/1)  ";
    let doc = Document::from_markup(markup)
        .clear()
        .fix_header("Rust Developer");
    assert_eq!(
        doc.to_markup(),
        "**Rust Developer**\n\n**Stack:** tokio, serde\n• remote\n• [apply](https://jobs.example/1)"
    );
    assert_snapshot!(doc.describe_spans(), @r#"
    - Bold: "Stack:" offset:16 len:6
    - TextLink: "apply" offset:47 len:5
    - Bold: "Rust Developer" offset:0 len:14
    "#);
}
