use crate::editing::Document;
use crate::text;

/// Panics if any span breaks the document invariants: inside the buffer,
/// non-empty and not blank.
pub fn check(doc: &Document) {
    let n = doc.units().len();
    for span in doc.spans() {
        assert!(
            span.end() <= n,
            "span out of bounds: {span:?} (text len: {n})"
        );
        assert!(span.length > 0, "empty span survived an edit: {span:?}");
        assert!(
            !text::is_blank(&doc.units()[span.offset..span.end()]),
            "blank span survived an edit: {span:?}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spans::{Span, SpanKind};

    fn raw(plain: &str, spans: Vec<Span>) -> Document {
        Document {
            units: text::encode(plain),
            spans,
        }
    }

    #[test]
    fn parsed_documents_pass() {
        check(&Document::from_markup("**a** [b](c) `d` https://e.io"));
    }

    #[test]
    #[should_panic(expected = "span out of bounds")]
    fn out_of_bounds_span_panics() {
        check(&raw("ab", vec![Span::new(SpanKind::Bold, 1, 2)]));
    }

    #[test]
    #[should_panic(expected = "empty span")]
    fn empty_span_panics() {
        check(&raw("ab", vec![Span::new(SpanKind::Bold, 1, 0)]));
    }

    #[test]
    #[should_panic(expected = "blank span")]
    fn blank_span_panics() {
        check(&raw("a  b", vec![Span::new(SpanKind::Bold, 1, 2)]));
    }
}
