//! Lightweight structural XML scanner.
//!
//! Not a conforming XML parser: the preview only needs tag structure, a
//! well-formedness verdict, and attribute lookup on raw tag bodies. Unknown
//! or broken constructs degrade the verdict instead of aborting the scan, so
//! a half-typed layout still produces a partial event stream to render.

#[cfg(test)]
#[path = "xml_test.rs"]
mod xml_test;

/// A start tag: element name plus the raw text between `<` and `>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag<'a> {
    pub name: &'a str,
    raw: &'a str,
}

impl<'a> Tag<'a> {
    /// Look up an attribute value by exact name.
    ///
    /// Namespaced attributes (`android:text`) must be asked for with their
    /// prefix; a bare `text` will not match them.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        attr_in(self.raw, name)
    }
}

/// One structural event in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XmlEvent<'a> {
    Open(Tag<'a>),
    Close(&'a str),
    SelfClose(Tag<'a>),
    Text(&'a str),
}

/// Scanner output: the event stream plus the structural verdict.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scan<'a> {
    pub events: Vec<XmlEvent<'a>>,
    pub well_formed: bool,
}

/// Scan `input` into structural events.
///
/// `well_formed` is true when every tag is terminated, every close matches
/// the innermost open element, and nothing is left open at the end.
/// Comments, prolog, and doctype lines are skipped without affecting the
/// verdict.
#[must_use]
pub fn scan(input: &str) -> Scan<'_> {
    let mut events = Vec::new();
    let mut stack: Vec<&str> = Vec::new();
    let mut well_formed = true;
    let mut rest = input;

    loop {
        let Some(lt) = rest.find('<') else {
            push_text(&mut events, rest);
            break;
        };
        push_text(&mut events, &rest[..lt]);
        rest = &rest[lt..];

        if let Some(after) = rest.strip_prefix("<!--") {
            match after.find("-->") {
                Some(end) => rest = &after[end + 3..],
                None => {
                    well_formed = false;
                    break;
                }
            }
            continue;
        }

        // Prolog (`<?xml ...?>`) and doctype (`<!...>`) carry no structure.
        if rest.starts_with("<?") || rest.starts_with("<!") {
            match rest.find('>') {
                Some(end) => rest = &rest[end + 1..],
                None => {
                    well_formed = false;
                    break;
                }
            }
            continue;
        }

        let Some(gt) = rest.find('>') else {
            well_formed = false;
            break;
        };
        let inner = rest[1..gt].trim();
        rest = &rest[gt + 1..];

        if let Some(name) = inner.strip_prefix('/') {
            let name = name.trim();
            match stack.pop() {
                Some(open) if open == name => {}
                _ => well_formed = false,
            }
            events.push(XmlEvent::Close(name));
            continue;
        }

        let self_closing = inner.ends_with('/');
        let body = inner.trim_end_matches('/').trim_end();
        let name = body
            .split(|c: char| c.is_whitespace())
            .next()
            .unwrap_or_default();
        if name.is_empty() {
            well_formed = false;
            continue;
        }

        let tag = Tag { name, raw: body };
        if self_closing {
            events.push(XmlEvent::SelfClose(tag));
        } else {
            stack.push(name);
            events.push(XmlEvent::Open(tag));
        }
    }

    if !stack.is_empty() {
        well_formed = false;
    }

    Scan { events, well_formed }
}

fn push_text<'a>(events: &mut Vec<XmlEvent<'a>>, raw: &'a str) {
    let text = raw.trim();
    if !text.is_empty() {
        events.push(XmlEvent::Text(text));
    }
}

/// Attribute lookup on a raw tag body: `name = "value"` with either quote
/// style. The name must stand alone (preceded by whitespace), so `name`
/// never matches inside `android:name`.
fn attr_in<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    let mut rest = raw;
    while let Some(pos) = rest.find(name) {
        let preceded_ok = pos > 0 && rest[..pos].ends_with(|c: char| c.is_whitespace());
        let after = rest[pos + name.len()..].trim_start();

        if preceded_ok && after.starts_with('=') {
            let value = after[1..].trim_start();
            let quote = value.chars().next()?;
            if quote != '"' && quote != '\'' {
                return None;
            }
            let value = &value[1..];
            return value.find(quote).map(|end| &value[..end]);
        }

        rest = &rest[pos + name.len()..];
    }
    None
}
