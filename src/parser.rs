//! RSS 2.0 parser for the news feed.

use anyhow::{Result, anyhow};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::news::FeedEntry;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Description,
    Published,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"title" => Some(Field::Title),
            b"description" => Some(Field::Description),
            b"pubDate" => Some(Field::Published),
            _ => None,
        }
    }

    fn tag(self) -> &'static [u8] {
        match self {
            Field::Title => b"title",
            Field::Description => b"description",
            Field::Published => b"pubDate",
        }
    }
}

#[derive(Default)]
struct EntryBuilder {
    title: String,
    description: String,
    published: String,
    seen_title: bool,
    seen_description: bool,
    seen_published: bool,
}

impl EntryBuilder {
    fn push(&mut self, field: Field, text: &str) {
        match field {
            Field::Title => {
                self.seen_title = true;
                self.title.push_str(text);
            }
            Field::Description => {
                self.seen_description = true;
                self.description.push_str(text);
            }
            Field::Published => {
                self.seen_published = true;
                self.published.push_str(text);
            }
        }
    }

    fn build(self) -> FeedEntry {
        fn finish(seen: bool, value: String) -> Option<String> {
            let value = value.trim();
            (seen && !value.is_empty()).then(|| value.to_string())
        }

        FeedEntry {
            title: finish(self.seen_title, self.title),
            description: finish(self.seen_description, self.description),
            published: finish(self.seen_published, self.published),
        }
    }
}

/// Extracts every `<item>` of an RSS document, in document order.
///
/// Text and CDATA content are both accepted; entity references are unescaped
/// where possible and kept verbatim otherwise. Fields absent from an item are
/// left as `None`.
///
/// # Errors
///
/// Returns an error if the document is not well-formed XML.
pub fn parse_feed(xml: &[u8]) -> Result<Vec<FeedEntry>> {
    let mut reader = Reader::from_reader(xml);

    let mut entries = Vec::new();
    let mut buf = Vec::new();

    let mut current: Option<EntryBuilder> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.name();
                if name.as_ref() == b"item" {
                    current = Some(EntryBuilder::default());
                    field = None;
                } else if current.is_some() && field.is_none() {
                    field = Field::from_tag(name.as_ref());
                }
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                if name.as_ref() == b"item" {
                    if let Some(builder) = current.take() {
                        entries.push(builder.build());
                    }
                    field = None;
                } else if field.is_some_and(|f| f.tag() == name.as_ref()) {
                    field = None;
                }
            }
            Ok(Event::Text(e)) => {
                if let (Some(builder), Some(f)) = (current.as_mut(), field) {
                    let text = match e.unescape() {
                        Ok(text) => text.into_owned(),
                        Err(_) => String::from_utf8_lossy(&e).into_owned(),
                    };
                    builder.push(f, &text);
                }
            }
            Ok(Event::CData(e)) => {
                if let (Some(builder), Some(f)) = (current.as_mut(), field) {
                    builder.push(f, &String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(anyhow!(
                    "RSS parse error at position {}: {}",
                    reader.error_position(),
                    e
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}
