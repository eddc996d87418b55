//! Decoding of Google News sitemap XML into [`NewsEntry`] values.

use std::mem;

use newsmap_core::NewsEntry;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::SitemapError;
use crate::hash::url_hash;
use crate::normalize::split_keywords;

/// Leaf elements read from each `<url>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Loc,
    Title,
    PublicationDate,
    Keywords,
}

#[derive(Debug, Default)]
struct PendingEntry {
    loc: Option<String>,
    title: Option<String>,
    publication_date: Option<String>,
    raw_keywords: Vec<String>,
}

impl PendingEntry {
    fn set(&mut self, field: Field, text: String) {
        match field {
            Field::Loc => self.loc = Some(text),
            Field::Title => self.title = Some(text),
            Field::PublicationDate => {
                self.publication_date = Some(text).filter(|t| !t.is_empty());
            }
            Field::Keywords => self.raw_keywords.push(text),
        }
    }

    fn finish(self) -> Option<NewsEntry> {
        let url = self.loc.filter(|loc| !loc.is_empty())?;
        Some(NewsEntry {
            url_hash: url_hash(&url),
            url,
            title: self.title.unwrap_or_default(),
            publication_date: self.publication_date,
            keywords: split_keywords(&self.raw_keywords),
        })
    }
}

/// Map an element path (local names, root first) to the field it carries.
///
/// Namespace prefixes are ignored, so `news:title` and `n:title` both match.
/// Only direct children of `<url>` and `<url><news>` count; an `<image:loc>`
/// nested in `<image:image>` is not the article URL.
fn field_for(path: &[String]) -> Option<Field> {
    let names: Vec<&str> = path.iter().map(String::as_str).collect();
    match names.as_slice() {
        ["urlset", "url", "loc"] => Some(Field::Loc),
        ["urlset", "url", "news", "title"] => Some(Field::Title),
        ["urlset", "url", "news", "publication_date"] => Some(Field::PublicationDate),
        ["urlset", "url", "news", "keywords"] => Some(Field::Keywords),
        _ => None,
    }
}

fn is_url_element(path: &[String]) -> bool {
    path.len() == 2 && path[0] == "urlset" && path[1] == "url"
}

/// Parse a news sitemap body into entries, in document order.
///
/// `<urlset>` with zero, one, or many `<url>` children all produce a vector.
/// A `<url>` without a non-empty `<loc>` is skipped. A well-formed document
/// whose root is not `<urlset>` yields an empty vector.
///
/// # Errors
///
/// Returns [`SitemapError::ParseFailed`] if the XML is malformed.
pub fn parse_sitemap(xml: &str) -> Result<Vec<NewsEntry>, SitemapError> {
    let mut reader = Reader::from_str(xml);
    // Element text, `<loc>` included, is trimmed of surrounding whitespace.
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut path: Vec<String> = Vec::new();
    let mut pending: Option<PendingEntry> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();
    let mut saw_urlset = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                if path.len() == 1 && path[0] == "urlset" {
                    saw_urlset = true;
                }
                if is_url_element(&path) {
                    pending = Some(PendingEntry::default());
                }
                field = field_for(&path);
                text.clear();
            }
            Ok(Event::Empty(e)) => {
                let name = e.local_name();
                if path.is_empty() && name.as_ref() == b"urlset" {
                    saw_urlset = true;
                } else if path.len() == 1 && path[0] == "urlset" && name.as_ref() == b"url" {
                    tracing::debug!("skipping empty <url> element");
                }
            }
            Ok(Event::Text(e)) => {
                if field.is_some() {
                    text.push_str(&e.unescape()?);
                }
            }
            Ok(Event::CData(e)) => {
                if field.is_some() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::End(_)) => {
                if let (Some(closed), Some(entry)) = (field.take(), pending.as_mut()) {
                    entry.set(closed, mem::take(&mut text));
                }
                if is_url_element(&path) {
                    match pending.take().and_then(PendingEntry::finish) {
                        Some(entry) => entries.push(entry),
                        None => tracing::debug!("skipping <url> without <loc>"),
                    }
                }
                path.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SitemapError::ParseFailed(e)),
            _ => {}
        }
    }

    if !saw_urlset {
        tracing::warn!("sitemap document has no <urlset> root; treating as empty");
    }

    Ok(entries)
}
