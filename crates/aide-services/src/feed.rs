//! News feed fetching and parsing.
//!
//! Handles RSS 2.0 (`<item>`) and Atom (`<entry>`) documents. Entries are
//! returned in document order; truncation is up to the caller.

use aide_core::{AssistantError, NewsItem, Result};
use async_trait::async_trait;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::http::service_error;

const SERVICE: &str = "news feed";

/// Source of news entries.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Entries of the feed at `url`, in feed order.
    async fn fetch(&self, url: &str) -> Result<Vec<NewsItem>>;
}

/// Feed source that downloads RSS or Atom documents over HTTP.
#[derive(Clone)]
pub struct RssFeed {
    http_client: reqwest::Client,
}

impl RssFeed {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl FeedSource for RssFeed {
    async fn fetch(&self, url: &str) -> Result<Vec<NewsItem>> {
        let body = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| service_error(SERVICE, e))?
            .error_for_status()
            .map_err(|e| service_error(SERVICE, e))?
            .text()
            .await
            .map_err(|e| service_error(SERVICE, e))?;

        let items = parse_feed(&body)?;
        debug!("Fetched {} entries from {}", items.len(), url);

        Ok(items)
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Title,
    Link,
}

#[derive(Debug, Default)]
struct PartialItem {
    title: String,
    link: String,
}

impl PartialItem {
    fn push(&mut self, field: Field, text: &str) {
        match field {
            Field::Title => self.title.push_str(text),
            Field::Link => self.link.push_str(text),
        }
    }

    fn finish(self) -> Option<NewsItem> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        Some(NewsItem::new(title, self.link.trim()))
    }
}

/// Parse an RSS or Atom document. Entries without a title are skipped.
pub fn parse_feed(xml: &str) -> Result<Vec<NewsItem>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<PartialItem> = None;
    let mut field: Option<Field> = None;
    // Element depth below the open item; 1 means a direct child.
    let mut depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| AssistantError::unavailable(SERVICE, format!("malformed feed: {}", e)))?;

        match event {
            Event::Start(e) => match current.as_mut() {
                None => {
                    if is_entry(&e) {
                        current = Some(PartialItem::default());
                        depth = 0;
                    }
                }
                Some(item) => {
                    depth += 1;
                    if depth == 1 {
                        match e.name().as_ref() {
                            b"title" => field = Some(Field::Title),
                            b"link" => match atom_href(&e)? {
                                Some(href) => set_link(item, href),
                                None => field = Some(Field::Link),
                            },
                            _ => {}
                        }
                    }
                }
            },
            Event::Empty(e) => {
                if depth == 0 && e.name().as_ref() == b"link" {
                    if let (Some(item), Some(href)) = (current.as_mut(), atom_href(&e)?) {
                        set_link(item, href);
                    }
                }
            }
            Event::Text(text) => {
                if let (Some(item), Some(field)) = (current.as_mut(), field) {
                    let decoded = text
                        .unescape()
                        .map(|s| s.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(&text).into_owned());
                    item.push(field, &decoded);
                }
            }
            Event::CData(data) => {
                if let (Some(item), Some(field)) = (current.as_mut(), field) {
                    item.push(field, &String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) if current.is_some() => {
                if depth == 0 {
                    if let Some(item) = current.take().and_then(PartialItem::finish) {
                        items.push(item);
                    }
                } else {
                    depth -= 1;
                    if depth == 0 {
                        field = None;
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(items)
}

fn is_entry(e: &BytesStart<'_>) -> bool {
    matches!(e.local_name().as_ref(), b"item" | b"entry")
}

fn set_link(item: &mut PartialItem, href: String) {
    if item.link.is_empty() {
        item.link = href;
    }
}

/// The `href` of an Atom link, ignoring non-alternate relations.
fn atom_href(e: &BytesStart<'_>) -> Result<Option<String>> {
    let malformed = |err: quick_xml::Error| {
        AssistantError::unavailable(SERVICE, format!("malformed link: {}", err))
    };

    if let Some(rel) = e.try_get_attribute("rel").map_err(|err| malformed(err.into()))? {
        if rel.unescape_value().map_err(|err| malformed(err.into()))? != "alternate" {
            return Ok(None);
        }
    }

    match e.try_get_attribute("href").map_err(|err| malformed(err.into()))? {
        Some(href) => Ok(Some(href.unescape_value().map_err(|err| malformed(err.into()))?.into_owned())),
        None => Ok(None),
    }
}
