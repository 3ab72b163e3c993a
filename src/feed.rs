//! Normalized feed types and their serialized forms.
//!
//! The adapter produces a [`Feed`]; this module owns its shape, the publish
//! date parsing, and the two output encodings (RSS XML via the `rss` crate,
//! JSON via serde). The JSON field names `item` and `pubDate` follow the
//! normalized feed-object convention consumers of this kind of adapter
//! expect.
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rss::{ChannelBuilder, ItemBuilder};
use serde::Serialize;

/// Fixed channel description for every category.
pub const FEED_DESCRIPTION: &str = "南京航空航天大学教务处RSS";

/// One announcement, normalized for feed output.
#[derive(Debug, Clone, Serialize)]
pub struct FeedItem {
    pub title: String,
    /// Absolute URL of the detail page.
    pub link: String,
    /// Item body as HTML markup. `None` when enrichment found no content
    /// (non-article target such as a PDF attachment).
    pub description: Option<String>,
    /// Parsed publish date; `None` when the raw date text did not parse.
    #[serde(rename = "pubDate")]
    pub pub_date: Option<DateTime<Utc>>,
}

/// The normalized feed for one category.
#[derive(Debug, Clone, Serialize)]
pub struct Feed {
    pub title: String,
    /// Absolute URL of the listing page this feed was built from.
    pub link: String,
    pub description: String,
    #[serde(rename = "item")]
    pub items: Vec<FeedItem>,
}

impl Feed {
    /// Render as an RSS 2.0 channel.
    pub fn to_channel(&self) -> rss::Channel {
        let items = self
            .items
            .iter()
            .map(|item| {
                ItemBuilder::default()
                    .title(item.title.clone())
                    .link(item.link.clone())
                    .description(item.description.clone())
                    .pub_date(item.pub_date.map(|date| date.to_rfc2822()))
                    .build()
            })
            .collect::<Vec<_>>();

        ChannelBuilder::default()
            .title(self.title.clone())
            .link(self.link.clone())
            .description(self.description.clone())
            .items(items)
            .build()
    }

    /// Render as an RSS 2.0 XML document.
    pub fn to_rss_xml(&self) -> String {
        self.to_channel().to_string()
    }
}

/// Date formats observed on the announcement site, most common first.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y年%m月%d日"];

/// Parse the raw date text of a listing entry.
///
/// Listing dates are day-granular; the result is midnight UTC of that day.
/// Malformed text yields `None`; a bad date never fails the request, the
/// item just carries no publish date.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn sample_feed() -> Feed {
        Feed {
            title: "通知公告 | 南京航空航天大学教务处".to_string(),
            link: "http://aao.nuaa.edu.cn/8222/list.htm".to_string(),
            description: FEED_DESCRIPTION.to_string(),
            items: vec![
                FeedItem {
                    title: "考试安排".to_string(),
                    link: "http://aao.nuaa.edu.cn/c8222a1.htm".to_string(),
                    description: Some("正文<br>链接".to_string()),
                    pub_date: parse_pub_date("2024-03-15"),
                },
                FeedItem {
                    title: "附件通知".to_string(),
                    link: "http://aao.nuaa.edu.cn/files/schedule.pdf".to_string(),
                    description: None,
                    pub_date: None,
                },
            ],
        }
    }

    #[test]
    fn test_parse_iso_date() {
        let date = parse_pub_date("2024-03-15").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 15));
        assert_eq!(date.hour(), 0);
    }

    #[test]
    fn test_parse_alternate_formats() {
        assert!(parse_pub_date("2024/03/15").is_some());
        assert!(parse_pub_date("2024.03.15").is_some());
        assert!(parse_pub_date("2024年03月15日").is_some());
        assert!(parse_pub_date("  2024-03-15  ").is_some());
    }

    #[test]
    fn test_malformed_date_is_none() {
        assert_eq!(parse_pub_date(""), None);
        assert_eq!(parse_pub_date("昨天"), None);
        assert_eq!(parse_pub_date("2024-13-45"), None);
        assert_eq!(parse_pub_date("15-03-2024"), None);
    }

    #[test]
    fn test_channel_carries_feed_fields() {
        let channel = sample_feed().to_channel();
        assert_eq!(channel.title(), "通知公告 | 南京航空航天大学教务处");
        assert_eq!(channel.link(), "http://aao.nuaa.edu.cn/8222/list.htm");
        assert_eq!(channel.description(), FEED_DESCRIPTION);
        assert_eq!(channel.items().len(), 2);
    }

    #[test]
    fn test_channel_item_mapping() {
        let channel = sample_feed().to_channel();
        let first = &channel.items()[0];
        assert_eq!(first.title(), Some("考试安排"));
        assert_eq!(first.link(), Some("http://aao.nuaa.edu.cn/c8222a1.htm"));
        assert_eq!(first.description(), Some("正文<br>链接"));
        assert!(first.pub_date().unwrap().contains("2024"));

        let second = &channel.items()[1];
        assert_eq!(second.description(), None);
        assert_eq!(second.pub_date(), None);
    }

    #[test]
    fn test_rss_xml_is_well_formed_enough() {
        let xml = sample_feed().to_rss_xml();
        assert!(xml.contains("<rss"));
        assert!(xml.contains("通知公告"));
        assert!(xml.contains("考试安排"));
    }

    #[test]
    fn test_json_uses_normalized_field_names() {
        let json = serde_json::to_value(sample_feed()).unwrap();
        assert!(json.get("item").is_some(), "items serialize as 'item'");
        let first = &json["item"][0];
        assert!(first.get("pubDate").is_some(), "pub_date serializes as 'pubDate'");
        assert_eq!(json["item"][1]["description"], serde_json::Value::Null);
    }

    proptest! {
        #[test]
        fn parse_pub_date_never_panics(raw in ".*") {
            let _ = parse_pub_date(&raw);
        }

        #[test]
        fn valid_iso_dates_round_trip(year in 1990i32..2100, month in 1u32..=12, day in 1u32..=28) {
            let raw = format!("{year:04}-{month:02}-{day:02}");
            let parsed = parse_pub_date(&raw).unwrap();
            prop_assert_eq!((parsed.year(), parsed.month(), parsed.day()), (year, month, day));
        }
    }
}
