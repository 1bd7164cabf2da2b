//! Demonstration catalog written on first start, when storage holds no items.

use crate::model::{Category, MediaItem, User};
use chrono::NaiveDate;

pub fn demo_catalog() -> Vec<MediaItem> {
    let system = User::with_avatar("NexusSystem", "https://robohash.org/nexus");
    let cyber = User::with_avatar("CyberMancer", "https://robohash.org/cyber");

    vec![
        MediaItem {
            id: "1".to_string(),
            title: "Quantum Transmission v1".to_string(),
            description:
                "A visual representation of data packets traveling through the Nexus core."
                    .to_string(),
            category: Category::Video,
            file_name: "nexus_core.mp4".to_string(),
            file_size: "15.4 MB".to_string(),
            file_url: "https://sample-videos.com/video123/mp4/720/big_buck_bunny_720p_1mb.mp4"
                .to_string(),
            thumbnail_url: Some("https://picsum.photos/seed/quantum/800/450".to_string()),
            uploader: system,
            upload_date: seed_date(2023, 10, 1),
            views: 1254,
            comments: Vec::new(),
            extension: "mp4".to_string(),
        },
        MediaItem {
            id: "2".to_string(),
            title: "Binary Rain (Ambient)".to_string(),
            description: "Soothing digital soundscape for focused work.".to_string(),
            category: Category::Audio,
            file_name: "binary_rain.mp3".to_string(),
            file_size: "8.2 MB".to_string(),
            file_url: "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3".to_string(),
            thumbnail_url: Some("https://picsum.photos/seed/audio/800/450".to_string()),
            uploader: cyber,
            upload_date: seed_date(2023, 11, 15),
            views: 890,
            comments: Vec::new(),
            extension: "mp3".to_string(),
        },
    ]
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_two_items_from_distinct_uploaders() {
        let items = demo_catalog();
        assert_eq!(items.len(), 2);
        assert_ne!(items[0].id, items[1].id);
        assert_ne!(items[0].uploader.username, items[1].uploader.username);
        assert_eq!(items[0].upload_date.to_string(), "2023-10-01");
    }
}
