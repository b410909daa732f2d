//! Model fixtures

use vidtube::shared::models::{
    Category, Channel, ChannelSummary, Comment, Engagement, Notification, Reaction, User, Video,
};

pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        username: format!("user_{id}"),
        email: format!("{id}@example.com"),
        full_name: format!("User {id}"),
        avatar: String::new(),
        cover_image: String::new(),
    }
}

pub fn summary(id: &str) -> ChannelSummary {
    ChannelSummary {
        id: id.to_string(),
        username: format!("user_{id}"),
        full_name: format!("User {id}"),
        avatar: String::new(),
    }
}

pub fn video(id: &str) -> Video {
    video_with(id, Engagement::default())
}

pub fn video_with(id: &str, engagement: Engagement) -> Video {
    Video {
        id: id.to_string(),
        title: format!("Video {id}"),
        description: String::new(),
        video_file: format!("https://cdn.example.com/{id}.mp4"),
        thumbnail: format!("https://cdn.example.com/{id}.jpg"),
        duration: 61.0,
        views: 0,
        is_published: true,
        created_at: None,
        owner: Some(summary("owner")),
        category: None,
        engagement,
    }
}

/// `count` videos with ids `v1..=v{count}`
pub fn catalog(count: usize) -> Vec<Video> {
    (1..=count).map(|n| video(&format!("v{n}"))).collect()
}

pub fn comment(id: &str, owner_id: &str, content: &str) -> Comment {
    Comment {
        id: id.to_string(),
        content: content.to_string(),
        video: Some("v1".to_string()),
        owner: Some(summary(owner_id)),
        created_at: None,
        engagement: Engagement::default(),
    }
}

pub fn notification(id: &str, is_read: bool) -> Notification {
    Notification {
        id: id.to_string(),
        content: format!("Notification {id}"),
        kind: "COMMENT".to_string(),
        is_read,
        created_at: None,
        video: None,
        sender: None,
    }
}

pub fn channel(id: &str, subscribers: u64, is_subscribed: bool) -> Channel {
    Channel {
        id: id.to_string(),
        username: format!("user_{id}"),
        full_name: format!("User {id}"),
        avatar: String::new(),
        cover_image: String::new(),
        subscribers_count: subscribers,
        channels_subscribed_to_count: 0,
        is_subscribed,
    }
}

pub fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn engagement(reaction: Reaction, likes: u64, dislikes: u64) -> Engagement {
    Engagement::new(reaction, likes, dislikes)
}
