//! Teams MessageCard rendering

use serde::Serialize;

use crate::event::BuildOutcome;

pub const SUCCESS_IMAGE_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/thumb/f/fb/Yes_check.svg/240px-Yes_check.svg.png";
pub const FAILURE_IMAGE_URL: &str =
    "https://www.dictionary.com/e/wp-content/uploads/2018/03/thisisfine-1.jpg";

/// Connector-card payload posted to the Teams webhook.
#[derive(Debug, Clone, Serialize)]
pub struct MessageCard {
    #[serde(rename = "@type")]
    card_type: &'static str,
    #[serde(rename = "@context")]
    context: &'static str,
    pub text: String,
    pub sections: Vec<CardSection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardSection {
    #[serde(rename = "activityTitle")]
    pub activity_title: String,
    #[serde(rename = "activityImage")]
    pub activity_image: String,
}

impl MessageCard {
    /// Title shown in the card's activity section.
    pub fn title(&self) -> &str {
        self.sections
            .first()
            .map(|s| s.activity_title.as_str())
            .unwrap_or_default()
    }
}

/// Builds the card for one outcome: title and image picked by the
/// success flag, body listing the build fields one per line.
pub fn render(outcome: &BuildOutcome) -> MessageCard {
    let (title, image, word) = if outcome.succeeded {
        ("Build Succeeded", SUCCESS_IMAGE_URL, "succeeded")
    } else {
        ("Build Failed", FAILURE_IMAGE_URL, "failed")
    };

    let text = format!(
        "Build {} has {}.\nBuild ID: {}\nStarted at: {}\nLogs: {}",
        outcome.project_name, word, outcome.build_id, outcome.start_time, outcome.logs_url
    );

    MessageCard {
        card_type: "MessageCard",
        context: "https://schema.org/extensions",
        text,
        sections: vec![CardSection {
            activity_title: title.to_string(),
            activity_image: image.to_string(),
        }],
    }
}
