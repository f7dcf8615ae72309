//! Prompt construction for the social channels.
//!
//! Every prompt targets micro-entrepreneur insurance agents; per-channel
//! differences are tone, length and hashtag budget.

use agentsite_core::Error;

/// Social channel a piece of content targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    LinkedIn,
    Facebook,
    Instagram,
    X,
    WhatsApp,
}

impl Channel {
    /// Post type assumed when the caller does not pick one.
    pub fn default_post_type(&self) -> &'static str {
        match self {
            Channel::LinkedIn => "thought_leadership",
            Channel::Facebook => "community",
            Channel::Instagram => "engaging",
            Channel::X => "concise",
            Channel::WhatsApp => "status",
        }
    }

    fn style_lines(&self) -> &'static str {
        match self {
            Channel::LinkedIn => {
                "- 200-300 words (the optimal length for engagement)\n\
                 - Professional, authoritative tone suitable for a business network\n\
                 - Include 1-2 professional emojis\n\
                 - Add 3-5 relevant hashtags at the end\n\
                 - Include a clear call-to-action\n\
                 - Target audience: business owners, professionals, entrepreneurs"
            }
            Channel::Facebook => {
                "- 100-200 words, warm and conversational\n\
                 - Community-oriented tone that invites comments and shares\n\
                 - Include 2-3 friendly emojis\n\
                 - Add 3-5 hashtags for the local community and insurance\n\
                 - End with a question or invitation to get in touch\n\
                 - Target audience: local families and small business owners"
            }
            Channel::Instagram => {
                "- 150-200 word caption with a strong visual hook in the first line\n\
                 - Energetic, relatable tone with line breaks for readability\n\
                 - Include 3-5 emojis\n\
                 - Add 5-8 relevant hashtags at the end\n\
                 - Include a call-to-action (save, share, or DM)\n\
                 - Target audience: young families and first-time buyers"
            }
            Channel::X => {
                "- Under 280 characters\n\
                 - Punchy and direct, one idea per post\n\
                 - Add 2-4 relevant hashtags\n\
                 - Include a hook in the first few words\n\
                 - Target audience: professionals scrolling quickly"
            }
            Channel::WhatsApp => {
                "- 50-120 words, personal and direct\n\
                 - Written like a message to a client list, not an advert\n\
                 - Include 1-2 emojis\n\
                 - Include 4-6 relevant hashtags for insurance and financial planning\n\
                 - End with an easy reply prompt\n\
                 - Target audience: existing clients and referrals"
            }
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Channel::LinkedIn => "linkedin",
            Channel::Facebook => "facebook",
            Channel::Instagram => "instagram",
            Channel::X => "x",
            Channel::WhatsApp => "whatsapp",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linkedin" => Ok(Channel::LinkedIn),
            "facebook" => Ok(Channel::Facebook),
            "instagram" => Ok(Channel::Instagram),
            "x" | "twitter" => Ok(Channel::X),
            "whatsapp" => Ok(Channel::WhatsApp),
            other => Err(Error::InvalidInput(format!("unknown channel: {other}"))),
        }
    }
}

/// Build the prompt for a single post.
pub fn post_prompt(channel: Channel, topic: &str, post_type: &str) -> String {
    format!(
        "Create a {channel} post for micro-entrepreneur insurance agents based on: \"{topic}\"\n\
         \n\
         Post type: {post_type}\n\
         \n\
         Requirements:\n\
         {style}\n\
         - Focus on insurance expertise, financial planning and business protection\n\
         - Make it valuable and shareable\n\
         \n\
         Return only the post text.",
        style = channel.style_lines(),
    )
}

/// Build a prompt that requests content ideas as a JSON string array.
pub fn ideas_prompt(channel: Channel, topic: &str, count: usize) -> String {
    format!(
        "Generate {count} {channel} content ideas for micro-entrepreneur insurance \
         agents around: \"{topic}\"\n\
         \n\
         Each idea should be one sentence, concrete enough to write a post from, \
         and focused on insurance, financial planning or business protection.\n\
         \n\
         Return ONLY a JSON array of {count} strings, with no markdown fences and \
         no commentary."
    )
}
