//! Messages app: a scripted, read-only chat thread.
//!
//! The first profile is shown as the open conversation, the rest as
//! friends. Tapping a row opens its chat room; tapping an avatar opens the
//! profile card on top of whatever view is showing.

use super::EscapeOutcome;

/// One chat bubble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub text: String,
    pub time: String,
    pub from_me: bool,
}

/// A contact with its scripted messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub status: Option<String>,
    /// Falls back to the landscape placeholder when `None`.
    pub avatar_url: Option<String>,
    pub chat: Vec<ChatLine>,
}

impl Profile {
    fn new(id: &str, name: &str, status: &str, lines: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status: Some(status.to_string()),
            avatar_url: None,
            chat: lines
                .iter()
                .map(|text| ChatLine {
                    text: text.to_string(),
                    time: "20:41".to_string(),
                    from_me: false,
                })
                .collect(),
        }
    }

    /// Preview shown in the list.
    pub fn last_message(&self) -> Option<&str> {
        self.chat.last().map(|line| line.text.as_str())
    }
}

/// The stock thread: the couple first, then their parents.
pub fn default_profiles() -> Vec<Profile> {
    vec![
        Profile::new(
            "groom",
            "Siwoo",
            "Back to school after a long time...",
            &[
                "Hello, this is Siwoo, the groom. I'm so glad to see all of you again.",
                "A precious bond that began ten years ago has carried us all the way here.",
                "I'm excited for the second chapter of my life with my wise and lovely wife.",
                "Please join us as we begin our new life together.",
                "See you on the day!",
            ],
        ),
        Profile::new(
            "bride",
            "Jini",
            "Getting married ><",
            &[
                "We spent the past year preparing the wedding together, and it is almost done!",
                "Thank you to our families and friends who helped us get this far.",
                "March 28 will be a day we remember forever. It would mean so much to see you there.",
                "I'll do my best to greet every one of you.",
            ],
        ),
        Profile::new(
            "groom-mother",
            "Yunjeong",
            "Go, son!",
            &[
                "Our child has grown up and found the other half of a new life.",
                "We ask for your warm blessings and encouragement.",
            ],
        ),
        Profile::new(
            "groom-father",
            "Seongdong",
            "My son is the best!",
            &["We would be grateful if you blessed their new beginning with your presence."],
        ),
        Profile::new(
            "bride-mother",
            "Hyungyu",
            "My daughter is the prettiest",
            &[
                "Our daughter has met a precious partner and is starting a new family.",
                "It would be an honour to have you bless their future.",
            ],
        ),
        Profile::new(
            "bride-father",
            "Seokbong",
            "My eldest princess, a model now",
            &["We would be truly thankful if you could spare the time to attend."],
        ),
    ]
}

/// Which screen the app shows under the profile card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagesView {
    List,
    ChatRoom(String),
}

/// Messages app state.
#[derive(Debug)]
pub struct MessagesApp {
    profiles: Vec<Profile>,
    view: MessagesView,
    profile_card: Option<String>,
}

impl MessagesApp {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            profiles,
            view: MessagesView::List,
            profile_card: None,
        }
    }

    pub fn view(&self) -> &MessagesView {
        &self.view
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// The pinned conversation.
    pub fn conversation(&self) -> Option<&Profile> {
        self.profiles.first()
    }

    /// Everyone after the pinned conversation.
    pub fn friends(&self) -> &[Profile] {
        self.profiles.get(1..).unwrap_or_default()
    }

    pub fn profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Profile whose chat room is open.
    pub fn open_chat_profile(&self) -> Option<&Profile> {
        match &self.view {
            MessagesView::ChatRoom(id) => self.profile(id),
            MessagesView::List => None,
        }
    }

    /// Profile whose card is showing.
    pub fn profile_card(&self) -> Option<&Profile> {
        self.profile_card.as_deref().and_then(|id| self.profile(id))
    }

    /// Row tap.
    pub fn open_chat(&mut self, id: &str) -> bool {
        if self.profile(id).is_none() {
            return false;
        }
        self.view = MessagesView::ChatRoom(id.to_string());
        true
    }

    /// Avatar tap.
    pub fn open_profile(&mut self, id: &str) -> bool {
        if self.profile(id).is_none() {
            return false;
        }
        self.profile_card = Some(id.to_string());
        true
    }

    pub fn close_profile(&mut self) {
        self.profile_card = None;
    }

    /// Back button in the chat room.
    pub fn back(&mut self) {
        self.view = MessagesView::List;
    }

    /// Unwind: profile card, then chat room, then close.
    pub fn escape(&mut self) -> EscapeOutcome {
        if self.profile_card.is_some() {
            self.close_profile();
            EscapeOutcome::Consumed
        } else if matches!(self.view, MessagesView::ChatRoom(_)) {
            self.back();
            EscapeOutcome::Consumed
        } else {
            EscapeOutcome::Close
        }
    }
}

impl Default for MessagesApp {
    fn default() -> Self {
        Self::new(default_profiles())
    }
}
