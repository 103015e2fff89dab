//! Response copy for the support assistant.
//!
//! Text uses `**...**` for emphasis and `\n` for line breaks; both are rendering
//! hints handled by [`crate::render`].

/// Shown once when a conversation opens. Never enters the history.
pub const WELCOME: &str = "Hi there! 👋 I'm the Pinsry Assistant. I can help with anything about Pinsry, the story-sharing app built by **Luohino**. Ask me about writing stories, bookmarks, following authors, notifications or anything else!";

/// Assistant turn used when a reply could not be resolved.
pub const APOLOGY: &str = "I'm sorry, I'm having trouble answering right now. Please try your question again, or reach our support team at support@pinsry.com.";

pub const GREETINGS: &[&str] = &[
    "Hi there! 😊 I'm the Pinsry Assistant. What can I help you with today?",
    "Hello! 👋 Welcome to Pinsry. Ask me anything about the app!",
    "Hey! 🌟 Good to see you. What would you like to know about Pinsry?",
    "Hi! 😄 I'm here to make Pinsry easy for you. How can I help?",
    "Hello there! 🚀 Welcome to Pinsry Support. What's your question?",
];

pub const DEFAULTS: &[&str] = &[
    "I'd love to help! 😊 Could you tell me a bit more? I know about writing stories, bookmarks, following authors, notifications, reading, search and more.",
    "Interesting! 🤔 I'm here for all things Pinsry. Try asking about creating stories, bookmarks, following people, account settings or reading features.",
    "Happy to help! 🌟 Whether it's writing, managing your account, discovering stories or any other feature, just tell me what you'd like to learn.",
    "I'm here for you! 💪 Ask me about creating stories, using bookmarks, following authors, notifications, reading, searching or any other Pinsry feature.",
    "Good question! 🚀 I can explain story creation, bookmarks, following, notifications, reading, discovery, interactions and account management. Which one?",
    "I'm the Pinsry Assistant! 😄 I can help with writing stories, saving bookmarks, following authors, notifications, reading and searching. What do you need?",
];

pub const CREATOR: &str = "Pinsry was created by **Luohino**! 🚀 Luohino designed and built the app as a home for writers and readers to meet through stories.\n\n**About Luohino:**\n• Passionate about storytelling and technology\n• Built Pinsry from the ground up\n• Keeps improving it based on community feedback\n\nWant to get in touch? Ask me how to contact Luohino!";

pub const STORY_CREATION: &str = "Writing a story on Pinsry is simple! 📝\n\n**Getting Started:**\n1. **Tap the '+' button** in the bottom bar\n2. **Choose 'Create Story'**\n3. **Add a title** that tells readers what to expect\n4. **Write your content** and add images if you like\n5. **Preview** to check how it looks\n6. **Tap 'Publish'** to share it\n\n**Tips:**\n• Save a **draft** any time and finish later\n• Add **tags** so readers can find your story";

pub const BOOKMARKS: &str = "Bookmarking stories is easy! 🔖\n\n**How to Bookmark:**\n1. **Find the bookmark icon** (🔖) on any story card\n2. **Tap it** to save the story\n3. The icon turns **solid** once saved\n4. Open **Bookmarks** in the navigation to see everything you saved\n\n**Good to know:**\n• There's no limit on bookmarks\n• Tap the icon again to remove a bookmark";

pub const FOLLOWING: &str = "Following authors keeps their new stories in your feed! 👥\n\n**How to Follow:**\n1. **Open an author's profile** by tapping their name or picture\n2. **Tap 'Follow'**\n3. The button changes to **'Following'**\n4. Their new stories now appear in your **feed**\n\n**Managing:**\n• See everyone you follow from your profile\n• Tap **'Following'** again to unfollow";

pub const NOTIFICATIONS: &str = "Stay up to date with notifications! 🔔\n\n**Where to Find Them:**\n• Tap the **bell icon** at the top of your feed\n• A **badge** shows how many are unread\n\n**You'll Hear About:**\n• New stories from authors you follow\n• Likes and comments on your stories\n• New followers\n\n**Settings:**\n• Turn each type on or off under **Settings → Notifications**";

pub const OFFLINE: &str = "Yes, Pinsry works offline! 📱✈️\n\n**How It Works:**\n• Stories you open are **cached automatically**\n• Your **reading position syncs** when you reconnect\n\n**Before You Go Offline:**\n• Open the stories you want to read while connected\n• Bookmarked stories are kept ready for offline reading\n\nPerfect for flights and commutes!";

pub const ACCOUNT: &str = "Managing your account is easy! ⚙️\n\n**Profile Settings:**\n• **Display name** and **bio**\n• **Profile picture** and cover photo\n\n**Account Settings:**\n• Change your **email** or **password**\n• Pick your **preferences** for notifications and privacy\n\nOpen your **Profile** and tap the **gear icon** to get started.";

pub const READING: &str = "Reading on Pinsry is a pleasure! 📖\n\n**Finding Stories:**\n• Your **feed** shows stories picked for you\n• **Discover** lists new and trending stories\n• **Bookmarks** keeps the ones you saved\n\n**While Reading:**\n• Scroll to read, tap images to enlarge them\n• Like, comment or share from the bottom of the story";

pub const SEARCH: &str = "Discovering stories is easy! 🔍\n\n**Search:**\n• Use the **search bar** at the top\n• Search by **title**, **author** or **tag**\n\n**Explore:**\n• **Discover** shows trending and new stories\n• Tap a **tag** on any story to browse similar ones";

pub const INTERACTIONS: &str = "Interacting with stories shows authors some love! ❤️\n\n**Likes:**\n• Tap the **heart icon** on a story; it turns red\n• Tap again to unlike\n\n**Comments:**\n• Tap the **comment icon** to join the conversation\n\n**Sharing:**\n• Tap **share** to send a story to friends or other apps";

pub const FEATURES: &str = "Here's what Pinsry can do! 🌟\n\n**📝 Story Creation** - Write and publish stories\n**📖 Reading** - A clean reading experience\n**🔖 Bookmarks** - Save stories for later\n**👥 Following** - Keep up with favourite authors\n**🔔 Notifications** - Know when something happens\n**📱 Offline Reading** - Read without a connection\n**🔍 Search** - Find stories and authors\n**❤️ Interactions** - Like, comment and share\n\nWhich one would you like to know more about?";

pub const PROBLEMS: &str = "Sorry you're running into trouble! 😔\n\n**Quick Fixes:**\n• Close and reopen the app\n• Check for an **app update**\n• Make sure your connection is stable\n• Restart your device\n\n**Still stuck?**\n• Email **support@pinsry.com**\n• Describe what happened and which device you use";

pub const THANKS: &str = "You're very welcome! 😊 Pinsry is all about bringing people together through stories, and I'm glad I could help.\n\nAnything else you'd like to know? 🌟";

pub const GENERAL_HELP: &str = "I'm here to help! 🤗 I can assist with:\n\n**📝 Creating & Writing Stories**\n**📖 Reading & Discovering**\n**🔖 Bookmarks**\n**👥 Following Authors**\n**🔔 Notifications**\n**📱 Offline Reading**\n**🔍 Searching**\n**❤️ Likes & Comments**\n**⚙️ Account & Settings**\n\nWhat would you like to know?";

pub const NAVIGATION: &str = "Getting around Pinsry is easy! 🗺️\n\n**Bottom Bar:**\n• **Feed** - your story feed\n• **Discover** - trending and new stories\n• **Bookmarks** - what you saved\n• **Profile** - your account and stories\n• **+** - create something new\n\n**Top Bar:**\n• **Search** and **notifications**";

pub const EDITING: &str = "Managing your stories is easy! ✏️\n\n**Editing a Story:**\n1. Go to your **Profile**\n2. Open the story\n3. Tap **'Edit'**\n4. Make your changes and tap **'Save'**\n\n**Other Options:**\n• **Unpublish** to hide a story without deleting it\n• **Delete** removes it permanently\n• **Drafts** stay private until you publish";

pub const COMMUNITY: &str = "The Pinsry community is wonderful! 🤝\n\n**Getting Involved:**\n• **Follow authors** you enjoy\n• **Comment** on stories to start discussions\n• **Share** stories with friends\n• **Support** writers with likes\n\nBe kind and have fun!";

pub const CONTACT: &str = "Here's how to reach **Luohino**, the creator of Pinsry! 🚀\n\n**Links:**\n• **Portfolio**: luohino.github.io/luohino\n• **GitHub**: github.com/luohino\n• **Email**: luohino.pinsry@gmail.com\n\nFor app support, email **support@pinsry.com**.";

pub const PRIVACY: &str = "Your privacy and safety matter on Pinsry! 🔒\n\n**Privacy Settings:**\n• Control who can see your **profile** and **stories**\n• Approve **follow requests**\n\n**Safety Tools:**\n• **Block** users you don't want to hear from\n• **Report** inappropriate content or harassment from the story menu\n\nOur team reviews every report.";
