// Central constants: user-facing texts, the badge sentinel and scheduling defaults.

/// Badge reported when the cache has no badge for a user.
pub const UNKNOWN_BADGE: &str = "UNKNOWN";

pub const DEFAULT_REMINDER_TIME: &str = "22:00";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_REFRESH_WARMUP_SECS: u64 = 10;
pub const DEFAULT_SHEET_PATH: &str = "stepsbot.csv";

/// Upper bound on any single store or delivery call so a stalled external
/// service cannot wedge the scheduler loops.
pub const EXTERNAL_CALL_TIMEOUT_SECS: u64 = 30;

// Dialogue texts. Plain text only; anything richer is out of scope.
pub const MSG_ASK_FIRST_NAME: &str = "📝 Please enter your first name:";
pub const MSG_ASK_LAST_NAME: &str = "📝 Now your last name:";
pub const MSG_ASK_BADGE: &str = "🔢 Enter your badge number:";
pub const MSG_EMPTY_INPUT: &str = "❌ That cannot be empty. Please enter it again:";
pub const MSG_ALREADY_REGISTERED: &str =
    "✅ You are already registered! Send a photo and your step count.";
pub const MSG_REGISTERED: &str = "✅ Registration complete!\n📸 Now send a photo:";
pub const MSG_REGISTRATION_ERROR: &str = "❌ Registration failed. Please try again with /start.";
pub const MSG_NOT_A_PHOTO: &str = "❌ That is not a photo! Please send a photo:";
pub const MSG_ASK_STEPS: &str = "🔢 Now enter your step count:";
pub const MSG_NOT_A_NUMBER: &str = "❌ Please enter a whole number!";
pub const MSG_SAVED: &str = "✅ Data saved!\n🕒 Your next submission opens tomorrow.";
pub const MSG_SAVE_ERROR: &str = "❌ Could not save your submission. Please try again later.";
pub const MSG_CANCELLED: &str = "❌ Operation cancelled.";
pub const MSG_ALREADY_SUBMITTED_TODAY: &str =
    "⏳ You already submitted today. The next submission opens tomorrow!";
pub const MSG_SEND_PHOTO_FIRST: &str = "📸 To submit, first send a photo, then your step count.";
pub const MSG_REGISTER_FIRST: &str = "📝 Please register first with /start.";
pub const MSG_REMINDER: &str = "⏰ Reminder: don't forget to submit today's photo and step count!";
