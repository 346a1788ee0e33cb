/// Page share links point to when neither --base-url nor the config names one
pub(crate) const DEFAULT_SHARE_BASE_URL: &str = "http://localhost:8080/";

/// Confirmation shown after a share link lands on the clipboard
pub(crate) const SHARE_COPIED_MESSAGE: &str =
    "Link copied! Share it to let others see these exact calculator settings.";
