// ── Status badges ──

use serde::Serialize;
use strum::{AsRefStr, Display};

/// Visual class of a badge. Front ends map these to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BadgeStyle {
    Ok,
    Low,
    Critical,
    Transit,
    Delay,
    Neutral,
    Success,
}

/// A styled status label. `text` is always the status exactly as the
/// backend sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub style: BadgeStyle,
    pub text: String,
}

impl Badge {
    /// Derive the badge for a raw backend status.
    ///
    /// Matching ignores case and surrounding whitespace; unknown statuses
    /// get [`BadgeStyle::Neutral`] and keep their literal text.
    pub fn from_status(status: &str) -> Self {
        let style = match status.trim().to_ascii_uppercase().as_str() {
            "OK" => BadgeStyle::Ok,
            "LOW" => BadgeStyle::Low,
            "REORDER" | "CRITICAL" => BadgeStyle::Critical,
            "IN_TRANSIT" => BadgeStyle::Transit,
            "DELAYED" => BadgeStyle::Delay,
            "DELIVERED" => BadgeStyle::Success,
            _ => BadgeStyle::Neutral,
        };
        Self {
            style,
            text: status.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_map_to_styles() {
        let cases = [
            ("OK", BadgeStyle::Ok),
            ("LOW", BadgeStyle::Low),
            ("REORDER", BadgeStyle::Critical),
            ("CRITICAL", BadgeStyle::Critical),
            ("IN_TRANSIT", BadgeStyle::Transit),
            ("DELAYED", BadgeStyle::Delay),
            ("SCHEDULED", BadgeStyle::Neutral),
            ("DELIVERED", BadgeStyle::Success),
        ];
        for (status, style) in cases {
            let badge = Badge::from_status(status);
            assert_eq!(badge.style, style, "status {status}");
            assert_eq!(badge.text, status);
        }
    }

    #[test]
    fn matching_ignores_case_and_whitespace() {
        let badge = Badge::from_status("  delivered ");
        assert_eq!(badge.style, BadgeStyle::Success);
        assert_eq!(badge.text, "  delivered ");
    }

    #[test]
    fn unknown_status_is_neutral_literal() {
        let badge = Badge::from_status("ON_HOLD");
        assert_eq!(badge.style, BadgeStyle::Neutral);
        assert_eq!(badge.text, "ON_HOLD");

        let empty = Badge::from_status("");
        assert_eq!(empty.style, BadgeStyle::Neutral);
        assert_eq!(empty.text, "");
    }

    #[test]
    fn style_names_are_lowercase() {
        assert_eq!(BadgeStyle::Transit.to_string(), "transit");
        assert_eq!(BadgeStyle::Success.as_ref(), "success");
    }
}
