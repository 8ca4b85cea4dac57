//! トースト通知
//!
//! 表示側は投げっぱなし。配信保証はしない。

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Default,
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Default,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: Variant::Success,
            ..Self::new(title, description)
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: Variant::Destructive,
            ..Self::new(title, description)
        }
    }
}

/// 通知の表示先
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// 何もしない通知先
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Notifier for Silent {
    fn notify(&self, _notification: Notification) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_variant() {
        assert_eq!(Notification::new("a", "b").variant, Variant::Default);
        assert_eq!(Notification::success("a", "b").variant, Variant::Success);

        let n = Notification::destructive("Upload failed", "File too large");
        assert_eq!(n.variant, Variant::Destructive);
        assert_eq!(n.title, "Upload failed");
        assert_eq!(n.description, "File too large");
    }
}
