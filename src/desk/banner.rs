//! Timed feedback banners.
//!
//! There are two independent slots, a success *message* and an *error*.
//! Every banner shown gets a fresh ticket. The auto-clear timer carries that
//! ticket and clears the slot only if it still holds the same banner.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Message,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub ticket: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banners {
    message: Option<Banner>,
    error: Option<Banner>,
    next_ticket: u64,
}

impl Banners {
    /// Puts `text` in the `kind` slot, replacing whatever was there.
    /// Returns the ticket the expiry must present.
    pub fn show(&mut self, kind: BannerKind, text: impl Into<String>) -> u64 {
        self.next_ticket += 1;
        let banner = Banner {
            text: text.into(),
            ticket: self.next_ticket,
        };
        *self.slot_mut(kind) = Some(banner);
        self.next_ticket
    }

    /// Clears the `kind` slot if it still shows the banner with `ticket`.
    pub fn expire(&mut self, kind: BannerKind, ticket: u64) -> bool {
        let slot = self.slot_mut(kind);
        if slot.as_ref().is_some_and(|b| b.ticket == ticket) {
            *slot = None;
            true
        } else {
            false
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|b| b.text.as_str())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(|b| b.text.as_str())
    }

    fn slot_mut(&mut self, kind: BannerKind) -> &mut Option<Banner> {
        match kind {
            BannerKind::Message => &mut self.message,
            BannerKind::Error => &mut self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_independent() {
        let mut banners = Banners::default();
        banners.show(BannerKind::Message, "Book created successfully.");
        banners.show(BannerKind::Error, "Book name and price are required.");

        assert_eq!(banners.message(), Some("Book created successfully."));
        assert_eq!(banners.error(), Some("Book name and price are required."));
    }

    #[test]
    fn expiry_only_clears_its_own_banner() {
        let mut banners = Banners::default();
        let first = banners.show(BannerKind::Message, "Book created successfully.");
        let second = banners.show(BannerKind::Message, "Book deleted successfully.");

        assert!(!banners.expire(BannerKind::Message, first));
        assert_eq!(banners.message(), Some("Book deleted successfully."));

        assert!(banners.expire(BannerKind::Message, second));
        assert_eq!(banners.message(), None);
    }

    #[test]
    fn expiry_does_not_cross_slots() {
        let mut banners = Banners::default();
        let ticket = banners.show(BannerKind::Error, "boom");
        assert!(!banners.expire(BannerKind::Message, ticket));
        assert_eq!(banners.error(), Some("boom"));
    }
}
