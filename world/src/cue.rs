use glam::Vec3;

/// Id of a message text entry.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MessageId {
    pub section: u8,
    pub index: u16,
}

/// Presentation side effects for the display layer.
#[derive(Clone, PartialEq, Debug)]
pub enum Cue {
    /// Sparkle effect at a position.
    Sparkles(Vec3),
    /// Pop up the status bar briefly.
    OpenStatusBar,
    BlinkStarPoints,
    /// Show a message box.
    Message(MessageId),
    /// Short line of text on top of the screen.
    Notice(String),
    /// Show the frame that was captured on the given frame number.
    ShowFrame(u64),
}
