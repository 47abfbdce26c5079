use crate::channel::{Channel, Receiver, Sender};

/// Control commands for animations registered in a
/// [`FrameScheduler`](crate::FrameScheduler)
///
/// Slot numbers are the values returned by `FrameScheduler::add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigCommand {
    /// Resume one animation
    Start(usize),
    /// Pause one animation
    Stop(usize),
    /// Pause a running animation or resume a stopped one
    Toggle(usize),
    /// Resume every animation
    StartAll,
    /// Pause every animation
    StopAll,
}

/// Type alias for command sender
pub type CommandSender<'a, const SIZE: usize> = Sender<'a, RigCommand, SIZE>;

/// Type alias for command receiver
pub type CommandReceiver<'a, const SIZE: usize> = Receiver<'a, RigCommand, SIZE>;

/// Type alias for the command channel
pub type CommandChannel<const SIZE: usize> = Channel<RigCommand, SIZE>;
