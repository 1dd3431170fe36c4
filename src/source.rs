use crate::packet::StampedPacket;

/// Something that delivers raw input packets when pumped.
///
/// Implementations must be non-blocking: `pump` hands over everything queued so far,
/// in arrival order, and returns as soon as the queue is empty.
pub trait EventSource {
    fn pump(&mut self, sink: &mut dyn FnMut(StampedPacket));
    /// Release OS resources. Must be safe to call more than once.
    fn close(&mut self);
    fn is_open(&self) -> bool;
}
