//! Inbound commands to the relay service.
//!
//! These represent actions requested by the outside world that the
//! [`RelayService`](super::service::RelayService) interprets and acts upon.
//! Lifecycle transitions are NOT commands — they arrive as
//! [`LifecycleEvent`](crate::fsm::LifecycleEvent)s from the host.

/// Commands that external surfaces can send into the relay core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayCommand {
    /// Set the published `is_relay_on` setting (remote-control surface).
    SetRelay(bool),
}
