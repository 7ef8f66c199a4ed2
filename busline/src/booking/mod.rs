//! Seat reservation and booking notifications.
//!
//! [`BookingEngine::reserve`] is the only way seat counts change. After a
//! reservation commits, the engine hands `(route, seats)` to every observer
//! in its [`ObserverRegistry`].

mod engine;
mod observer;

#[cfg(test)]
mod proptests;

pub use engine::{Booking, BookingEngine, ReserveOutcome};
pub use observer::{
    BookingEvent, BookingObserver, CallbackObserver, ChannelObserver, ConsoleObserver,
    DeliveryFailure, NotifyReport, ObserverError, ObserverRegistry, SubscriptionId,
};
