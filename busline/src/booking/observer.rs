//! Booking observers and the registry that fans events out to them.
//!
//! Delivery is synchronous and ordered by subscription. Each observer runs
//! in isolation: an error or a panic in one is recorded in the
//! [`NotifyReport`] and delivery moves on to the next.

use std::fmt;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::route::Route;

/// Failure reported by an observer while handling a booking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ObserverError {
    message: String,
}

impl ObserverError {
    /// Creates an observer error with a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Something that wants to hear about every completed booking.
///
/// Observers are called after the seat count has been durably written and
/// after the route lock has been released, so they may query the catalog or
/// reserve again without deadlocking.
pub trait BookingObserver: Send + Sync {
    /// Handles one completed booking of `seats` seats. `route` carries the
    /// post-booking availability.
    ///
    /// # Errors
    ///
    /// Returns an error if the observer could not process the event. The
    /// booking itself is unaffected.
    fn on_booking(&self, route: &Route, seats: u32) -> Result<(), ObserverError>;

    /// A short name used in logs and failure reports.
    fn name(&self) -> &str {
        "observer"
    }
}

/// Registration handle returned by [`ObserverRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Returns the raw handle value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One observer that failed to take a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryFailure {
    /// Which subscription failed.
    pub subscription: SubscriptionId,
    /// The observer's [`name`](BookingObserver::name).
    pub observer: String,
    /// The error message or panic payload.
    pub reason: String,
}

/// Outcome of one fan-out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotifyReport {
    /// Observers that handled the event successfully.
    pub delivered: usize,
    /// Observers that returned an error or panicked.
    pub failures: Vec<DeliveryFailure>,
}

impl NotifyReport {
    /// True when every observer took the event.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of observers the event was offered to.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.delivered + self.failures.len()
    }
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Arc<dyn BookingObserver>)>,
}

/// Ordered set of booking observers.
///
/// The registry is shared between the engine and anything that wants to
/// manage subscriptions; all methods take `&self`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use busline::booking::{CallbackObserver, ObserverRegistry};
///
/// let registry = ObserverRegistry::new();
/// let id = registry.subscribe(Arc::new(CallbackObserver::new(|_, _| Ok(()))));
/// assert_eq!(registry.len(), 1);
/// assert!(registry.unsubscribe(id));
/// assert!(!registry.unsubscribe(id));
/// ```
#[derive(Default)]
pub struct ObserverRegistry {
    subscribers: Mutex<Subscribers>,
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("subscribers", &self.len())
            .finish()
    }
}

impl ObserverRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn subscribers(&self) -> MutexGuard<'_, Subscribers> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds an observer at the end of the delivery order.
    ///
    /// Subscribing the same observer twice yields two handles and two
    /// deliveries per booking.
    pub fn subscribe(&self, observer: Arc<dyn BookingObserver>) -> SubscriptionId {
        let mut subs = self.subscribers();
        subs.next_id += 1;
        let id = SubscriptionId(subs.next_id);
        log::debug!("subscribed observer '{}' as {id}", observer.name());
        subs.entries.push((id, observer));
        id
    }

    /// Removes a subscription. Returns `false` if it was not present.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscribers();
        let before = subs.entries.len();
        subs.entries.retain(|(sid, _)| *sid != id);
        let removed = subs.entries.len() != before;
        if removed {
            log::debug!("unsubscribed observer {id}");
        }
        removed
    }

    /// Number of active subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers().entries.len()
    }

    /// True when nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers `(route, seats)` to every current subscriber, in order.
    ///
    /// The subscriber list is copied before delivery starts, so observers
    /// may subscribe or unsubscribe from inside their callback; such changes
    /// take effect from the next notification.
    pub fn notify(&self, route: &Route, seats: u32) -> NotifyReport {
        let snapshot: Vec<_> = self.subscribers().entries.clone();
        let mut report = NotifyReport::default();

        for (id, observer) in snapshot {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                observer.on_booking(route, seats)
            }));
            let reason = match outcome {
                Ok(Ok(())) => {
                    report.delivered += 1;
                    continue;
                }
                Ok(Err(err)) => err.to_string(),
                Err(payload) => panic_message(payload.as_ref()),
            };
            log::warn!(
                "observer '{}' ({id}) failed on route {}: {reason}",
                observer.name(),
                route.id()
            );
            report.failures.push(DeliveryFailure {
                subscription: id,
                observer: observer.name().to_owned(),
                reason,
            });
        }

        report
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_owned()
    }
}

/// An owned booking notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingEvent {
    /// The route after the booking.
    pub route: Route,
    /// How many seats were booked.
    pub seats: u32,
}

/// Observer backed by a closure.
pub struct CallbackObserver<F> {
    name: String,
    callback: F,
}

impl<F> CallbackObserver<F>
where
    F: Fn(&Route, u32) -> Result<(), ObserverError> + Send + Sync,
{
    /// Wraps `callback` under the default name `callback`.
    pub fn new(callback: F) -> Self {
        Self::named("callback", callback)
    }

    /// Wraps `callback` under `name`.
    pub fn named(name: impl Into<String>, callback: F) -> Self {
        Self {
            name: name.into(),
            callback,
        }
    }
}

impl<F> BookingObserver for CallbackObserver<F>
where
    F: Fn(&Route, u32) -> Result<(), ObserverError> + Send + Sync,
{
    fn on_booking(&self, route: &Route, seats: u32) -> Result<(), ObserverError> {
        (self.callback)(route, seats)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Observer that forwards each booking as a [`BookingEvent`] on a channel.
///
/// Useful for handing events to another thread, the way a push connection
/// would hand them to a remote client.
pub struct ChannelObserver {
    name: String,
    sender: Sender<BookingEvent>,
}

impl ChannelObserver {
    /// Creates an observer together with the receiving end of its channel.
    #[must_use]
    pub fn new(name: impl Into<String>) -> (Self, Receiver<BookingEvent>) {
        let (sender, receiver) = mpsc::channel();
        (Self::with_sender(name, sender), receiver)
    }

    /// Creates an observer over an existing sender.
    #[must_use]
    pub fn with_sender(name: impl Into<String>, sender: Sender<BookingEvent>) -> Self {
        Self {
            name: name.into(),
            sender,
        }
    }
}

impl BookingObserver for ChannelObserver {
    fn on_booking(&self, route: &Route, seats: u32) -> Result<(), ObserverError> {
        self.sender
            .send(BookingEvent {
                route: route.clone(),
                seats,
            })
            .map_err(|_| ObserverError::new("receiver disconnected"))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Observer that writes one line per booking to a sink.
pub struct ConsoleObserver {
    name: String,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleObserver {
    /// Writes to `sink`.
    pub fn new(name: impl Into<String>, sink: Box<dyn Write + Send>) -> Self {
        Self {
            name: name.into(),
            sink: Mutex::new(sink),
        }
    }

    /// Writes to standard error.
    #[must_use]
    pub fn stderr(name: impl Into<String>) -> Self {
        Self::new(name, Box::new(io::stderr()))
    }
}

impl BookingObserver for ConsoleObserver {
    fn on_booking(&self, route: &Route, seats: u32) -> Result<(), ObserverError> {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(
            sink,
            "[{}] {seats} seat(s) booked on route {} ({} → {}), {} left",
            self.name,
            route.id(),
            route.source_city(),
            route.destination_city(),
            route.available_seats()
        )
        .and_then(|()| sink.flush())
        .map_err(|e| ObserverError::new(e.to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{RouteDraft, RouteId};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn route() -> Route {
        RouteDraft::new("Bucharest", "Brașov", "08:00", "10:30", 40, 50.0)
            .unwrap()
            .into_route(RouteId::new(1))
            .unwrap()
    }

    fn counting(counter: &Arc<AtomicUsize>) -> Arc<dyn BookingObserver> {
        let counter = Arc::clone(counter);
        Arc::new(CallbackObserver::new(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }))
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_notify_in_subscription_order() {
        let registry = ObserverRegistry::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for tag in ["a", "b", "c"] {
            let order = Arc::clone(&order);
            registry.subscribe(Arc::new(CallbackObserver::new(move |_, _| {
                order.lock().unwrap().push(tag);
                Ok(())
            })));
        }

        let report = registry.notify(&route(), 2);
        assert_eq!(report.delivered, 3);
        assert!(report.is_clean());
        assert_eq!(*order.lock().unwrap(), ["a", "b", "c"]);
    }

    #[test]
    fn test_unsubscribed_observer_not_notified() {
        let registry = ObserverRegistry::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        registry.subscribe(counting(&first));
        let id = registry.subscribe(counting(&second));

        assert!(registry.unsubscribe(id));
        registry.notify(&route(), 1);

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unsubscribe_absent_is_noop() {
        let registry = ObserverRegistry::new();
        assert!(!registry.unsubscribe(SubscriptionId(42)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_failing_observer_does_not_stop_fanout() {
        let registry = ObserverRegistry::new();
        let after = Arc::new(AtomicUsize::new(0));
        let failing = registry.subscribe(Arc::new(CallbackObserver::named("broken", |_, _| {
            Err(ObserverError::new("socket closed"))
        })));
        registry.subscribe(counting(&after));

        let report = registry.notify(&route(), 1);
        assert_eq!(report.delivered, 1);
        assert_eq!(report.attempted(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].subscription, failing);
        assert_eq!(report.failures[0].observer, "broken");
        assert_eq!(report.failures[0].reason, "socket closed");
        assert_eq!(after.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_observer_is_isolated() {
        let registry = ObserverRegistry::new();
        let after = Arc::new(AtomicUsize::new(0));
        registry.subscribe(Arc::new(CallbackObserver::new(|_, _| panic!("boom"))));
        registry.subscribe(counting(&after));

        let report = registry.notify(&route(), 1);
        assert_eq!(report.delivered, 1);
        assert!(report.failures[0].reason.contains("boom"));
        assert_eq!(after.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscribe_during_notify_applies_next_time() {
        let registry = Arc::new(ObserverRegistry::new());
        let late = Arc::new(AtomicUsize::new(0));
        {
            let registry2 = Arc::clone(&registry);
            let late = Arc::clone(&late);
            registry.subscribe(Arc::new(CallbackObserver::new(move |_, _| {
                registry2.subscribe(counting(&late));
                Ok(())
            })));
        }

        assert_eq!(registry.notify(&route(), 1).attempted(), 1);
        assert_eq!(late.load(Ordering::SeqCst), 0);
        registry.notify(&route(), 1);
        assert_eq!(late.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_channel_observer() {
        let (observer, rx) = ChannelObserver::new("push");
        observer.on_booking(&route(), 3).unwrap();
        let event = rx.recv().unwrap();
        assert_eq!(event.seats, 3);
        assert_eq!(event.route.id(), RouteId::new(1));

        drop(rx);
        assert!(observer.on_booking(&route(), 1).is_err());
    }

    #[test]
    fn test_console_observer_line() {
        let buf = SharedBuf::default();
        let observer = ConsoleObserver::new("session-1", Box::new(buf.clone()));
        observer.on_booking(&route(), 2).unwrap();

        let out = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(
            out,
            "[session-1] 2 seat(s) booked on route 1 (Bucharest → Brașov), 40 left\n"
        );
    }

    #[test]
    fn test_subscription_ids_increase() {
        let registry = ObserverRegistry::new();
        let a = registry.subscribe(Arc::new(CallbackObserver::new(|_, _| Ok(()))));
        let b = registry.subscribe(Arc::new(CallbackObserver::new(|_, _| Ok(()))));
        assert!(b > a);
        assert_eq!(a.to_string(), format!("#{}", a.value()));
    }
}
