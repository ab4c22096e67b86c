//! Wait-for-signal-or-timeout.
//!
//! Every suspension point of the viewer (image loaded, next animation frame,
//! scroll settled, hide animation done) is one `Waiter`: a single parked
//! payload that is released either by a matching signal or, at the latest,
//! when its deadline passes. Arming again replaces whatever was parked, so a
//! stale request can never be released after a newer one.

/// How a parked payload was released.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wake {
    Ready,
    TimedOut,
}

#[derive(Debug)]
struct Parked<K, T> {
    key: K,
    payload: T,
    deadline_ms: f64,
}

#[derive(Debug)]
pub struct Waiter<K, T> {
    parked: Option<Parked<K, T>>,
}

impl<K, T> Default for Waiter<K, T> {
    fn default() -> Self {
        Self { parked: None }
    }
}

impl<K: PartialEq, T> Waiter<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `payload` until `key` is signalled or `timeout_ms` elapses.
    /// Returns the payload that was displaced, if any.
    pub fn arm(&mut self, key: K, payload: T, now_ms: f64, timeout_ms: f64) -> Option<T> {
        let deadline_ms = now_ms + timeout_ms.max(0.0);
        self.parked
            .replace(Parked { key, payload, deadline_ms })
            .map(|p| p.payload)
    }

    /// Release the payload if it waits on `key`.
    pub fn signal(&mut self, key: &K) -> Option<(T, Wake)> {
        if !matches!(&self.parked, Some(p) if &p.key == key) {
            return None;
        }
        self.parked.take().map(|p| (p.payload, Wake::Ready))
    }

    /// Release the payload if its deadline has passed.
    pub fn expire(&mut self, now_ms: f64) -> Option<(T, Wake)> {
        if !matches!(&self.parked, Some(p) if now_ms >= p.deadline_ms) {
            return None;
        }
        self.parked.take().map(|p| (p.payload, Wake::TimedOut))
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.parked.take().map(|p| p.payload)
    }

    /// Drop the parked payload only if `pred` matches it.
    pub fn cancel_if(&mut self, pred: impl FnOnce(&K, &T) -> bool) -> Option<T> {
        let hit = match &self.parked {
            Some(p) => pred(&p.key, &p.payload),
            None => false,
        };
        if hit { self.cancel() } else { None }
    }

    pub fn payload_mut(&mut self) -> Option<&mut T> {
        self.parked.as_mut().map(|p| &mut p.payload)
    }

    pub fn deadline_ms(&self) -> Option<f64> {
        self.parked.as_ref().map(|p| p.deadline_ms)
    }

    pub fn is_armed(&self) -> bool {
        self.parked.is_some()
    }
}
