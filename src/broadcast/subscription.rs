//! # Subscription: read side of an endpoint.
//!
//! A [`Subscription`] yields every value published after it was created, in
//! publish order, then `None` once the broadcaster is closed.
//!
//! ## Consuming
//! - [`Subscription::recv`] async receive
//! - [`Subscription::try_recv`] non-blocking receive
//! - [`futures::Stream`] impl for combinator use
//!
//! ## Rules
//! - Only the broadcaster ends the stream; consumers never close it.
//! - Dropping a subscription detaches it: later publishes skip it.
//! - An idle (not dropped) rendezvous subscription blocks the publisher.

use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures::Stream;
use futures::stream::FusedStream;
use tokio::sync::mpsc;

use crate::error::TryRecvError;

use super::endpoint::Envelope;

/// Receiving half of one broadcaster endpoint.
pub struct Subscription<T> {
    id: u64,
    rx: mpsc::Receiver<Envelope<T>>,
    terminated: bool,
}

impl<T> Subscription<T> {
    pub(crate) fn new(id: u64, rx: mpsc::Receiver<Envelope<T>>) -> Self {
        Self {
            id,
            rx,
            terminated: false,
        }
    }

    /// Position of this subscription in subscription order (starting at 0).
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Receives the next value.
    ///
    /// Returns `None` once the broadcaster is closed and every value published
    /// before the close has been received. Later calls keep returning `None`.
    pub async fn recv(&mut self) -> Option<T> {
        std::future::poll_fn(|cx| self.poll_recv(cx)).await
    }

    /// Polls for the next value.
    pub fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<Option<T>> {
        if self.terminated {
            return Poll::Ready(None);
        }
        match ready!(self.rx.poll_recv(cx)) {
            Some(envelope) => Poll::Ready(Some(envelope.open())),
            None => {
                self.terminated = true;
                Poll::Ready(None)
            }
        }
    }

    /// Takes a value if one is being offered right now.
    ///
    /// # Errors
    /// - [`TryRecvError::Empty`] if nothing is pending and the topic is open
    /// - [`TryRecvError::Closed`] after end-of-stream
    pub fn try_recv(&mut self) -> Result<T, TryRecvError> {
        if self.terminated {
            return Err(TryRecvError::Closed);
        }
        match self.rx.try_recv() {
            Ok(envelope) => Ok(envelope.open()),
            Err(mpsc::error::TryRecvError::Empty) => Err(TryRecvError::Empty),
            Err(mpsc::error::TryRecvError::Disconnected) => {
                self.terminated = true;
                Err(TryRecvError::Closed)
            }
        }
    }

    /// True once end-of-stream has been observed.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}

// Never pin-projected; the receiver is moved freely.
impl<T> Unpin for Subscription<T> {}

impl<T> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.get_mut().poll_recv(cx)
    }
}

impl<T> FusedStream for Subscription<T> {
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("terminated", &self.terminated)
            .finish()
    }
}
