//! Point-to-point messaging between ranks.
//!
//! The engine never addresses a peer by anything but its rank, computed by
//! rank arithmetic (`rank - 1`, `rank + 1`, [`COORDINATOR`]). The
//! [`Communicator`] trait is the whole contract a process-group backend has
//! to meet: know this worker's rank and the group size, send a message to a
//! rank, and block until the next message from a given rank arrives.
//!
//! [`ChannelGroup`] builds an in-process group: a full mesh of unbounded
//! crossbeam channels, one per ordered `(source, destination)` pair. Each
//! pair is FIFO and sends never block, so a worker may send to itself (the
//! coordinator does, when distributing) and the fixed exchange order cannot
//! deadlock on a full buffer. Dropping a [`ChannelCommunicator`] closes all
//! of its outgoing channels; a peer blocked on it then sees
//! [`CommError::Disconnected`] instead of waiting forever.
//!
//! [`COORDINATOR`]: crate::COORDINATOR

use std::error::Error;
use std::fmt;

use crossbeam_channel::{unbounded, Receiver, Sender};
use lifeslab_core::{HaloRow, SimulationParameters, Slice};
use tracing::trace;

// ── Tag / Message ──────────────────────────────────────────────────

/// Kind of a message, one per channel of the protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Coordinator → every worker: run parameters.
    Parameters,
    /// Coordinator → every worker: the worker's initial slice.
    InitialSlice,
    /// Worker → `rank + 1`: the sender's bottom row.
    HaloDown,
    /// Worker → `rank - 1`: the sender's top row.
    HaloUp,
    /// Worker → coordinator: the worker's final slice.
    FinalSlice,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parameters => "parameters",
            Self::InitialSlice => "initial-slice",
            Self::HaloDown => "halo-down",
            Self::HaloUp => "halo-up",
            Self::FinalSlice => "final-slice",
        };
        f.write_str(name)
    }
}

/// A protocol message. Payloads are owned copies; nothing is shared
/// between workers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    /// See [`Tag::Parameters`].
    Parameters(SimulationParameters),
    /// See [`Tag::InitialSlice`].
    InitialSlice(Slice),
    /// See [`Tag::HaloDown`].
    HaloDown(HaloRow),
    /// See [`Tag::HaloUp`].
    HaloUp(HaloRow),
    /// See [`Tag::FinalSlice`].
    FinalSlice(Slice),
}

impl Message {
    /// The message's tag.
    pub fn tag(&self) -> Tag {
        match self {
            Self::Parameters(_) => Tag::Parameters,
            Self::InitialSlice(_) => Tag::InitialSlice,
            Self::HaloDown(_) => Tag::HaloDown,
            Self::HaloUp(_) => Tag::HaloUp,
            Self::FinalSlice(_) => Tag::FinalSlice,
        }
    }
}

// ── CommError ──────────────────────────────────────────────────────

/// Errors from sending or receiving protocol messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommError {
    /// The peer's endpoint is gone (it finished, aborted, or panicked).
    Disconnected {
        /// Rank of the peer.
        peer: usize,
    },
    /// A rank outside `[0, size)` was addressed.
    InvalidRank {
        /// The addressed rank.
        rank: usize,
        /// Group size.
        size: usize,
    },
    /// The next message from a peer was not the one the protocol expects.
    UnexpectedMessage {
        /// Rank of the peer.
        peer: usize,
        /// Expected tag.
        expected: Tag,
        /// Tag actually received.
        found: Tag,
    },
    /// A received row or slice does not match the negotiated dimensions.
    /// Shapes are `(rows, columns)`; a halo row is one row.
    ShapeMismatch {
        /// Rank of the peer.
        peer: usize,
        /// Tag of the offending message.
        tag: Tag,
        /// Negotiated shape.
        expected: (usize, usize),
        /// Received shape.
        found: (usize, usize),
    },
}

impl fmt::Display for CommError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected { peer } => write!(f, "peer {peer} disconnected"),
            Self::InvalidRank { rank, size } => {
                write!(f, "rank {rank} out of range for group of {size}")
            }
            Self::UnexpectedMessage {
                peer,
                expected,
                found,
            } => {
                write!(f, "expected {expected} from peer {peer}, got {found}")
            }
            Self::ShapeMismatch {
                peer,
                tag,
                expected: (er, ec),
                found: (fr, fc),
            } => {
                write!(
                    f,
                    "{tag} from peer {peer} is {fr}x{fc}, expected {er}x{ec}"
                )
            }
        }
    }
}

impl Error for CommError {}

// ── Communicator ───────────────────────────────────────────────────

/// A worker's view of its process group.
///
/// `recv` blocks with no timeout. Messages from one source arrive in the
/// order they were sent.
pub trait Communicator {
    /// This worker's rank, in `[0, size)`.
    fn rank(&self) -> usize;

    /// Number of workers in the group.
    fn size(&self) -> usize;

    /// Send `message` to rank `dest`.
    fn send(&self, dest: usize, message: Message) -> Result<(), CommError>;

    /// Block until the next message from rank `source` arrives.
    fn recv(&self, source: usize) -> Result<Message, CommError>;

    /// Receive the run parameters from `source`.
    fn recv_parameters(&self, source: usize) -> Result<SimulationParameters, CommError> {
        match self.recv(source)? {
            Message::Parameters(p) => Ok(p),
            other => Err(unexpected(source, Tag::Parameters, &other)),
        }
    }

    /// Receive a slice tagged `tag` from `source` and check it is
    /// `params.slice_rows` by `params.columns`.
    fn recv_slice(
        &self,
        source: usize,
        tag: Tag,
        params: &SimulationParameters,
    ) -> Result<Slice, CommError> {
        let slice = match (tag, self.recv(source)?) {
            (Tag::InitialSlice, Message::InitialSlice(s)) => s,
            (Tag::FinalSlice, Message::FinalSlice(s)) => s,
            (_, other) => return Err(unexpected(source, tag, &other)),
        };
        check_shape(
            source,
            tag,
            params.slice_shape(),
            (slice.rows(), slice.columns()),
        )?;
        Ok(slice)
    }

    /// Receive a halo row tagged `tag` from `source` and check it holds
    /// `expected_len` cells.
    fn recv_row(&self, source: usize, tag: Tag, expected_len: usize) -> Result<HaloRow, CommError> {
        let row = match (tag, self.recv(source)?) {
            (Tag::HaloDown, Message::HaloDown(r)) => r,
            (Tag::HaloUp, Message::HaloUp(r)) => r,
            (_, other) => return Err(unexpected(source, tag, &other)),
        };
        check_shape(source, tag, (1, expected_len), (1, row.len()))?;
        Ok(row)
    }
}

fn unexpected(peer: usize, expected: Tag, found: &Message) -> CommError {
    CommError::UnexpectedMessage {
        peer,
        expected,
        found: found.tag(),
    }
}

fn check_shape(
    peer: usize,
    tag: Tag,
    expected: (usize, usize),
    found: (usize, usize),
) -> Result<(), CommError> {
    if expected != found {
        return Err(CommError::ShapeMismatch {
            peer,
            tag,
            expected,
            found,
        });
    }
    Ok(())
}

// ── ChannelGroup ───────────────────────────────────────────────────

/// Builder for an in-process group of [`ChannelCommunicator`]s.
pub struct ChannelGroup;

impl ChannelGroup {
    /// Create `size` fully connected communicators, indexed by rank.
    pub fn mesh(size: usize) -> Vec<ChannelCommunicator> {
        let mut outboxes: Vec<Vec<Sender<Message>>> =
            (0..size).map(|_| Vec::with_capacity(size)).collect();
        let mut inboxes: Vec<Vec<Receiver<Message>>> =
            (0..size).map(|_| Vec::with_capacity(size)).collect();

        // Outer loop over sources so inboxes[dest] ends up indexed by source.
        for (source, out) in outboxes.iter_mut().enumerate() {
            for (dest, inbox) in inboxes.iter_mut().enumerate() {
                let (tx, rx) = unbounded();
                debug_assert_eq!(out.len(), dest);
                debug_assert_eq!(inbox.len(), source);
                out.push(tx);
                inbox.push(rx);
            }
        }

        outboxes
            .into_iter()
            .zip(inboxes)
            .enumerate()
            .map(|(rank, (outboxes, inboxes))| ChannelCommunicator {
                rank,
                outboxes,
                inboxes,
            })
            .collect()
    }
}

/// One rank's endpoints in a [`ChannelGroup`].
///
/// `Send` but not shared: each worker thread owns its communicator.
pub struct ChannelCommunicator {
    rank: usize,
    /// `outboxes[dest]` sends to rank `dest`.
    outboxes: Vec<Sender<Message>>,
    /// `inboxes[source]` receives from rank `source`.
    inboxes: Vec<Receiver<Message>>,
}

impl Communicator for ChannelCommunicator {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.outboxes.len()
    }

    fn send(&self, dest: usize, message: Message) -> Result<(), CommError> {
        let tx = self.outboxes.get(dest).ok_or(CommError::InvalidRank {
            rank: dest,
            size: self.size(),
        })?;
        let tag = message.tag();
        tx.send(message)
            .map_err(|_| CommError::Disconnected { peer: dest })?;
        trace!(rank = self.rank, dest, %tag, "sent");
        Ok(())
    }

    fn recv(&self, source: usize) -> Result<Message, CommError> {
        let rx = self.inboxes.get(source).ok_or(CommError::InvalidRank {
            rank: source,
            size: self.size(),
        })?;
        let message = rx
            .recv()
            .map_err(|_| CommError::Disconnected { peer: source })?;
        trace!(rank = self.rank, source, tag = %message.tag(), "received");
        Ok(message)
    }
}

impl fmt::Debug for ChannelCommunicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelCommunicator")
            .field("rank", &self.rank)
            .field("size", &self.outboxes.len())
            .finish()
    }
}
