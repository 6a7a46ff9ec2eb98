//! RPC message framing and transmission as specified in RFC 5531 section 11
//! (Record Marking Standard).
//!
//! A stream transport carries records, each split into one or more fragments.
//! Every fragment is preceded by a 4-byte big-endian mark: the high bit flags
//! the last fragment of the record and the low 31 bits hold the fragment
//! length. This module reassembles inbound records, hands each complete record
//! to the [`Dispatcher`] on its own task, and encodes outbound records as a
//! single last fragment whose mark shares the pre-sized reply buffer.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::io::{AsyncRead, AsyncReadExt, DuplexStream};
use tokio::sync::mpsc;
use tracing::{error, trace, warn};

use crate::protocol::rpc::{ConnectionContext, Dispatcher, MAX_RPC_RECORD_LENGTH};
use crate::protocol::xdr::rpc::GarbageArgs;
use crate::protocol::xdr::{self, Serialize, XdrSize, ALIGNMENT};

/// Flag bit of a record mark announcing the last fragment of a record
pub const LAST_FRAGMENT: u32 = 1 << 31;

/// Maximum fragment size is 2^31 - 1 bytes
pub const MAX_FRAGMENT_SIZE: usize = (1 << 31) - 1;

/// Builds the record mark announcing a fragment of `length` bytes.
pub fn record_mark(length: usize, is_last: bool) -> std::io::Result<u32> {
    if length > MAX_FRAGMENT_SIZE {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("fragment of {length} bytes does not fit a record mark"),
        ));
    }
    let length = length as u32;
    Ok(if is_last { length | LAST_FRAGMENT } else { length })
}

/// Splits a record mark into the last-fragment flag and the fragment length.
pub fn parse_record_mark(mark: u32) -> (bool, usize) {
    (mark & LAST_FRAGMENT != 0, (mark & !LAST_FRAGMENT) as usize)
}

/// Encodes `header` followed by `body` as one complete record, mark included.
///
/// The buffer is allocated once from the predicted sizes, and each part is
/// checked against its prediction as it is written.
pub fn encode_record<H, B>(header: &H, body: &B) -> std::io::Result<Vec<u8>>
where
    H: Serialize + XdrSize,
    B: Serialize + XdrSize + ?Sized,
{
    let length = header.packed_size() + body.packed_size();
    let mark = record_mark(length, true)?;
    let mut buf = Vec::with_capacity(4 + length);
    buf.extend_from_slice(&mark.to_be_bytes());
    xdr::write_sized(header, &mut buf)?;
    xdr::write_sized(body, &mut buf)?;
    Ok(buf)
}

/// Reads a single record-marked fragment from a stream
///
/// Appends the fragment data to `append_to`, which already holds the earlier
/// fragments of the same record.
///
/// # Returns
///
/// The last-fragment flag and the length of the fragment just read.
/// Fails when the record would grow beyond `max_record_length`.
pub async fn read_fragment<S>(
    socket: &mut S,
    append_to: &mut Vec<u8>,
    max_record_length: usize,
) -> Result<(bool, usize), anyhow::Error>
where
    S: AsyncRead + Unpin,
{
    let mut header_buf = [0_u8; 4];
    socket.read_exact(&mut header_buf).await?;
    let (is_last, length) = parse_record_mark(u32::from_be_bytes(header_buf));
    trace!("Reading fragment length:{}, last:{}", length, is_last);
    if append_to.len().saturating_add(length) > max_record_length {
        return Err(anyhow::anyhow!(
            "RPC record length {} exceeds max {}",
            append_to.len().saturating_add(length),
            max_record_length
        ));
    }
    let start_offset = append_to.len();
    append_to.resize(start_offset + length, 0);
    socket.read_exact(&mut append_to[start_offset..]).await?;
    trace!("Finishing Reading fragment length:{}, last:{}", length, is_last);
    Ok((is_last, length))
}

/// Reads fragments until a complete record is assembled.
pub async fn read_record<S>(socket: &mut S, max_record_length: usize) -> anyhow::Result<Vec<u8>>
where
    S: AsyncRead + Unpin,
{
    let mut record = Vec::new();
    loop {
        let (is_last, _) = read_fragment(socket, &mut record, max_record_length).await?;
        if is_last {
            return Ok(record);
        }
    }
}

/// An encoded reply record, or the error that ends the connection.
pub type SocketMessageType = Result<Vec<u8>, anyhow::Error>;

/// A handler panicked while answering a call, which leaves that call without
/// a reply. Transports must not keep serving after receiving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerPanic {
    /// Transaction id of the unanswered call
    pub xid: u32,
    pub message: String,
}

impl HandlerPanic {
    fn new(record: &[u8], payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else {
            "non-string panic payload".to_string()
        };
        HandlerPanic { xid: record_xid(record).unwrap_or(0), message }
    }
}

impl fmt::Display for HandlerPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler for xid {} panicked: {}", self.xid, self.message)
    }
}

impl std::error::Error for HandlerPanic {}

/// Transaction id at the start of a record, if it is long enough to hold one.
fn record_xid(record: &[u8]) -> Option<u32> {
    let xid = record.get(..4)?;
    Some(u32::from_be_bytes([xid[0], xid[1], xid[2], xid[3]]))
}

/// Handles RPC message processing over one connection
///
/// Bytes received from the socket are written into the duplex stream returned
/// by [`SocketMessageHandler::new`]; [`SocketMessageHandler::read`] consumes
/// them one fragment at a time. Every complete record is dispatched on its own
/// task and the encoded reply is sent to the returned channel as soon as its
/// handler finishes, so replies leave in completion order. A handler panic is
/// sent as a [`HandlerPanic`] error.
#[derive(Debug)]
pub struct SocketMessageHandler {
    /// Fragments of the record being assembled
    cur_fragment: Vec<u8>,
    /// Set when a fragment of the current record had a non-aligned length
    misaligned: bool,
    /// Channel for receiving data from socket
    socket_receive_channel: DuplexStream,
    dispatcher: Dispatcher,
    conn: ConnectionContext,
    max_record_length: usize,
    replies: mpsc::UnboundedSender<SocketMessageType>,
}

impl SocketMessageHandler {
    /// Creates a new `SocketMessageHandler` instance
    ///
    /// Returns the handler itself, a duplex stream the transport writes socket
    /// bytes into, and a receiver for encoded reply records.
    pub fn new(
        dispatcher: &Dispatcher,
        conn: ConnectionContext,
    ) -> (Self, DuplexStream, mpsc::UnboundedReceiver<SocketMessageType>) {
        let (socksend, sockrecv) = tokio::io::duplex(256_000);
        let (msgsend, msgrecv) = mpsc::unbounded_channel();

        (
            Self {
                cur_fragment: Vec::new(),
                misaligned: false,
                socket_receive_channel: sockrecv,
                dispatcher: dispatcher.clone(),
                conn,
                max_record_length: MAX_RPC_RECORD_LENGTH,
                replies: msgsend,
            },
            socksend,
            msgrecv,
        )
    }

    /// Caps the size of a reassembled record.
    pub fn with_max_record_length(mut self, max_record_length: usize) -> Self {
        self.max_record_length = max_record_length;
        self
    }

    /// Reads and processes a fragment from the socket
    ///
    /// Should be called in a loop; an error means the connection can no
    /// longer be framed and must be closed.
    pub async fn read(&mut self) -> Result<(), anyhow::Error> {
        let (is_last, length) = read_fragment(
            &mut self.socket_receive_channel,
            &mut self.cur_fragment,
            self.max_record_length,
        )
        .await?;
        if length % ALIGNMENT != 0 {
            self.misaligned = true;
        }
        if !is_last {
            return Ok(());
        }

        let record = std::mem::take(&mut self.cur_fragment);
        if std::mem::take(&mut self.misaligned) {
            self.reject_misaligned(&record)?;
            return Ok(());
        }

        let dispatcher = self.dispatcher.clone();
        let conn = self.conn.clone();
        let replies = self.replies.clone();
        tokio::spawn(async move {
            let outcome = AssertUnwindSafe(dispatcher.dispatch(&record, &conn)).catch_unwind();
            match outcome.await {
                Ok(Ok(Some(reply))) => {
                    let _ = replies.send(Ok(reply));
                }
                Ok(Ok(None)) => {}
                Ok(Err(e)) => {
                    error!("RPC error: {:?}", e);
                    let _ = replies.send(Err(e));
                }
                Err(payload) => {
                    let panic = HandlerPanic::new(&record, payload.as_ref());
                    error!("{}", panic);
                    let _ = replies.send(Err(panic.into()));
                }
            }
        });
        Ok(())
    }

    /// XDR data is always a multiple of four bytes, so a fragment of any other
    /// length cannot hold valid arguments.
    fn reject_misaligned(&self, record: &[u8]) -> Result<(), anyhow::Error> {
        let Some(xid) = record_xid(record) else {
            warn!("Dropping non-aligned record of {} bytes without xid", record.len());
            return Ok(());
        };
        warn!("Non-aligned record of {} bytes, xid {}", record.len(), xid);
        let reply = encode_record(&GarbageArgs { xid }, &())?;
        let _ = self.replies.send(Ok(reply));
        Ok(())
    }
}
