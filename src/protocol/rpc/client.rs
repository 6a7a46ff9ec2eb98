//! Minimal RPC client issuing one call at a time over a stream transport.
//!
//! Calls are encoded the same way the server encodes replies: one buffer sized
//! from the call header and the arguments, sent as a single last fragment.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tracing::trace;

use crate::protocol::rpc::wire::{encode_record, read_record};
use crate::protocol::rpc::{Procedure, MAX_RPC_RECORD_LENGTH};
use crate::protocol::xdr::rpc::{
    accept_body, auth_stat, auth_unix, call_body, opaque_auth, rejected_reply, reply_body,
    rpc_body, rpc_msg, RPC_VERSION,
};
use crate::protocol::xdr::{deserialize, Decodable};

/// Why an RPC call produced no procedure result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    /// The server does not speak RPC version 2
    RpcMismatch { low: u32, high: u32 },
    /// The server refused the credentials
    AuthError(auth_stat),
    ProgramUnavailable,
    /// The program is served in versions `low..=high` only
    ProgramMismatch { low: u32, high: u32 },
    ProcedureUnavailable,
    GarbageArgs,
    SystemError,
    /// The reply answers another call
    XidMismatch { expected: u32, received: u32 },
    /// The server sent a CALL where a REPLY was expected
    UnexpectedCall,
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RpcMismatch { low, high } => {
                write!(f, "RPC version mismatch, server supports {low}..={high}")
            }
            Self::AuthError(stat) => write!(f, "authentication failed: {stat:?}"),
            Self::ProgramUnavailable => write!(f, "program unavailable"),
            Self::ProgramMismatch { low, high } => {
                write!(f, "program version mismatch, server supports {low}..={high}")
            }
            Self::ProcedureUnavailable => write!(f, "procedure unavailable"),
            Self::GarbageArgs => write!(f, "server could not decode the arguments"),
            Self::SystemError => write!(f, "server system error"),
            Self::XidMismatch { expected, received } => {
                write!(f, "reply xid {received} does not match call xid {expected}")
            }
            Self::UnexpectedCall => write!(f, "received a call instead of a reply"),
        }
    }
}

impl std::error::Error for RpcError {}

impl From<rejected_reply> for RpcError {
    fn from(reply: rejected_reply) -> Self {
        match reply {
            rejected_reply::RPC_MISMATCH(info) => {
                RpcError::RpcMismatch { low: info.low, high: info.high }
            }
            rejected_reply::AUTH_ERROR(stat) => RpcError::AuthError(stat),
        }
    }
}

pub struct RpcClient<IO> {
    io: IO,
    xid: u32,
    cred: opaque_auth,
}

impl RpcClient<TcpStream> {
    /// Connects to an RPC server over TCP.
    pub async fn connect(addr: impl ToSocketAddrs) -> std::io::Result<RpcClient<TcpStream>> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        Ok(RpcClient::new(stream))
    }
}

impl<IO> RpcClient<IO>
where
    IO: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(io: IO) -> Self {
        let seed = SystemTime::now().duration_since(UNIX_EPOCH).map_or(1, |d| d.subsec_nanos());
        Self { io, xid: seed, cred: opaque_auth::default() }
    }

    /// Sends `cred` as AUTH_UNIX credentials with every call.
    pub fn with_auth_unix(mut self, cred: &auth_unix) -> std::io::Result<Self> {
        self.cred = opaque_auth::unix(cred)?;
        Ok(self)
    }

    /// Calls procedure `P` of program `prog` version `vers`.
    pub async fn call<P: Procedure>(
        &mut self,
        prog: u32,
        vers: u32,
        args: &P::Args,
    ) -> anyhow::Result<P::Res> {
        let record = self.call_raw(prog, vers, P::PROC, args).await?;
        Ok(P::Res::decode(&record)?)
    }

    /// Calls procedure 0 of a program.
    pub async fn null(&mut self, prog: u32, vers: u32) -> anyhow::Result<()> {
        self.call_raw(prog, vers, 0, &()).await?;
        Ok(())
    }

    /// Sends one call and returns the procedure results of the reply, still encoded.
    async fn call_raw<A>(
        &mut self,
        prog: u32,
        vers: u32,
        proc: u32,
        args: &A,
    ) -> anyhow::Result<Vec<u8>>
    where
        A: crate::protocol::xdr::Serialize + crate::protocol::xdr::XdrSize,
    {
        let xid = self.xid;
        self.xid = self.xid.wrapping_add(1);

        let call = call_body {
            rpcvers: RPC_VERSION,
            prog,
            vers,
            proc,
            cred: self.cred.clone(),
            verf: opaque_auth::default(),
        };
        let msg = rpc_msg { xid, body: rpc_body::CALL(call) };
        let buf = encode_record(&msg, args)?;
        trace!("Sending call xid {} ({} bytes)", xid, buf.len());
        self.io.write_all(&buf).await?;

        let record = read_record(&mut self.io, MAX_RPC_RECORD_LENGTH).await?;
        let mut src = record.as_slice();
        let reply = deserialize::<rpc_msg>(&mut src)?;
        if reply.xid != xid {
            return Err(RpcError::XidMismatch { expected: xid, received: reply.xid }.into());
        }
        let accepted = match reply.body {
            rpc_body::REPLY(reply_body::MSG_ACCEPTED(accepted)) => accepted,
            rpc_body::REPLY(reply_body::MSG_DENIED(rejected)) => {
                return Err(RpcError::from(rejected).into())
            }
            rpc_body::CALL(_) => return Err(RpcError::UnexpectedCall.into()),
        };
        match accepted.reply_data {
            accept_body::SUCCESS => Ok(src.to_vec()),
            accept_body::PROG_UNAVAIL => Err(RpcError::ProgramUnavailable.into()),
            accept_body::PROG_MISMATCH(info) => {
                Err(RpcError::ProgramMismatch { low: info.low, high: info.high }.into())
            }
            accept_body::PROC_UNAVAIL => Err(RpcError::ProcedureUnavailable.into()),
            accept_body::GARBAGE_ARGS => Err(RpcError::GarbageArgs.into()),
            accept_body::SYSTEM_ERR => Err(RpcError::SystemError.into()),
        }
    }
}
