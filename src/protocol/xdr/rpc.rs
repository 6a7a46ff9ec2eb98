//! This module provides data structures for the Remote Procedure Call (RPC) protocol
//! as defined in RFC 5531 (previously RFC 1057). These structures handle serialization and deserialization
//! of RPC messages between client and server.
//!
//! The canned replies at the bottom of the module ([`ProgramUnavailable`],
//! [`ProgramMismatch`], [`ProcedureUnavailable`], [`GarbageArgs`],
//! [`MismatchReply`] and the [`SuccessHeader`] that precedes every result body)
//! have a fixed encoded size, exposed as `XDR_SIZE`.

#![allow(non_camel_case_types)]

use std::io::{Read, Write};

use num_derive::{FromPrimitive, ToPrimitive};

use crate::{DeserializeEnum, SerializeEnum};

use super::*;

/// The only RPC protocol version this crate speaks.
pub const RPC_VERSION: u32 = 2;

/// Authentication status codes indicating why authentication failed
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum auth_stat {
    /// Invalid credentials provided by client (checksum/signature verification failed)
    #[default]
    AUTH_BADCRED = 1,
    /// Credentials rejected - client needs to establish a new session
    AUTH_REJECTEDCRED = 2,
    /// Invalid verifier provided by client (checksum/signature verification failed)
    AUTH_BADVERF = 3,
    /// Verifier rejected due to expiration or replay attempt
    AUTH_REJECTEDVERF = 4,
    /// Authentication mechanism too weak for requested operation
    AUTH_TOOWEAK = 5,
}
SerializeEnum!(auth_stat);
DeserializeEnum!(auth_stat);

/// Authentication flavor (mechanism) identifiers for RPC
///
/// [`opaque_auth::flavor`] stays a raw number on the wire, so flavors missing
/// here still decode; compare with `auth_flavor::X as u32`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum auth_flavor {
    /// No authentication
    #[default]
    AUTH_NULL = 0,
    /// UNIX-style authentication (uid/gid)
    AUTH_UNIX = 1,
    /// Short-form authentication
    AUTH_SHORT = 2,
    /// DES authentication
    AUTH_DES = 3,
    /// Kerberos authentication
    AUTH_KERB = 4,
    /// GSS-API based security (RFC 2203)
    RPCSEC_GSS = 6,
}

/// UNIX-style credentials used for authentication
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct auth_unix {
    /// Arbitrary id generated by the caller
    pub stamp: u32,
    /// The name of the client machine
    pub machinename: Vec<u8>,
    /// The effective user ID of the caller
    pub uid: u32,
    /// The effective group ID of the caller
    pub gid: u32,
    /// A list of additional group IDs for the caller
    pub gids: Vec<u32>,
}
XdrStruct!(auth_unix, stamp, machinename, uid, gid, gids);

/// Authentication data structure used in RPC protocol for both client and server authentication.
///
/// Call messages carry two of these (credentials and verifier), replies carry one
/// (the response verifier). The body is interpreted according to `flavor`;
/// this crate only decodes `AUTH_UNIX` bodies and never verifies them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct opaque_auth {
    /// The authentication mechanism, an [`auth_flavor`] or any other number
    pub flavor: u32,
    /// The opaque authentication data associated with that mechanism
    pub body: Vec<u8>,
}
XdrStruct!(opaque_auth, flavor, body);

impl opaque_auth {
    /// Builds `AUTH_UNIX` credentials.
    pub fn unix(cred: &auth_unix) -> std::io::Result<opaque_auth> {
        Ok(opaque_auth { flavor: auth_flavor::AUTH_UNIX as u32, body: cred.encode()? })
    }

    /// Decodes the credential body when the flavor is `AUTH_UNIX`.
    pub fn as_unix(&self) -> Option<auth_unix> {
        if self.flavor != auth_flavor::AUTH_UNIX as u32 {
            return None;
        }
        auth_unix::decode(&self.body).ok()
    }
}

/// RPC message structure as defined in RFC 5531 (previously RFC 1057).
///
/// Each RPC message begins with a transaction identifier (xid) followed by a
/// discriminated union containing either a CALL or REPLY message body.
/// The xid in a REPLY always matches the xid from the initiating CALL; it is
/// not a sequence number.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct rpc_msg {
    /// Transaction identifier used to match calls and replies
    pub xid: u32,
    /// The body of the RPC message (call or reply)
    pub body: rpc_body,
}
XdrStruct!(rpc_msg, xid, body);

/// The body of an RPC message, which can be either a call or a reply
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum rpc_body {
    /// A call to a remote procedure
    CALL(call_body),
    /// A reply from a remote procedure
    REPLY(reply_body),
}

impl Default for rpc_body {
    fn default() -> rpc_body {
        rpc_body::CALL(call_body::default())
    }
}

impl Serialize for rpc_body {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        match self {
            rpc_body::CALL(v) => {
                0_u32.serialize(dest)?;
                v.serialize(dest)?;
            }
            rpc_body::REPLY(v) => {
                1_u32.serialize(dest)?;
                v.serialize(dest)?;
            }
        }
        Ok(())
    }
}

impl Deserialize for rpc_body {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        match deserialize::<u32>(src)? {
            0 => *self = rpc_body::CALL(deserialize(src)?),
            1 => *self = rpc_body::REPLY(deserialize(src)?),
            msg_type => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Invalid message type in rpc_body: {msg_type}"),
                ))
            }
        }

        Ok(())
    }
}

impl XdrSize for rpc_body {
    fn packed_size(&self) -> usize {
        4 + match self {
            rpc_body::CALL(v) => v.packed_size(),
            rpc_body::REPLY(v) => v.packed_size(),
        }
    }
}

/// The body of an RPC call, containing all information needed for a remote procedure call
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct call_body {
    /// RPC version, must be 2
    pub rpcvers: u32,
    /// The program to call
    pub prog: u32,
    /// The version of the program
    pub vers: u32,
    /// The procedure within the program to call
    pub proc: u32,
    /// Authentication credentials for the caller
    pub cred: opaque_auth,
    /// Authentication verifier for the caller
    pub verf: opaque_auth,
    /* procedure specific parameters start here */
}
XdrStruct!(call_body, rpcvers, prog, vers, proc, cred, verf);

/// The body of an RPC reply, indicating whether the call was accepted or denied
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum reply_body {
    /// The call was accepted
    MSG_ACCEPTED(accepted_reply),
    /// The call was denied
    MSG_DENIED(rejected_reply),
}

impl Default for reply_body {
    fn default() -> reply_body {
        reply_body::MSG_ACCEPTED(accepted_reply::default())
    }
}

impl Serialize for reply_body {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        match self {
            reply_body::MSG_ACCEPTED(v) => {
                0_u32.serialize(dest)?;
                v.serialize(dest)?;
            }
            reply_body::MSG_DENIED(v) => {
                1_u32.serialize(dest)?;
                v.serialize(dest)?;
            }
        }
        Ok(())
    }
}

impl Deserialize for reply_body {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        match deserialize::<u32>(src)? {
            0 => *self = reply_body::MSG_ACCEPTED(deserialize(src)?),
            1 => *self = reply_body::MSG_DENIED(deserialize(src)?),
            reply_status => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Invalid reply status in reply_body: {reply_status}"),
                ))
            }
        }

        Ok(())
    }
}

impl XdrSize for reply_body {
    fn packed_size(&self) -> usize {
        4 + match self {
            reply_body::MSG_ACCEPTED(v) => v.packed_size(),
            reply_body::MSG_DENIED(v) => v.packed_size(),
        }
    }
}

/// Range of versions supported, reported on version mismatch
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct mismatch_info {
    /// Lowest version supported
    pub low: u32,
    /// Highest version supported
    pub high: u32,
}
XdrStruct!(mismatch_info, low, high);

/// Reply to an RPC call that was accepted by the server.
///
/// Even though the call was accepted, there could still be an error in processing it:
/// `reply_data` tells success from the four accepted failure kinds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct accepted_reply {
    /// Authentication verifier from server
    pub verf: opaque_auth,
    /// Reply data union discriminated by accept_stat
    pub reply_data: accept_body,
}
XdrStruct!(accepted_reply, verf, reply_data);

/// Response data for an accepted RPC call, discriminated by accept_stat.
///
/// For `SUCCESS` the procedure-specific results follow on the wire and are
/// not part of this value.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum accept_body {
    /// Call completed successfully
    #[default]
    SUCCESS,
    /// Program is not available on this server
    PROG_UNAVAIL,
    /// Program version mismatch, includes supported version range
    PROG_MISMATCH(mismatch_info),
    /// Requested procedure is not available
    PROC_UNAVAIL,
    /// Server could not decode the call arguments
    GARBAGE_ARGS,
    /// Server failed for a reason unrelated to the call (memory allocation etc.)
    SYSTEM_ERR,
}

impl Serialize for accept_body {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        match self {
            accept_body::SUCCESS => 0_u32.serialize(dest),
            accept_body::PROG_UNAVAIL => 1_u32.serialize(dest),
            accept_body::PROG_MISMATCH(v) => {
                2_u32.serialize(dest)?;
                v.serialize(dest)
            }
            accept_body::PROC_UNAVAIL => 3_u32.serialize(dest),
            accept_body::GARBAGE_ARGS => 4_u32.serialize(dest),
            accept_body::SYSTEM_ERR => 5_u32.serialize(dest),
        }
    }
}

impl Deserialize for accept_body {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        match deserialize::<u32>(src)? {
            0 => *self = accept_body::SUCCESS,
            1 => *self = accept_body::PROG_UNAVAIL,
            2 => *self = accept_body::PROG_MISMATCH(deserialize(src)?),
            3 => *self = accept_body::PROC_UNAVAIL,
            4 => *self = accept_body::GARBAGE_ARGS,
            5 => *self = accept_body::SYSTEM_ERR,
            accept_stat => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Invalid accept stat in accept_body: {accept_stat}"),
                ));
            }
        }

        Ok(())
    }
}

impl XdrSize for accept_body {
    fn packed_size(&self) -> usize {
        match self {
            accept_body::PROG_MISMATCH(v) => 4 + v.packed_size(),
            _ => 4,
        }
    }
}

/// Reply sent when an RPC call is rejected by the server.
///
/// The call is rejected either because the server does not speak the caller's
/// RPC version (`RPC_MISMATCH`, with the supported range) or because it refuses
/// to authenticate the caller (`AUTH_ERROR`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum rejected_reply {
    /// RPC version mismatch - includes supported version range
    RPC_MISMATCH(mismatch_info),
    /// Authentication failed - includes specific error code
    AUTH_ERROR(auth_stat),
}

impl Default for rejected_reply {
    fn default() -> rejected_reply {
        rejected_reply::AUTH_ERROR(auth_stat::default())
    }
}

impl Serialize for rejected_reply {
    fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        match self {
            rejected_reply::RPC_MISMATCH(v) => {
                0_u32.serialize(dest)?;
                v.serialize(dest)
            }
            rejected_reply::AUTH_ERROR(v) => {
                1_u32.serialize(dest)?;
                v.serialize(dest)
            }
        }
    }
}

impl Deserialize for rejected_reply {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        match deserialize::<u32>(src)? {
            0 => *self = rejected_reply::RPC_MISMATCH(deserialize(src)?),
            1 => *self = rejected_reply::AUTH_ERROR(deserialize(src)?),
            stat => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Invalid reject stat in rejected_reply: {stat}"),
                ))
            }
        }

        Ok(())
    }
}

impl XdrSize for rejected_reply {
    fn packed_size(&self) -> usize {
        4 + match self {
            rejected_reply::RPC_MISMATCH(v) => v.packed_size(),
            rejected_reply::AUTH_ERROR(v) => v.packed_size(),
        }
    }
}

fn accepted(xid: u32, reply_data: accept_body) -> rpc_msg {
    let reply = reply_body::MSG_ACCEPTED(accepted_reply { verf: opaque_auth::default(), reply_data });
    rpc_msg { xid, body: rpc_body::REPLY(reply) }
}

/// Implements the codec traits of a canned reply through its `rpc_msg` form,
/// reporting the fixed `XDR_SIZE` as its length.
macro_rules! canned_reply {
    ($t:ident, $size:expr) => {
        impl $t {
            /// Encoded size of this reply header.
            pub const XDR_SIZE: usize = $size;
        }

        impl Serialize for $t {
            fn serialize<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
                rpc_msg::from(*self).serialize(dest)
            }
        }

        impl XdrSize for $t {
            fn packed_size(&self) -> usize {
                Self::XDR_SIZE
            }
        }
    };
}

/// Header of an accepted, successful reply. The procedure results follow it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SuccessHeader {
    pub xid: u32,
}
canned_reply!(SuccessHeader, 24);

impl From<SuccessHeader> for rpc_msg {
    fn from(reply: SuccessHeader) -> Self {
        accepted(reply.xid, accept_body::SUCCESS)
    }
}

/// The requested program is not served here.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProgramUnavailable {
    pub xid: u32,
}
canned_reply!(ProgramUnavailable, 24);

impl From<ProgramUnavailable> for rpc_msg {
    fn from(reply: ProgramUnavailable) -> Self {
        accepted(reply.xid, accept_body::PROG_UNAVAIL)
    }
}

/// The program is served, but not in the requested version.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProgramMismatch {
    pub xid: u32,
    /// Lowest version served
    pub low: u32,
    /// Highest version served
    pub high: u32,
}
canned_reply!(ProgramMismatch, 32);

impl From<ProgramMismatch> for rpc_msg {
    fn from(reply: ProgramMismatch) -> Self {
        let info = mismatch_info { low: reply.low, high: reply.high };
        accepted(reply.xid, accept_body::PROG_MISMATCH(info))
    }
}

/// The program and version are served, but the procedure is not.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProcedureUnavailable {
    pub xid: u32,
}
canned_reply!(ProcedureUnavailable, 24);

impl From<ProcedureUnavailable> for rpc_msg {
    fn from(reply: ProcedureUnavailable) -> Self {
        accepted(reply.xid, accept_body::PROC_UNAVAIL)
    }
}

/// The procedure arguments could not be decoded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GarbageArgs {
    pub xid: u32,
}
canned_reply!(GarbageArgs, 24);

impl From<GarbageArgs> for rpc_msg {
    fn from(reply: GarbageArgs) -> Self {
        accepted(reply.xid, accept_body::GARBAGE_ARGS)
    }
}

/// Denied reply sent when the caller does not speak RPC version 2.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MismatchReply {
    pub xid: u32,
    pub low: u32,
    pub high: u32,
}
canned_reply!(MismatchReply, 24);

impl MismatchReply {
    pub fn new(xid: u32) -> Self {
        MismatchReply { xid, low: RPC_VERSION, high: RPC_VERSION }
    }
}

impl From<MismatchReply> for rpc_msg {
    fn from(reply: MismatchReply) -> Self {
        let info = mismatch_info { low: reply.low, high: reply.high };
        let body = reply_body::MSG_DENIED(rejected_reply::RPC_MISMATCH(info));
        rpc_msg { xid: reply.xid, body: rpc_body::REPLY(body) }
    }
}
